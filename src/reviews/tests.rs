use super::*;
use crate::config::ClientConfig;
use crate::error::ApiErrorKind;
use crate::request::{HttpMethod, MockHttpClient};
use gametracker_shared::Reference;
use serde_json::json;

const BASE: &str = "http://api.test/api";

fn api() -> GameTrackerApi<MockHttpClient> {
    GameTrackerApi::new(
        MockHttpClient::new(),
        &ClientConfig::new(BASE, "http://api.test"),
    )
    .with_token(Some("tok".into()))
}

fn complete_editor() -> ReviewEditor {
    let mut editor = ReviewEditor::create();
    editor.set_game("g1");
    editor.set_body("Muy bueno");
    editor.set_rating(4);
    editor.set_hours("12");
    editor.set_difficulty(Some(Difficulty::Normal));
    editor.set_recommends(Some(true));
    editor
}

fn review(value: serde_json::Value) -> Review {
    serde_json::from_value(value).unwrap()
}

fn listing() -> Vec<Review> {
    vec![
        review(json!({
            "_id": "old", "textoReseña": "Difícil pero justo",
            "juego": { "_id": "g1", "titulo": "Dark Souls" },
            "usuario": { "_id": "u1", "nombre": "Ana" },
            "dificultad": "Difícil", "recomendaria": true,
            "fechaCreacion": "2023-05-01T00:00:00Z"
        })),
        review(json!({
            "_id": "new", "textoReseña": "Relajante",
            "juego": { "_id": "g2", "titulo": "Stardew Valley" },
            "usuario": { "_id": "u2", "nombre": "Luis" },
            "dificultad": "Fácil", "recomendaria": true,
            "createdAt": "2024-02-01T00:00:00Z"
        })),
        review(json!({
            "_id": "mid", "textoReseña": "Aburrido",
            "juego": "g3", "usuarioId": "u1",
            "dificultad": "normal", "recomendaria": false,
            "fechaCreacion": "2023-09-01T00:00:00Z"
        })),
    ]
}

fn ids(reviews: &[Review]) -> Vec<&str> {
    reviews.iter().map(|r| r.id.as_str()).collect()
}

fn user(id: &str) -> User {
    User {
        id: id.into(),
        ..Default::default()
    }
}

// =========================================================
// Draft validation
// =========================================================

#[test]
fn complete_draft_validates() {
    let review = complete_editor().draft().validate().unwrap();
    assert_eq!(review.game_id, "g1");
    assert_eq!(review.content.hours_played, 12.0);
    assert_eq!(review.content.rating, 4);
}

#[test]
fn each_missing_field_is_reported() {
    let mut editor = complete_editor();
    editor.set_rating(0);
    editor.set_hours("abc");
    editor.set_recommends(None);

    assert_eq!(
        editor.draft().missing_fields(),
        vec![
            DraftField::HoursPlayed,
            DraftField::Recommendation,
            DraftField::Rating
        ]
    );
    let err = editor.draft().validate().unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Validation);
    assert!(err.message().contains("puntuación"));
}

#[test]
fn rating_cannot_exceed_five() {
    let mut editor = complete_editor();
    editor.set_rating(9);
    assert_eq!(editor.draft().rating, 5);
}

#[tokio::test]
async fn incomplete_draft_sends_nothing() {
    let api = api();
    for blank in 0..4 {
        let mut editor = complete_editor();
        match blank {
            0 => {
                editor.set_game("");
            }
            1 => editor.set_body("   "),
            2 => editor.set_hours(""),
            _ => editor.set_difficulty(None),
        }
        assert!(submit_review(&api, &editor).await.is_err());
    }
    assert_eq!(api.client().request_count(), 0);
}

// =========================================================
// Create / edit
// =========================================================

#[tokio::test]
async fn create_posts_review() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{}/resenas", BASE),
        201,
        json!({ "_id": "r9" }),
    );

    let outcome = submit_review(&api, &complete_editor()).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Created);
    let req = api.client().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(req.json_body().unwrap()).unwrap();
    assert_eq!(body["juegoId"], "g1");
    assert_eq!(body["recomendaria"], true);
}

#[tokio::test]
async fn edit_locks_game_and_puts_update() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Put,
        &format!("{}/resenas/old", BASE),
        200,
        json!({}),
    );
    let existing = listing().remove(0);

    let mut editor = ReviewEditor::edit(&existing);
    assert!(editor.is_editing());
    assert_eq!(editor.draft().game_id, "g1");
    assert!(!editor.set_game("g2"));
    assert_eq!(editor.draft().game_id, "g1");

    editor.set_rating(3);
    editor.set_hours("40");
    let outcome = submit_review(&api, &editor).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Updated);
    let req = api.client().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(req.json_body().unwrap()).unwrap();
    assert!(body.get("juegoId").is_none());
    assert_eq!(body["puntuacion"], 3);

    editor.reset();
    assert!(!editor.is_editing());
    assert_eq!(editor.draft(), &ReviewDraft::default());
}

// =========================================================
// Listing
// =========================================================

#[test]
fn newest_first() {
    let filter = ReviewFilter::default();
    assert_eq!(ids(&filter.apply(&listing())), vec!["new", "mid", "old"]);
}

#[test]
fn search_covers_body_and_game_title() {
    let filter = ReviewFilter {
        query: "stardew".into(),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&listing())), vec!["new"]);

    let filter = ReviewFilter {
        query: "ABURR".into(),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&listing())), vec!["mid"]);
}

#[test]
fn difficulty_and_recommendation_filters() {
    let filter = ReviewFilter {
        difficulty: Choice::parse("NORMAL"),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&listing())), vec!["mid"]);

    let filter = ReviewFilter {
        recommendation: RecommendFilter::parse("si"),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&listing())), vec!["new", "old"]);

    let filter = ReviewFilter {
        difficulty: Choice::parse("todos"),
        recommendation: RecommendFilter::parse("no"),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&listing())), vec!["mid"]);
}

#[test]
fn only_the_author_may_delete() {
    let mut state = ReviewsState::default();
    state.replace(listing());

    assert!(!state.request_deletion("old", None));
    assert!(!state.request_deletion("old", Some(&user("u2"))));
    assert!(state.request_deletion("mid", Some(&user("u1"))));
    assert_eq!(state.pending_deletion().map(|r| r.id.as_str()), Some("mid"));
}

#[test]
fn author_from_any_reference_shape() {
    let mut r = Review::default();
    r.author = Some(Reference::Id("u5".into()));
    assert!(is_author(&r, Some(&user("u5"))));
    assert!(!is_author(&r, Some(&user(""))));
}

#[tokio::test]
async fn delete_flow() {
    let api = api();
    api.client().mock_text(HttpMethod::Delete, &format!("{}/resenas/mid", BASE), 204, "");
    let mut state = ReviewsState::default();
    state.replace(listing());

    state.request_deletion("mid", Some(&user("u1")));
    let confirmed = state.confirm_deletion().unwrap();
    let id = delete_review(&api, confirmed).await.unwrap();
    state.apply_deletion(&id);

    assert_eq!(ids(state.reviews()), vec!["old", "new"]);
}

#[tokio::test]
async fn load_accepts_wrapped_payload() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{}/resenas", BASE),
        200,
        json!({ "resenas": [{ "_id": "r1", "textoReseña": "ok" }] }),
    );

    let reviews = load_reviews(&api).await.unwrap();
    assert_eq!(reviews.len(), 1);
}
