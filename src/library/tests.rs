use super::*;
use crate::config::ClientConfig;
use crate::error::ApiErrorKind;
use crate::request::{HttpMethod, MockHttpClient};
use serde_json::json;

const BASE: &str = "http://api.test/api";

fn api() -> GameTrackerApi<MockHttpClient> {
    GameTrackerApi::new(
        MockHttpClient::new(),
        &ClientConfig::new(BASE, "http://api.test"),
    )
    .with_token(Some("tok".into()))
}

fn entry(id: &str, title: &str, genre: Option<Genre>, completed: bool) -> LibraryEntry {
    LibraryEntry {
        id: id.into(),
        title: title.into(),
        genre,
        completed,
        ..Default::default()
    }
}

fn sample() -> Vec<LibraryEntry> {
    vec![
        entry("g1", "Hades", Some(Genre::Action), true),
        entry("g2", "Celeste", Some(Genre::Platformer), false),
        entry("g3", "Hollow Knight", Some(Genre::Action), false),
        entry("g4", "Unknown", None, false),
    ]
}

fn ids(entries: &[LibraryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

// =========================================================
// Filtering
// =========================================================

#[test]
fn genre_all_returns_everything() {
    let mut state = LibraryState::default();
    state.replace(sample());

    let filter = LibraryFilter {
        query: String::new(),
        genre: Choice::parse("todos"),
    };
    assert_eq!(state.visible(&filter).len(), 4);
    assert!(!filter.is_active());
}

#[test]
fn genre_filter_is_exact_and_case_insensitive() {
    let mut state = LibraryState::default();
    state.replace(sample());

    let filter = LibraryFilter {
        query: String::new(),
        genre: Choice::parse("ACCIÓN"),
    };
    assert_eq!(ids(&state.visible(&filter)), vec!["g1", "g3"]);
}

#[test]
fn title_and_genre_combine() {
    let mut state = LibraryState::default();
    state.replace(sample());

    let mut filter = LibraryFilter {
        query: "hol".into(),
        genre: Choice::Only(Genre::Action),
    };
    assert_eq!(ids(&state.visible(&filter)), vec!["g3"]);

    filter.clear();
    assert_eq!(state.visible(&filter).len(), 4);
}

// =========================================================
// Reducers
// =========================================================

#[test]
fn completion_patch_touches_one_entry() {
    let mut state = LibraryState::default();
    state.replace(sample());

    assert!(state.apply_completion("g2", true));

    let flags: Vec<bool> = state.entries().iter().map(|e| e.completed).collect();
    assert_eq!(flags, vec![true, true, false, false]);
    assert_eq!(state.stats().completed, 2);
}

#[test]
fn removal_requires_confirmation() {
    let mut state = LibraryState::default();
    state.replace(sample());

    assert!(!state.request_removal("missing"));
    assert!(state.confirm_removal().is_none());

    assert!(state.request_removal("g2"));
    assert_eq!(state.pending_removal().map(|e| e.title.as_str()), Some("Celeste"));

    state.cancel_removal();
    assert!(state.pending_removal().is_none());
    assert_eq!(state.entries().len(), 4);

    state.request_removal("g2");
    let confirmed = state.confirm_removal().unwrap();
    assert!(state.apply_removal(confirmed.id()));
    assert_eq!(ids(state.entries()), vec!["g1", "g3", "g4"]);
}

#[test]
fn rating_is_clamped() {
    assert_eq!(clamp_rating(7.0), 5.0);
    assert_eq!(clamp_rating(-1.0), 0.0);
    assert_eq!(clamp_rating(f64::NAN), 0.0);
    assert_eq!(clamp_rating(3.0), 3.0);
}

// =========================================================
// Operations
// =========================================================

#[tokio::test]
async fn missing_library_is_empty() {
    let api = api();
    // No mock registered: the mock answers 404.
    let entries = load_library(&api).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn server_error_propagates() {
    let api = api();
    api.client().mock_text(
        HttpMethod::Get,
        &format!("{}/juegos/mi-biblioteca", BASE),
        500,
        "boom",
    );

    let err = load_library(&api).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Server);
}

#[tokio::test]
async fn toggle_sends_inverted_flag() {
    let api = api();
    let url = format!("{}/juegos/g2", BASE);
    api.client().mock_response(
        HttpMethod::Put,
        &url,
        200,
        json!({ "_id": "g2", "completado": true }),
    );

    let mut state = LibraryState::default();
    state.replace(sample());
    let target = state.entries()[1].clone();

    let stored = toggle_completion(&api, &target).await.unwrap();
    state.apply_completion(&target.id, stored);

    let body = api.client().last_request().unwrap();
    assert_eq!(body.json_body(), Some(r#"{"completado":true}"#));
    assert!(state.entries()[1].completed);
}

#[tokio::test]
async fn toggling_twice_restores_the_flag() {
    let api = api();
    let url = format!("{}/juegos/g1", BASE);
    let mut state = LibraryState::default();
    state.replace(sample());

    for echoed in [false, true] {
        api.client().mock_response(
            HttpMethod::Put,
            &url,
            200,
            json!({ "_id": "g1", "completado": echoed }),
        );
        let current = state.entries()[0].clone();
        let stored = toggle_completion(&api, &current).await.unwrap();
        state.apply_completion("g1", stored);
    }

    assert!(state.entries()[0].completed);
}

#[tokio::test]
async fn failed_toggle_leaves_state_alone() {
    let api = api();
    api.client().go_offline();
    let mut state = LibraryState::default();
    state.replace(sample());
    let before = state.clone();

    let result = toggle_completion(&api, &state.entries()[0].clone()).await;

    assert!(result.is_err());
    assert_eq!(state, before);
}

#[tokio::test]
async fn rate_sends_clamped_value() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Put,
        &format!("{}/juegos/g3", BASE),
        200,
        json!({ "_id": "g3" }),
    );

    let stored = rate(&api, "g3", 9.0).await.unwrap();

    assert_eq!(stored, Some(5.0));
    let req = api.client().last_request().unwrap();
    assert_eq!(req.json_body(), Some(r#"{"calificacion":5.0}"#));
}

#[tokio::test]
async fn remove_uses_library_route() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{}/juegos/quitar-de-biblioteca/g4", BASE),
        200,
        json!({ "mensaje": "ok" }),
    );
    let mut state = LibraryState::default();
    state.replace(sample());
    state.request_removal("g4");

    let confirmed = state.confirm_removal().unwrap();
    let removed = remove_entry(&api, confirmed).await.unwrap();
    state.apply_removal(&removed);

    assert_eq!(removed, "g4");
    assert_eq!(state.entries().len(), 3);
}
