//! "Explore" view: the full game catalog, the add/edit forms and the
//! signed-in user's library membership.

use std::collections::HashSet;

use gametracker_shared::{Game, GameUpdate, Genre, NewGame, Platform};

use crate::api::GameTrackerApi;
use crate::collection::{self, Confirmed, PendingConfirmation};
use crate::error::{ApiError, ApiResult};
use crate::filter::{Choice, contains_ci};
use crate::request::HttpClient;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub query: String,
    pub genre: Choice<Genre>,
    pub platform: Choice<Platform>,
}

impl CatalogFilter {
    pub fn matches(&self, game: &Game) -> bool {
        contains_ci(&game.title, &self.query)
            && self
                .genre
                .allows(|wanted| game.genre.as_ref().is_some_and(|g| g.matches(wanted)))
            && self
                .platform
                .allows(|wanted| game.platform.as_ref().is_some_and(|p| p.matches(wanted)))
    }
}

// =========================================================
// Forms
// =========================================================

/// Raw "add game" form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameDraft {
    pub title: String,
    pub genre: Option<Genre>,
    pub platform: Option<Platform>,
    pub release_year: String,
    pub developer: String,
    pub cover_url: String,
    pub description: String,
    pub completed: bool,
}

impl GameDraft {
    /// Every field is required and the year must be a whole number.
    pub fn validate(&self) -> ApiResult<NewGame> {
        let (Some(genre), Some(platform)) = (self.genre.clone(), self.platform.clone()) else {
            return Err(ApiError::validation("Por favor completa todos los campos"));
        };
        let required = [
            &self.title,
            &self.release_year,
            &self.developer,
            &self.cover_url,
            &self.description,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ApiError::validation("Por favor completa todos los campos"));
        }
        let release_year = self
            .release_year
            .trim()
            .parse::<u32>()
            .map_err(|_| ApiError::validation("El año de lanzamiento no es válido"))?;

        Ok(NewGame {
            title: self.title.trim().to_string(),
            genre,
            platform,
            release_year,
            developer: self.developer.trim().to_string(),
            cover_url: self.cover_url.trim().to_string(),
            description: self.description.trim().to_string(),
            completed: self.completed,
        })
    }
}

/// The fields editable from a catalog card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameEdit {
    pub title: String,
    pub description: String,
    pub developer: String,
    pub cover_url: String,
}

impl GameEdit {
    pub fn from_game(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            description: game.description.clone().unwrap_or_default(),
            developer: game.developer.clone().unwrap_or_default(),
            cover_url: game.cover_url.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> ApiResult<GameUpdate> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation("El título es obligatorio"));
        }
        Ok(GameUpdate {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            developer: Some(self.developer.trim().to_string()),
            cover_url: Some(self.cover_url.trim().to_string()),
            ..Default::default()
        })
    }
}

// =========================================================
// State
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    games: Vec<Game>,
    loading: bool,
    /// Ids of games in the signed-in user's library.
    owned: HashSet<String>,
    deletion: PendingConfirmation,
}

impl CatalogState {
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn replace(&mut self, games: Vec<Game>) {
        self.games = games;
        self.loading = false;
    }

    pub fn visible(&self, filter: &CatalogFilter) -> Vec<Game> {
        self.games
            .iter()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect()
    }

    pub fn set_owned(&mut self, owned: HashSet<String>) {
        self.owned = owned;
    }

    pub fn is_owned(&self, id: &str) -> bool {
        self.owned.contains(id)
    }

    pub fn mark_owned(&mut self, id: &str, owned: bool) {
        if owned {
            self.owned.insert(id.to_string());
        } else {
            self.owned.remove(id);
        }
    }

    /// Replaces the stored game with the updated one.
    pub fn apply_edit(&mut self, updated: Game) -> bool {
        let id = updated.id.clone();
        collection::patch_by_id(&mut self.games, &id, |game| *game = updated)
    }

    pub fn apply_deletion(&mut self, id: &str) -> bool {
        self.owned.remove(id);
        collection::remove_by_id(&mut self.games, id)
    }

    pub fn request_deletion(&mut self, id: &str) -> bool {
        if collection::find_by_id(&self.games, id).is_none() {
            return false;
        }
        self.deletion.request(id);
        true
    }

    pub fn pending_deletion(&self) -> Option<&Game> {
        self.deletion
            .target()
            .and_then(|id| collection::find_by_id(&self.games, id))
    }

    pub fn cancel_deletion(&mut self) {
        self.deletion.cancel();
    }

    pub fn confirm_deletion(&mut self) -> Option<Confirmed> {
        self.deletion.confirm()
    }
}

// =========================================================
// Operations
// =========================================================

pub async fn load_catalog<C: HttpClient>(api: &GameTrackerApi<C>) -> ApiResult<Vec<Game>> {
    match api.list_games().await {
        Ok(games) => Ok(games),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e.in_op("catalog.load")),
    }
}

/// One catalog game, for the detail view.
pub async fn load_game<C: HttpClient>(api: &GameTrackerApi<C>, game_id: &str) -> ApiResult<Game> {
    api.get_game(game_id)
        .await
        .map_err(|e| e.in_op_with("catalog.load_game", game_id))
}

/// Ids of the games in `user_id`'s library. A 404 means none.
pub async fn load_owned_ids<C: HttpClient>(
    api: &GameTrackerApi<C>,
    user_id: &str,
) -> ApiResult<HashSet<String>> {
    match api.user_library(user_id).await {
        Ok(entries) => Ok(entries.into_iter().map(|e| e.id).collect()),
        Err(e) if e.is_not_found() => Ok(HashSet::new()),
        Err(e) => Err(e.in_op_with("catalog.load_owned", user_id)),
    }
}

/// Adds or removes a game from the library; returns the new membership.
pub async fn set_in_library<C: HttpClient>(
    api: &GameTrackerApi<C>,
    game_id: &str,
    add: bool,
) -> ApiResult<bool> {
    let result = if add {
        api.add_to_library(game_id).await
    } else {
        api.remove_from_library(game_id).await
    };
    result.map_err(|e| e.in_op_with("catalog.set_in_library", game_id))?;
    Ok(add)
}

/// Validates then creates. The caller reloads the catalog afterwards.
pub async fn create_game<C: HttpClient>(
    api: &GameTrackerApi<C>,
    draft: &GameDraft,
) -> ApiResult<()> {
    let game = draft.validate().map_err(|e| e.in_op("catalog.create"))?;
    api.create_game(&game)
        .await
        .map_err(|e| e.in_op("catalog.create"))
}

pub async fn save_edit<C: HttpClient>(
    api: &GameTrackerApi<C>,
    id: &str,
    edit: &GameEdit,
) -> ApiResult<Game> {
    let changes = edit.validate().map_err(|e| e.in_op("catalog.edit"))?;
    api.update_game(id, changes)
        .await
        .map_err(|e| e.in_op_with("catalog.edit", id))
}

pub async fn delete_game<C: HttpClient>(
    api: &GameTrackerApi<C>,
    confirmed: Confirmed,
) -> ApiResult<String> {
    api.delete_game(confirmed.id())
        .await
        .map_err(|e| e.in_op_with("catalog.delete", confirmed.id()))?;
    Ok(confirmed.id().to_string())
}

#[cfg(test)]
mod tests {
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

    fn draft() -> GameDraft {
        GameDraft {
            title: "Hades".into(),
            genre: Some(Genre::Action),
            platform: Some(Platform::Pc),
            release_year: "2020".into(),
            developer: "Supergiant".into(),
            cover_url: "https://img.test/hades.png".into(),
            description: "Roguelike".into(),
            completed: false,
        }
    }

    fn game(id: &str, genre: Genre, platform: Platform) -> Game {
        Game {
            id: id.into(),
            title: format!("Game {}", id),
            genre: Some(genre),
            platform: Some(platform),
            ..Default::default()
        }
    }

    #[test]
    fn filter_by_genre_and_platform() {
        let mut state = CatalogState::default();
        state.replace(vec![
            game("1", Genre::Rpg, Platform::Pc),
            game("2", Genre::Rpg, Platform::Xbox),
            game("3", Genre::Puzzle, Platform::Pc),
        ]);

        let filter = CatalogFilter {
            query: String::new(),
            genre: Choice::parse("rpg"),
            platform: Choice::parse("PC"),
        };
        let visible = state.visible(&filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn draft_requires_every_field() {
        assert!(draft().validate().is_ok());

        let mut missing = draft();
        missing.platform = None;
        assert_eq!(missing.validate().unwrap_err().kind(), ApiErrorKind::Validation);

        let mut blank = draft();
        blank.description = "  ".into();
        assert!(blank.validate().is_err());

        let mut bad_year = draft();
        bad_year.release_year = "20x0".into();
        assert!(bad_year.validate().is_err());

        let mut old_year = draft();
        old_year.release_year = "1889".into();
        assert_eq!(old_year.validate().unwrap().release_year, 1889);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_backend() {
        let api = api();
        let result = create_game(&api, &GameDraft::default()).await;
        assert!(result.is_err());
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn create_posts_wire_names() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Post,
            &format!("{}/juegos", BASE),
            201,
            json!({ "_id": "new" }),
        );

        create_game(&api, &draft()).await.unwrap();

        let req = api.client().last_request().unwrap();
        let body: serde_json::Value = serde_json::from_str(req.json_body().unwrap()).unwrap();
        assert_eq!(body["titulo"], "Hades");
        assert_eq!(body["añoLanzamiento"], 2020);
        assert_eq!(body["plataforma"], "PC");
        assert_eq!(body["genero"], "Acción");
    }

    #[tokio::test]
    async fn missing_game_is_reported_not_emptied() {
        let api = api();

        let err = load_game(&api, "gone").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.spans().iter().any(|s| s.operation == "catalog.load_game"));
        let req = api.client().last_request().unwrap();
        assert_eq!(req.url, format!("{}/juegos/gone", BASE));
    }

    #[tokio::test]
    async fn membership_follows_user_library() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Get,
            &format!("{}/biblioteca/u1", BASE),
            200,
            json!({ "juegos": [{ "_id": "1" }, { "_id": "3" }] }),
        );
        api.client().mock_response(
            HttpMethod::Post,
            &format!("{}/juegos/agregar-a-biblioteca/2", BASE),
            200,
            json!({}),
        );

        let mut state = CatalogState::default();
        state.set_owned(load_owned_ids(&api, "u1").await.unwrap());
        assert!(state.is_owned("1"));
        assert!(!state.is_owned("2"));

        let owned = set_in_library(&api, "2", true).await.unwrap();
        state.mark_owned("2", owned);
        assert!(state.is_owned("2"));
    }

    #[tokio::test]
    async fn edit_replaces_the_card() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Put,
            &format!("{}/juegos/1", BASE),
            200,
            json!({ "_id": "1", "titulo": "Renamed" }),
        );
        let mut state = CatalogState::default();
        state.replace(vec![
            game("1", Genre::Rpg, Platform::Pc),
            game("2", Genre::Rpg, Platform::Pc),
        ]);

        let mut edit = GameEdit::from_game(&state.games()[0]);
        edit.title = "Renamed".into();
        let updated = save_edit(&api, "1", &edit).await.unwrap();
        state.apply_edit(updated);

        assert_eq!(state.games()[0].title, "Renamed");
        assert_eq!(state.games()[1].title, "Game 2");
    }

    #[tokio::test]
    async fn delete_after_confirmation() {
        let api = api();
        api.client().mock_text(HttpMethod::Delete, &format!("{}/juegos/2", BASE), 204, "");
        let mut state = CatalogState::default();
        state.replace(vec![
            game("1", Genre::Rpg, Platform::Pc),
            game("2", Genre::Rpg, Platform::Pc),
        ]);

        assert!(state.request_deletion("2"));
        let confirmed = state.confirm_deletion().unwrap();
        let id = delete_game(&api, confirmed).await.unwrap();
        state.apply_deletion(&id);

        assert_eq!(state.games().len(), 1);
    }
}
