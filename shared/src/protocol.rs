use crate::{
    AuthResponse, Credentials, Game, GameUpdate, LibraryEntry, NewGame, NewReview, NewUser,
    Review, ReviewUpdate, User,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned, de::IgnoredAny};

/// HTTP methods used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request/response contract of a backend endpoint.
///
/// The implementing type is itself the JSON body when `SENDS_BODY` is set;
/// path parameters are `#[serde(skip)]` fields.
pub trait Endpoint: Serialize {
    /// Decoded success body. Empty bodies are decoded as `null`.
    type Response: DeserializeOwned;
    const METHOD: HttpMethod;
    /// Short name used in logs and error traces.
    const NAME: &'static str;
    const REQUIRES_AUTH: bool = true;
    const SENDS_BODY: bool = false;

    /// Path relative to the API base, starting with `/`.
    fn path(&self) -> String;
}

// =========================================================
// Response envelopes
// =========================================================

/// The library endpoints have answered with three different shapes over time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LibraryPayload {
    Entries(Vec<LibraryEntry>),
    Library { biblioteca: Vec<LibraryEntry> },
    Games { juegos: Vec<LibraryEntry> },
}

impl LibraryPayload {
    pub fn into_entries(self) -> Vec<LibraryEntry> {
        match self {
            LibraryPayload::Entries(entries)
            | LibraryPayload::Library { biblioteca: entries }
            | LibraryPayload::Games { juegos: entries } => entries,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReviewsPayload {
    Reviews(Vec<Review>),
    Wrapped { resenas: Vec<Review> },
}

impl ReviewsPayload {
    pub fn into_reviews(self) -> Vec<Review> {
        match self {
            ReviewsPayload::Reviews(reviews) | ReviewsPayload::Wrapped { resenas: reviews } => {
                reviews
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfilePayload {
    Wrapped {
        #[serde(alias = "user")]
        usuario: User,
    },
    Bare(User),
}

impl ProfilePayload {
    pub fn into_user(self) -> User {
        match self {
            ProfilePayload::Wrapped { usuario } | ProfilePayload::Bare(usuario) => usuario,
        }
    }
}

// =========================================================
// Auth
// =========================================================

impl Endpoint for Credentials {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const NAME: &'static str = "login";
    const REQUIRES_AUTH: bool = false;
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/auth/login".into()
    }
}

impl Endpoint for NewUser {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const NAME: &'static str = "register";
    const REQUIRES_AUTH: bool = false;
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/auth/register".into()
    }
}

// =========================================================
// Games
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListGames;

impl Endpoint for ListGames {
    type Response = Vec<Game>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const NAME: &'static str = "list_games";
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/juegos".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetGame {
    #[serde(skip)]
    pub id: String,
}

impl Endpoint for GetGame {
    type Response = Game;
    const METHOD: HttpMethod = HttpMethod::Get;
    const NAME: &'static str = "get_game";
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        format!("/juegos/{}", self.id)
    }
}

impl Endpoint for NewGame {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const NAME: &'static str = "create_game";
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/juegos".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateGame {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub changes: GameUpdate,
}

impl Endpoint for UpdateGame {
    type Response = Game;
    const METHOD: HttpMethod = HttpMethod::Put;
    const NAME: &'static str = "update_game";
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        format!("/juegos/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteGame {
    #[serde(skip)]
    pub id: String,
}

impl Endpoint for DeleteGame {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const NAME: &'static str = "delete_game";

    fn path(&self) -> String {
        format!("/juegos/{}", self.id)
    }
}

// =========================================================
// Library
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct MyLibrary;

impl Endpoint for MyLibrary {
    type Response = LibraryPayload;
    const METHOD: HttpMethod = HttpMethod::Get;
    const NAME: &'static str = "my_library";

    fn path(&self) -> String {
        "/juegos/mi-biblioteca".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserLibrary {
    #[serde(skip)]
    pub user_id: String,
}

impl Endpoint for UserLibrary {
    type Response = LibraryPayload;
    const METHOD: HttpMethod = HttpMethod::Get;
    const NAME: &'static str = "user_library";

    fn path(&self) -> String {
        format!("/biblioteca/{}", self.user_id)
    }
}

/// Sends an empty object body, which the backend expects on these routes.
#[derive(Debug, Clone, Serialize)]
pub struct AddToLibrary {
    #[serde(skip)]
    pub game_id: String,
}

impl Endpoint for AddToLibrary {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const NAME: &'static str = "add_to_library";
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        format!("/juegos/agregar-a-biblioteca/{}", self.game_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveFromLibrary {
    #[serde(skip)]
    pub game_id: String,
}

impl Endpoint for RemoveFromLibrary {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const NAME: &'static str = "remove_from_library";
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        format!("/juegos/quitar-de-biblioteca/{}", self.game_id)
    }
}

// =========================================================
// Reviews
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListReviews;

impl Endpoint for ListReviews {
    type Response = ReviewsPayload;
    const METHOD: HttpMethod = HttpMethod::Get;
    const NAME: &'static str = "list_reviews";
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/resenas".into()
    }
}

impl Endpoint for NewReview {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const NAME: &'static str = "create_review";
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/resenas".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReview {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub changes: ReviewUpdate,
}

impl Endpoint for UpdateReview {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;
    const NAME: &'static str = "update_review";
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        format!("/resenas/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteReview {
    #[serde(skip)]
    pub id: String,
}

impl Endpoint for DeleteReview {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const NAME: &'static str = "delete_review";

    fn path(&self) -> String {
        format!("/resenas/{}", self.id)
    }
}

// =========================================================
// Profile
// =========================================================

/// `PUT /usuarios/perfil` is multipart and is built by the client directly.
pub const PROFILE_PATH: &str = "/usuarios/perfil";

#[derive(Debug, Clone, Serialize)]
pub struct GetProfile;

impl Endpoint for GetProfile {
    type Response = ProfilePayload;
    const METHOD: HttpMethod = HttpMethod::Get;
    const NAME: &'static str = "get_profile";

    fn path(&self) -> String {
        PROFILE_PATH.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn library(value: serde_json::Value) -> Vec<String> {
        serde_json::from_value::<LibraryPayload>(value)
            .unwrap()
            .into_entries()
            .into_iter()
            .map(|g| g.id)
            .collect()
    }

    #[test]
    fn library_shapes_normalize_to_the_same_list() {
        let games = json!([{ "_id": "a" }, { "_id": "b" }]);
        let expected = vec!["a".to_string(), "b".to_string()];

        assert_eq!(library(games.clone()), expected);
        assert_eq!(library(json!({ "biblioteca": games.clone() })), expected);
        assert_eq!(library(json!({ "juegos": games })), expected);
    }

    #[test]
    fn unexpected_library_shape_is_an_error() {
        assert!(serde_json::from_value::<LibraryPayload>(json!({ "data": [] })).is_err());
    }

    #[test]
    fn profile_prefers_wrapped_user() {
        let wrapped: ProfilePayload =
            serde_json::from_value(json!({ "usuario": { "_id": "u1", "nombre": "Ana" } })).unwrap();
        assert_eq!(wrapped.into_user().name, "Ana");

        let bare: ProfilePayload =
            serde_json::from_value(json!({ "_id": "u1", "nombre": "Ana" })).unwrap();
        assert_eq!(bare.into_user().id, "u1");
    }

    #[test]
    fn path_params_stay_out_of_the_body() {
        let update = UpdateGame {
            id: "g1".into(),
            changes: GameUpdate::rating(3.0),
        };
        assert_eq!(update.path(), "/juegos/g1");
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "calificacion": 3.0 }));

        let add = AddToLibrary { game_id: "g2".into() };
        assert_eq!(add.path(), "/juegos/agregar-a-biblioteca/g2");
        assert_eq!(serde_json::to_value(&add).unwrap(), json!({}));
    }

    #[test]
    fn review_list_accepts_wrapper() {
        let payload: ReviewsPayload =
            serde_json::from_value(json!({ "resenas": [{ "_id": "r1" }] })).unwrap();
        assert_eq!(payload.into_reviews().len(), 1);
    }
}
