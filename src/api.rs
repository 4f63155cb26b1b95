use gametracker_shared::protocol::{
    AddToLibrary, DeleteGame, DeleteReview, Endpoint, GetGame, GetProfile, ListGames,
    ListReviews, MyLibrary, PROFILE_PATH, RemoveFromLibrary, UpdateGame, UpdateReview,
    UserLibrary,
};
use gametracker_shared::{
    AuthResponse, Credentials, Game, GameUpdate, LibraryEntry, NewGame, NewReview, NewUser,
    Review, ReviewUpdate, User,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm};


/// Typed client for the GameTracker REST backend.
///
/// Holds the bearer token of the current session, if any. Endpoints that
/// require auth fail with `Unauthorized` before touching the network when
/// no token is set.
#[derive(Clone)]
pub struct GameTrackerApi<C> {
    client: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> GameTrackerApi<C> {
    pub fn new(client: C, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorize(&self, req: HttpRequest, required: bool, op: &str) -> ApiResult<HttpRequest> {
        match &self.token {
            Some(token) => Ok(req.with_header("Authorization", &format!("Bearer {}", token))),
            None if required => {
                Err(ApiError::unauthorized("no active session").in_op(format!("api.{}", op)))
            }
            None => Ok(req),
        }
    }

    /// Sends a request and turns non-2xx answers into errors.
    async fn execute(&self, req: HttpRequest, op: &str) -> ApiResult<HttpResponse> {
        let method = req.method.as_str();
        let url = req.url.clone();
        log::debug!("{} {}", method, url);

        let resp = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op_with(format!("api.{}", op), format!("{} {}", method, url)))?;

        if !resp.is_success() {
            log::warn!("{} {} answered {}", method, url, resp.status);
            return Err(ApiError::from_response(resp.status, &resp.body)
                .in_op_with(format!("api.{}", op), format!("{} {}", method, url)));
        }
        Ok(resp)
    }

    /// Sends any typed endpoint and decodes its response.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> ApiResult<E::Response> {
        let mut req = HttpRequest::new(&self.url(&endpoint.path()), E::METHOD);
        if E::SENDS_BODY {
            let body = serde_json::to_string(endpoint).map_err(|e| {
                ApiError::decode(format!("cannot encode request: {}", e))
                    .with_source(e)
                    .in_op(format!("api.{}", E::NAME))
            })?;
            req = req.with_json(body);
        }
        let req = self.authorize(req, E::REQUIRES_AUTH, E::NAME)?;
        let resp = self.execute(req, E::NAME).await?;
        resp.json::<E::Response>()
            .map_err(|e| e.in_op(format!("api.{}", E::NAME)))
    }

    // =========================================================
    // Auth
    // =========================================================

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.send(credentials).await
    }

    pub async fn register(&self, user: &NewUser) -> ApiResult<()> {
        self.send(user).await.map(|_| ())
    }

    // =========================================================
    // Games
    // =========================================================

    pub async fn list_games(&self) -> ApiResult<Vec<Game>> {
        self.send(&ListGames).await
    }

    pub async fn get_game(&self, id: &str) -> ApiResult<Game> {
        self.send(&GetGame { id: id.to_string() }).await
    }

    pub async fn create_game(&self, game: &NewGame) -> ApiResult<()> {
        self.send(game).await.map(|_| ())
    }

    /// Returns the game as stored after the update.
    pub async fn update_game(&self, id: &str, changes: GameUpdate) -> ApiResult<Game> {
        self.send(&UpdateGame {
            id: id.to_string(),
            changes,
        })
        .await
    }

    pub async fn delete_game(&self, id: &str) -> ApiResult<()> {
        self.send(&DeleteGame { id: id.to_string() })
            .await
            .map(|_| ())
    }

    // =========================================================
    // Library
    // =========================================================

    pub async fn my_library(&self) -> ApiResult<Vec<LibraryEntry>> {
        self.send(&MyLibrary).await.map(|p| p.into_entries())
    }

    pub async fn user_library(&self, user_id: &str) -> ApiResult<Vec<LibraryEntry>> {
        self.send(&UserLibrary {
            user_id: user_id.to_string(),
        })
        .await
        .map(|p| p.into_entries())
    }

    pub async fn add_to_library(&self, game_id: &str) -> ApiResult<()> {
        self.send(&AddToLibrary {
            game_id: game_id.to_string(),
        })
        .await
        .map(|_| ())
    }

    pub async fn remove_from_library(&self, game_id: &str) -> ApiResult<()> {
        self.send(&RemoveFromLibrary {
            game_id: game_id.to_string(),
        })
        .await
        .map(|_| ())
    }

    // =========================================================
    // Reviews
    // =========================================================

    pub async fn list_reviews(&self) -> ApiResult<Vec<Review>> {
        self.send(&ListReviews).await.map(|p| p.into_reviews())
    }

    pub async fn create_review(&self, review: &NewReview) -> ApiResult<()> {
        self.send(review).await.map(|_| ())
    }

    pub async fn update_review(&self, id: &str, changes: ReviewUpdate) -> ApiResult<()> {
        self.send(&UpdateReview {
            id: id.to_string(),
            changes,
        })
        .await
        .map(|_| ())
    }

    pub async fn delete_review(&self, id: &str) -> ApiResult<()> {
        self.send(&DeleteReview { id: id.to_string() })
            .await
            .map(|_| ())
    }

    // =========================================================
    // Profile
    // =========================================================

    pub async fn get_profile(&self) -> ApiResult<User> {
        self.send(&GetProfile).await.map(|p| p.into_user())
    }

    /// `PUT /usuarios/perfil` as multipart, the only non-JSON request.
    pub async fn update_profile(&self, form: MultipartForm) -> ApiResult<()> {
        let req = HttpRequest::new(&self.url(PROFILE_PATH), HttpMethod::Put).with_multipart(form);
        let req = self.authorize(req, true, "update_profile")?;
        self.execute(req, "update_profile").await.map(|_| ())
    }
}
