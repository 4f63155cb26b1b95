use gametracker_shared::{Credentials, NewUser};

use crate::api::GameTrackerApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::session::{KeyValueStore, Session, SessionStore};

fn validate_credentials(credentials: &Credentials) -> ApiResult<()> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::validation("Introduce tu email y contraseña"));
    }
    Ok(())
}

fn validate_registration(user: &NewUser) -> ApiResult<()> {
    if user.name.trim().is_empty() || user.email.trim().is_empty() || user.password.is_empty() {
        return Err(ApiError::validation("Por favor completa todos los campos"));
    }
    if !user.email.contains('@') {
        return Err(ApiError::validation("El email no es válido"));
    }
    Ok(())
}

/// Exchanges credentials for a token and stores the new session.
pub async fn login<C, S>(
    api: &GameTrackerApi<C>,
    store: &SessionStore<S>,
    credentials: &Credentials,
) -> ApiResult<Session>
where
    C: HttpClient,
    S: KeyValueStore,
{
    validate_credentials(credentials).map_err(|e| e.in_op("auth.login"))?;
    let credentials = Credentials {
        email: credentials.email.trim().to_string(),
        password: credentials.password.clone(),
    };
    let auth = api
        .login(&credentials)
        .await
        .map_err(|e| e.in_op("auth.login"))?;
    store.set_session(&auth.user, &auth.token)
}

/// Creates an account. The user still has to log in afterwards.
pub async fn register<C: HttpClient>(api: &GameTrackerApi<C>, user: &NewUser) -> ApiResult<()> {
    validate_registration(user).map_err(|e| e.in_op("auth.register"))?;
    let user = NewUser {
        name: user.name.trim().to_string(),
        email: user.email.trim().to_string(),
        password: user.password.clone(),
    };
    api.register(&user)
        .await
        .map_err(|e| e.in_op("auth.register"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiErrorKind;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::session::MemoryStorage;
    use serde_json::json;

    fn api() -> GameTrackerApi<MockHttpClient> {
        GameTrackerApi::new(
            MockHttpClient::new(),
            &ClientConfig::new("http://api.test/api", "http://api.test"),
        )
    }

    #[tokio::test]
    async fn login_stores_session() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/login",
            200,
            json!({ "token": "t1", "usuario": { "id": "u1", "nombre": "Ana" } }),
        );
        let store = SessionStore::new(MemoryStorage::new());

        let session = login(
            &api,
            &store,
            &Credentials {
                email: " ana@test ".into(),
                password: "pw".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(session.user.id, "u1");
        assert_eq!(store.get_session(), Some(session));
        let body = api.client().last_request().unwrap();
        assert!(body.json_body().unwrap().contains("\"ana@test\""));
    }

    #[tokio::test]
    async fn bad_credentials_leave_no_session() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/login",
            400,
            json!({ "mensaje": "Credenciales incorrectas" }),
        );
        let store = SessionStore::new(MemoryStorage::new());

        let err = login(
            &api,
            &store,
            &Credentials {
                email: "ana@test".into(),
                password: "nope".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.message(), "Credenciales incorrectas");
        assert!(store.get_session().is_none());
    }

    #[tokio::test]
    async fn empty_login_form_is_rejected_locally() {
        let api = api();
        let store = SessionStore::new(MemoryStorage::new());

        let err = login(&api, &store, &Credentials::default()).await.unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn register_validates_email() {
        let api = api();
        let err = register(
            &api,
            &NewUser {
                name: "Ana".into(),
                email: "not-an-email".into(),
                password: "pw".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn register_posts_new_user() {
        let api = api();
        api.client().mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/register",
            201,
            json!({ "mensaje": "Usuario registrado" }),
        );

        register(
            &api,
            &NewUser {
                name: "Ana".into(),
                email: "ana@test".into(),
                password: "pw".into(),
            },
        )
        .await
        .unwrap();

        let req = api.client().last_request().unwrap();
        assert!(req.json_body().unwrap().contains("\"nombre\":\"Ana\""));
    }
}
