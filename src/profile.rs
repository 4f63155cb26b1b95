use gametracker_shared::User;

use crate::api::GameTrackerApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{FilePart, HttpClient, MultipartForm};

/// Picture chosen in the account form, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub avatar: Option<AvatarUpload>,
}

impl ProfileDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            avatar: None,
        }
    }

    /// Multipart body for `PUT /usuarios/perfil`.
    pub fn to_form(&self) -> ApiResult<MultipartForm> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("El nombre no puede estar vacío"));
        }
        let mut form = MultipartForm::new()
            .text("nombre", name)
            .text("descripcion", self.bio.trim());
        if let Some(avatar) = &self.avatar {
            if !avatar.content_type.starts_with("image/") {
                return Err(ApiError::validation("La foto de perfil debe ser una imagen"));
            }
            form = form.file(FilePart {
                field: "fotoPerfil".into(),
                file_name: avatar.file_name.clone(),
                content_type: avatar.content_type.clone(),
                bytes: avatar.bytes.clone(),
            });
        }
        Ok(form)
    }
}

/// Absolute URL of the user's picture, if they have one.
pub fn avatar_url(config: &ClientConfig, user: &User) -> Option<String> {
    user.avatar
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| config.asset_url(path))
}

/// Initials used when there is no picture.
pub fn initials(user: &User) -> String {
    let initials: String = user
        .display_name()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

pub async fn load_profile<C: HttpClient>(api: &GameTrackerApi<C>) -> ApiResult<User> {
    api.get_profile().await.map_err(|e| e.in_op("profile.load"))
}

/// Uploads the changes, then re-reads the profile so the caller can refresh
/// the session user with what the backend actually stored.
pub async fn save_profile<C: HttpClient>(
    api: &GameTrackerApi<C>,
    draft: &ProfileDraft,
) -> ApiResult<User> {
    let form = draft.to_form().map_err(|e| e.in_op("profile.save"))?;
    api.update_profile(form)
        .await
        .map_err(|e| e.in_op("profile.save"))?;
    load_profile(api).await.map_err(|e| e.in_op("profile.save"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient, RequestBody};
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    fn api() -> GameTrackerApi<MockHttpClient> {
        GameTrackerApi::new(
            MockHttpClient::new(),
            &ClientConfig::new(BASE, "http://api.test"),
        )
        .with_token(Some("tok".into()))
    }

    #[test]
    fn avatar_paths_resolve_against_asset_origin() {
        let config = ClientConfig::new(BASE, "http://api.test");
        let mut user = User::default();
        assert_eq!(avatar_url(&config, &user), None);

        user.avatar = Some("/uploads/ana.png".into());
        assert_eq!(
            avatar_url(&config, &user).as_deref(),
            Some("http://api.test/uploads/ana.png")
        );
    }

    #[test]
    fn initials_from_name_or_email() {
        let mut user = User {
            name: "ana maría".into(),
            ..Default::default()
        };
        assert_eq!(initials(&user), "AM");

        user.name.clear();
        user.email = "luis@test".into();
        assert_eq!(initials(&user), "L");

        user.email.clear();
        assert_eq!(initials(&user), "?");
    }

    #[test]
    fn non_image_avatar_is_rejected() {
        let draft = ProfileDraft {
            name: "Ana".into(),
            bio: String::new(),
            avatar: Some(AvatarUpload {
                file_name: "cv.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![0],
            }),
        };
        assert!(draft.to_form().is_err());
    }

    #[tokio::test]
    async fn save_uploads_then_rereads() {
        let api = api();
        let url = format!("{}/usuarios/perfil", BASE);
        api.client()
            .mock_response(HttpMethod::Put, &url, 200, json!({ "mensaje": "ok" }));
        api.client().mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!({ "_id": "u1", "nombre": "Ana", "fotoPerfil": "/uploads/new.png" }),
        );

        let draft = ProfileDraft {
            name: " Ana ".into(),
            bio: "Jugadora".into(),
            avatar: Some(AvatarUpload {
                file_name: "new.png".into(),
                content_type: "image/png".into(),
                bytes: vec![137, 80],
            }),
        };
        let user = save_profile(&api, &draft).await.unwrap();

        assert_eq!(user.avatar.as_deref(), Some("/uploads/new.png"));
        let requests = api.client().requests.borrow();
        assert_eq!(requests.len(), 2);
        match &requests[0].body {
            Some(RequestBody::Multipart(form)) => {
                assert_eq!(form.field("nombre"), Some("Ana"));
                assert_eq!(form.field("descripcion"), Some("Jugadora"));
                assert_eq!(form.files.len(), 1);
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_name_is_rejected_locally() {
        let api = api();
        let draft = ProfileDraft::default();
        assert!(save_profile(&api, &draft).await.is_err());
        assert_eq!(api.client().request_count(), 0);
    }
}
