//! Transient user-facing notifications.

use uuid::Uuid;

use crate::error::{ApiError, ApiErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Key for list rendering and dismissal.
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// User message for a failed operation. `fallback` names the operation,
    /// e.g. "Error al cargar tu biblioteca".
    pub fn from_error(err: &ApiError, fallback: &str) -> Self {
        match err.kind() {
            ApiErrorKind::Unauthorized => {
                Self::error("Tu sesión ha expirado. Inicia sesión de nuevo.")
            }
            ApiErrorKind::Network => Self::error("No se pudo conectar con el servidor"),
            ApiErrorKind::Forbidden => Self::error("No tienes permiso para realizar esta acción"),
            ApiErrorKind::Validation | ApiErrorKind::Rejected => Self::error(err.message()),
            _ => Self::error(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_shown_verbatim() {
        let notice = Notice::from_error(
            &ApiError::validation("Por favor completa todos los campos"),
            "Error al guardar",
        );
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Por favor completa todos los campos");
    }

    #[test]
    fn server_errors_use_the_fallback() {
        let err = ApiError::from_response(500, r#"{"message":"stack trace here"}"#);
        let notice = Notice::from_error(&err, "Error al cargar las reseñas");
        assert_eq!(notice.message, "Error al cargar las reseñas");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Notice::info("a").id, Notice::info("a").id);
    }
}
