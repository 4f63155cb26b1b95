use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// Error kinds
// =========================================================

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// The request never produced a response.
    Network,
    /// 401: missing or expired session.
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// Rejected on the client before any request was made.
    Validation,
    /// Any other 4xx answer.
    Rejected,
    /// 5xx
    Server,
    /// A 2xx answer whose body could not be understood.
    Decode,
    /// Browser storage refused a write.
    Storage,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            400..=499 => ApiErrorKind::Rejected,
            _ => ApiErrorKind::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ApiErrorKind::Validation => "INVALID_INPUT",
            ApiErrorKind::Rejected => "REQUEST_REJECTED",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Decode => "JSON_PARSE_ERROR",
            ApiErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// Context tracing
// =========================================================

/// One step of the operation trace attached to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// Operation name, e.g. `"library.toggle"` or `"api.update_game"`.
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// Core error type
// =========================================================

#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    /// HTTP status when the error came from a response.
    status: Option<u16>,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    /// Builds the error for a non-2xx response, pulling the backend's own
    /// message out of the body when there is one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        let mut err = Self::new(ApiErrorKind::from_status(status), message);
        err.status = Some(status);
        err
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Storage, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

/// Extracts a human message from an error body: a JSON object with
/// `message`, `mensaje`, `msg` or `error`, else short plain text.
fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        return ["message", "mensaje", "msg", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
    }
    if trimmed.starts_with('<') || trimmed.len() > 200 {
        return None;
    }
    Some(trimmed.to_string())
}

// =========================================================
// Display & Error impls
// =========================================================

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_kind() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::Rejected);
        assert_eq!(ApiErrorKind::from_status(503), ApiErrorKind::Server);
    }

    #[test]
    fn backend_message_is_extracted() {
        let err = ApiError::from_response(400, r#"{"mensaje":"El juego ya existe"}"#);
        assert_eq!(err.message(), "El juego ya existe");
        assert_eq!(err.status(), Some(400));

        let err = ApiError::from_response(500, "<html>boom</html>");
        assert_eq!(err.message(), "request failed with status 500");

        let err = ApiError::from_response(401, "Token inválido");
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Token inválido");
    }

    #[test]
    fn display_includes_trace() {
        let err = ApiError::network("offline")
            .in_op_with("api.send", "GET /juegos")
            .in_op("library.load");
        assert_eq!(
            err.to_string(),
            "[NETWORK_ERROR] offline | trace: api.send(GET /juegos) -> library.load"
        );
    }
}
