// =========================================================
// Client configuration
// =========================================================

/// Used when `GAMETRACKER_API_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
/// Used when `GAMETRACKER_ASSET_URL` is not set at build time.
pub const DEFAULT_ASSET_ORIGIN: &str = "http://localhost:5000";

/// Where the backend lives.
///
/// The browser bundle has no process environment, so overrides are read at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Origin that serves uploaded files such as profile pictures.
    pub asset_origin: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, asset_origin: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            asset_origin: asset_origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("GAMETRACKER_API_URL").unwrap_or(DEFAULT_API_BASE_URL),
            option_env!("GAMETRACKER_ASSET_URL").unwrap_or(DEFAULT_ASSET_ORIGIN),
        )
    }

    /// Resolves a backend asset path. Absolute URLs pass through.
    pub fn asset_url(&self, path: &str) -> String {
        let path = path.trim();
        if ["http://", "https://", "data:", "blob:"]
            .iter()
            .any(|scheme| path.starts_with(scheme))
        {
            return path.to_string();
        }
        format!("{}/{}", self.asset_origin, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("http://api.test/api/", "http://api.test/");
        assert_eq!(config.api_base_url, "http://api.test/api");
        assert_eq!(config.asset_origin, "http://api.test");
    }

    #[test]
    fn asset_paths_resolve_against_origin() {
        let config = ClientConfig::new(DEFAULT_API_BASE_URL, DEFAULT_ASSET_ORIGIN);
        assert_eq!(
            config.asset_url("/uploads/me.png"),
            "http://localhost:5000/uploads/me.png"
        );
        assert_eq!(
            config.asset_url("uploads/me.png"),
            "http://localhost:5000/uploads/me.png"
        );
        assert_eq!(
            config.asset_url("https://cdn.test/me.png"),
            "https://cdn.test/me.png"
        );
    }
}
