//! Route table. Pure data, no DOM access.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Landing page with the login and register dialogs.
    #[default]
    Home,
    Explore,
    Library,
    /// Create or edit a review.
    ReviewEditor,
    Reviews,
    Statistics,
    Account,
    NotFound,
}

impl AppRoute {
    /// Paths are matched case-insensitively and ignore a trailing slash.
    pub fn from_path(path: &str) -> Self {
        let normalized = path.trim_end_matches('/').to_lowercase();
        match normalized.as_str() {
            "" | "/home" => Self::Home,
            "/explorar-juegos" => Self::Explore,
            "/biblioteca" => Self::Library,
            "/resenas" => Self::ReviewEditor,
            "/ver-resenas" => Self::Reviews,
            "/estadisticas" => Self::Statistics,
            "/cuenta" => Self::Account,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Explore => "/explorar-juegos",
            Self::Library => "/biblioteca",
            Self::ReviewEditor => "/resenas",
            Self::Reviews => "/ver-resenas",
            Self::Statistics => "/estadisticas",
            Self::Account => "/cuenta",
            Self::NotFound => "/404",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Library | Self::ReviewEditor | Self::Statistics | Self::Account
        )
    }

    /// Where guests land when they hit a protected route or the session ends.
    pub fn auth_failure_redirect() -> Self {
        Self::Home
    }

    /// Where a fresh login goes.
    pub fn auth_success_redirect() -> Self {
        Self::Library
    }

    /// Entries of the main navigation bar.
    pub fn nav_items() -> [(Self, &'static str); 5] {
        [
            (Self::Explore, "Explorar"),
            (Self::Library, "Biblioteca"),
            (Self::ReviewEditor, "Escribir reseña"),
            (Self::Reviews, "Reseñas"),
            (Self::Statistics, "Estadísticas"),
        ]
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Explore,
            AppRoute::Library,
            AppRoute::ReviewEditor,
            AppRoute::Reviews,
            AppRoute::Statistics,
            AppRoute::Account,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn paths_are_case_insensitive() {
        assert_eq!(AppRoute::from_path("/Explorar-juegos"), AppRoute::Explore);
        assert_eq!(AppRoute::from_path("/biblioteca/"), AppRoute::Library);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn guests_only_see_public_pages() {
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Explore.requires_auth());
        assert!(!AppRoute::Reviews.requires_auth());
        assert!(AppRoute::Library.requires_auth());
        assert!(AppRoute::Account.requires_auth());
    }
}
