use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;
pub mod serde_helper;

use serde_helper::{
    blank_as_none, lenient_datetime, lenient_f64, lenient_stars, lenient_u32, null_as_empty,
    null_as_false,
};

// =========================================================
// Constants
// =========================================================

/// Upper bound for every star rating in the app.
pub const MAX_RATING: u8 = 5;

pub const UNKNOWN_PLATFORM: &str = "Desconocida";
pub const UNKNOWN_GENRE: &str = "Desconocido";
pub const ANONYMOUS_AUTHOR: &str = "Anónimo";

// =========================================================
// Catalog vocabularies
// =========================================================

/// Declares a wire enum that round-trips through its display label.
///
/// Matching is case-insensitive and accepts extra spellings per variant;
/// anything unrecognised is preserved in `Other` so no record is lost.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Known values in display order.
            pub fn known() -> Vec<$name> {
                vec![$($name::$variant),+]
            }

            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw,
                }
            }

            pub fn parse(raw: &str) -> Self {
                let trimmed = raw.trim();
                let key = trimmed.to_lowercase();
                $(
                    if key == $label.to_lowercase() $(|| key == $alias)* {
                        return $name::$variant;
                    }
                )+
                $name::Other(trimmed.to_string())
            }

            /// Case-insensitive comparison that also covers `Other` values.
            pub fn matches(&self, other: &$name) -> bool {
                self == other || self.label().to_lowercase() == other.label().to_lowercase()
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::parse(&raw)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

wire_enum! {
    Platform {
        Pc => "PC",
        PlayStation => "PlayStation" | "ps" | "ps4" | "ps5",
        Xbox => "Xbox",
        Nintendo => "Nintendo" | "switch" | "nintendo switch",
        Mobile => "Móvil" | "movil" | "mobile",
    }
}

wire_enum! {
    Genre {
        Action => "Acción" | "accion" | "action",
        Adventure => "Aventura" | "adventure",
        Rpg => "RPG",
        Strategy => "Estrategia" | "strategy",
        Simulation => "Simulación" | "simulacion" | "simulation",
        Sports => "Deportes" | "sports",
        Racing => "Carreras" | "racing",
        Shooter => "Shooter",
        Puzzle => "Puzzle",
        Horror => "Terror" | "horror",
        Platformer => "Plataformas" | "platformer",
    }
}

wire_enum! {
    /// Perceived difficulty reported in a review.
    Difficulty {
        Easy => "Fácil" | "facil" | "easy",
        Normal => "Normal",
        Hard => "Difícil" | "dificil" | "hard",
    }
}

// =========================================================
// Domain models
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Path relative to the backend origin, e.g. `/uploads/a.png`.
    #[serde(
        rename = "fotoPerfil",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(
        rename = "descripcion",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<String>,
}

impl User {
    /// Name shown in the UI, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(rename = "titulo", default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(
        rename = "descripcion",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "imagenPortada",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_url: Option<String>,
    #[serde(
        rename = "desarrollador",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub developer: Option<String>,
    #[serde(
        rename = "añoLanzamiento",
        default,
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_year: Option<u32>,
    #[serde(
        rename = "plataforma",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub platform: Option<Platform>,
    #[serde(
        rename = "genero",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<Genre>,
    #[serde(rename = "completado", default, deserialize_with = "null_as_false")]
    pub completed: bool,
    /// Per-user library rating, 0 to 5.
    #[serde(
        rename = "calificacion",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    /// Catalog score used for the star strip on cards.
    #[serde(
        rename = "puntuacion",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "fechaCreacion",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub added_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Library rating rounded into whole stars.
    pub fn rating_stars(&self) -> u8 {
        Self::stars(self.rating)
    }

    /// Catalog score rounded into whole stars.
    pub fn score_stars(&self) -> u8 {
        Self::stars(self.score.or(self.rating))
    }

    fn stars(value: Option<f64>) -> u8 {
        value
            .filter(|v| v.is_finite())
            .map(|v| v.round().clamp(0.0, MAX_RATING as f64) as u8)
            .unwrap_or(0)
    }

    pub fn platform_label(&self) -> &str {
        self.platform.as_ref().map_or(UNKNOWN_PLATFORM, Platform::label)
    }

    pub fn genre_label(&self) -> &str {
        self.genre.as_ref().map_or(UNKNOWN_GENRE, Genre::label)
    }
}

/// A game as listed in a user's library.
///
/// The backend returns the game record itself with the per-user `completado`
/// and `calificacion` fields filled in, so no separate shape is needed.
pub type LibraryEntry = Game;

/// A reference the backend either populates or leaves as a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Populated(T),
    Id(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(rename = "juego", default, skip_serializing_if = "Option::is_none")]
    pub game: Option<Reference<Game>>,
    #[serde(
        rename = "juegoId",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub game_id: Option<String>,
    #[serde(
        rename = "juegoTitulo",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub game_title: Option<String>,
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference<User>>,
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Reference<User>>,
    #[serde(
        rename = "usuarioId",
        alias = "userId",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<String>,
    #[serde(rename = "textoReseña", default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(rename = "puntuacion", default, deserialize_with = "lenient_stars")]
    pub rating: u8,
    #[serde(
        rename = "horasJugadas",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_played: Option<f64>,
    #[serde(
        rename = "dificultad",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "recomendaria", default, deserialize_with = "null_as_false")]
    pub recommends: bool,
    #[serde(
        rename = "fechaCreacion",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "fechaActualizacion",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    fn populated_game(&self) -> Option<&Game> {
        match &self.game {
            Some(Reference::Populated(game)) => Some(game),
            _ => None,
        }
    }

    fn populated_author(&self) -> Option<&User> {
        [&self.author, &self.user]
            .into_iter()
            .find_map(|reference| match reference {
                Some(Reference::Populated(user)) => Some(user),
                _ => None,
            })
    }

    pub fn game_ref_id(&self) -> Option<&str> {
        match &self.game {
            Some(Reference::Populated(game)) if !game.id.is_empty() => Some(game.id.as_str()),
            Some(Reference::Id(id)) if !id.is_empty() => Some(id.as_str()),
            _ => self.game_id.as_deref(),
        }
    }

    pub fn game_title(&self) -> Option<&str> {
        self.populated_game()
            .map(|game| game.title.as_str())
            .filter(|title| !title.is_empty())
            .or(self.game_title.as_deref())
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.populated_game().and_then(|game| game.cover_url.as_deref())
    }

    pub fn author_ref_id(&self) -> Option<&str> {
        if let Some(user) = self.populated_author().filter(|u| !u.id.is_empty()) {
            return Some(user.id.as_str());
        }
        [&self.author, &self.user]
            .into_iter()
            .find_map(|reference| match reference {
                Some(Reference::Id(id)) if !id.is_empty() => Some(id.as_str()),
                _ => None,
            })
            .or(self.author_id.as_deref())
    }

    pub fn author_name(&self) -> &str {
        self.populated_author()
            .map(User::display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
    }

    /// Creation time from whichever timestamp field the backend filled.
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created.or(self.created_at)
    }

    pub fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.updated.or(self.updated_at)
    }
}

// =========================================================
// Request / response payloads
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "usuario", alias = "user")]
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "genero")]
    pub genre: Genre,
    #[serde(rename = "plataforma")]
    pub platform: Platform,
    #[serde(rename = "añoLanzamiento")]
    pub release_year: u32,
    #[serde(rename = "desarrollador")]
    pub developer: String,
    #[serde(rename = "imagenPortada")]
    pub cover_url: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "completado")]
    pub completed: bool,
}

/// Partial game update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameUpdate {
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "desarrollador", skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(rename = "imagenPortada", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(rename = "completado", skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "calificacion", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl GameUpdate {
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn rating(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(rename = "textoReseña")]
    pub body: String,
    #[serde(rename = "puntuacion")]
    pub rating: u8,
    #[serde(rename = "horasJugadas")]
    pub hours_played: f64,
    #[serde(rename = "dificultad")]
    pub difficulty: Difficulty,
    #[serde(rename = "recomendaria")]
    pub recommends: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    #[serde(rename = "juegoId")]
    pub game_id: String,
    #[serde(flatten)]
    pub content: ReviewUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_decodes_loose_backend_record() {
        let game: Game = serde_json::from_value(json!({
            "_id": "g1",
            "titulo": "Hades",
            "añoLanzamiento": "2020",
            "plataforma": "pc",
            "genero": "",
            "completado": null,
            "calificacion": "4"
        }))
        .unwrap();

        assert_eq!(game.id, "g1");
        assert_eq!(game.release_year, Some(2020));
        assert_eq!(game.platform, Some(Platform::Pc));
        assert_eq!(game.genre, None);
        assert!(!game.completed);
        assert_eq!(game.rating, Some(4.0));
        assert_eq!(game.genre_label(), UNKNOWN_GENRE);
    }

    #[test]
    fn unknown_vocabulary_is_preserved() {
        let game: Game = serde_json::from_value(json!({ "plataforma": "Stadia" })).unwrap();
        assert_eq!(game.platform, Some(Platform::Other("Stadia".into())));

        let back = serde_json::to_value(&game).unwrap();
        assert_eq!(back["plataforma"], "Stadia");
    }

    #[test]
    fn genre_parse_ignores_case_and_accents() {
        assert_eq!(Genre::parse("ACCIÓN"), Genre::Action);
        assert_eq!(Genre::parse("accion"), Genre::Action);
        assert_eq!(Genre::parse(" rpg "), Genre::Rpg);
        assert!(Genre::Other("Roguelike".into()).matches(&Genre::parse("roguelike")));
        assert_eq!(Genre::known().len(), 11);
    }

    #[test]
    fn user_accepts_either_id_key() {
        let a: User = serde_json::from_value(json!({ "_id": "u1", "nombre": "Ana" })).unwrap();
        let b: User = serde_json::from_value(json!({ "id": "u1", "nombre": "Ana" })).unwrap();
        assert_eq!(a, b);

        let stored = serde_json::to_value(&a).unwrap();
        assert_eq!(stored, json!({ "_id": "u1", "nombre": "Ana", "email": "" }));
    }

    #[test]
    fn review_with_populated_refs() {
        let review: Review = serde_json::from_value(json!({
            "_id": "r1",
            "juego": { "_id": "g1", "titulo": "Celeste", "imagenPortada": "c.png" },
            "usuario": { "_id": "u1", "nombre": "Ana" },
            "textoReseña": "Great",
            "puntuacion": 5,
            "horasJugadas": "12",
            "dificultad": "Difícil",
            "recomendaria": true,
            "createdAt": "2024-01-02T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(review.game_ref_id(), Some("g1"));
        assert_eq!(review.game_title(), Some("Celeste"));
        assert_eq!(review.cover_url(), Some("c.png"));
        assert_eq!(review.author_ref_id(), Some("u1"));
        assert_eq!(review.author_name(), "Ana");
        assert_eq!(review.hours_played, Some(12.0));
        assert_eq!(review.difficulty, Some(Difficulty::Hard));
        assert!(review.created_on().is_some());
    }

    #[test]
    fn explicit_nulls_in_text_fields_do_not_fail_the_record() {
        let game: Game = serde_json::from_value(json!({ "_id": null, "titulo": null })).unwrap();
        assert_eq!(game.id, "");
        assert_eq!(game.title, "");

        let user: User =
            serde_json::from_value(json!({ "_id": "u1", "nombre": null, "email": null })).unwrap();
        assert_eq!(user.name, "");

        let reviews: Vec<Review> = serde_json::from_value(json!([
            { "_id": "r1", "textoReseña": null, "puntuacion": 4 },
            { "_id": "r2", "textoReseña": "Ok" }
        ]))
        .unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].body, "");
    }

    #[test]
    fn review_with_bare_ids() {
        let review: Review = serde_json::from_value(json!({
            "_id": "r2",
            "juego": "g9",
            "autor": "u7",
            "textoReseña": "Meh"
        }))
        .unwrap();

        assert_eq!(review.game_ref_id(), Some("g9"));
        assert_eq!(review.game_title(), None);
        assert_eq!(review.author_ref_id(), Some("u7"));
        assert_eq!(review.author_name(), ANONYMOUS_AUTHOR);
        assert_eq!(review.rating, 0);
    }

    #[test]
    fn partial_update_skips_unset_fields() {
        let body = serde_json::to_value(GameUpdate::completion(true)).unwrap();
        assert_eq!(body, json!({ "completado": true }));
    }

    #[test]
    fn new_review_flattens_content() {
        let review = NewReview {
            game_id: "g1".into(),
            content: ReviewUpdate {
                body: "Fun".into(),
                rating: 4,
                hours_played: 10.0,
                difficulty: Difficulty::Normal,
                recommends: true,
            },
        };
        let body = serde_json::to_value(&review).unwrap();
        assert_eq!(body["juegoId"], "g1");
        assert_eq!(body["textoReseña"], "Fun");
        assert_eq!(body["dificultad"], "Normal");
    }
}
