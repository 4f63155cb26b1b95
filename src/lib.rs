//! GameTracker client core.
//!
//! Everything here is independent of the browser: the HTTP transport and the
//! key-value storage are traits, so views, reducers and API calls run in
//! native unit tests. The WASM frontend supplies `fetch` and `localStorage`
//! implementations.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod filter;
pub mod library;
pub mod notice;
pub mod profile;
pub mod request;
pub mod reviews;
pub mod session;
pub mod stats;

pub use api::GameTrackerApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use notice::{Notice, NoticeLevel};
pub use request::HttpClient;
pub use session::{KeyValueStore, Session, SessionStore};

pub use gametracker_shared as model;
