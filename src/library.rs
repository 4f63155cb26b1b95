//! "My library" view state.
//!
//! Async operations talk to the backend and return what changed; the pure
//! `apply_*` reducers fold that into [`LibraryState`]. A failed call never
//! touches the state.

use gametracker_shared::{GameUpdate, Genre, LibraryEntry, MAX_RATING};

use crate::api::GameTrackerApi;
use crate::collection::{self, Confirmed, PendingConfirmation};
use crate::error::ApiResult;
use crate::filter::{Choice, contains_ci};
use crate::request::HttpClient;
use crate::stats::LibraryStats;

#[cfg(test)]
mod tests;

// =========================================================
// Filtering
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryFilter {
    pub query: String,
    pub genre: Choice<Genre>,
}

impl LibraryFilter {
    pub fn matches(&self, entry: &LibraryEntry) -> bool {
        contains_ci(&entry.title, &self.query)
            && self.genre.allows(|wanted| {
                entry
                    .genre
                    .as_ref()
                    .is_some_and(|genre| genre.matches(wanted))
            })
    }

    pub fn apply<'a>(&'a self, entries: &'a [LibraryEntry]) -> impl Iterator<Item = &'a LibraryEntry> {
        entries.iter().filter(move |entry| self.matches(entry))
    }

    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || !self.genre.is_all()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// =========================================================
// State
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
    entries: Vec<LibraryEntry>,
    loading: bool,
    /// A mutation is in flight.
    busy: bool,
    removal: PendingConfirmation,
}

impl LibraryState {
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn replace(&mut self, entries: Vec<LibraryEntry>) {
        self.entries = entries;
        self.loading = false;
        self.removal.cancel();
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats::from_entries(&self.entries)
    }

    pub fn visible(&self, filter: &LibraryFilter) -> Vec<LibraryEntry> {
        filter.apply(&self.entries).cloned().collect()
    }

    pub fn apply_completion(&mut self, id: &str, completed: bool) -> bool {
        collection::patch_by_id(&mut self.entries, id, |entry| entry.completed = completed)
    }

    pub fn apply_rating(&mut self, id: &str, rating: Option<f64>) -> bool {
        collection::patch_by_id(&mut self.entries, id, |entry| entry.rating = rating)
    }

    pub fn apply_removal(&mut self, id: &str) -> bool {
        collection::remove_by_id(&mut self.entries, id)
    }

    // --- Removal confirmation ---

    /// Only entries currently listed can be queued for removal.
    pub fn request_removal(&mut self, id: &str) -> bool {
        if collection::find_by_id(&self.entries, id).is_none() {
            return false;
        }
        self.removal.request(id);
        true
    }

    pub fn pending_removal(&self) -> Option<&LibraryEntry> {
        self.removal
            .target()
            .and_then(|id| collection::find_by_id(&self.entries, id))
    }

    pub fn cancel_removal(&mut self) {
        self.removal.cancel();
    }

    pub fn confirm_removal(&mut self) -> Option<Confirmed> {
        self.removal.confirm()
    }
}

/// Clamps a rating into `0..=5`. Non-numbers become 0.
pub fn clamp_rating(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_RATING as f64)
}

// =========================================================
// Operations
// =========================================================

/// Fetches the library. A 404 means the user has none yet.
pub async fn load_library<C: HttpClient>(api: &GameTrackerApi<C>) -> ApiResult<Vec<LibraryEntry>> {
    match api.my_library().await {
        Ok(entries) => {
            log::debug!("library loaded with {} entries", entries.len());
            Ok(entries)
        }
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e.in_op("library.load")),
    }
}

/// Flips the completion flag and returns the value the backend stored.
pub async fn toggle_completion<C: HttpClient>(
    api: &GameTrackerApi<C>,
    entry: &LibraryEntry,
) -> ApiResult<bool> {
    let updated = api
        .update_game(&entry.id, GameUpdate::completion(!entry.completed))
        .await
        .map_err(|e| e.in_op_with("library.toggle", entry.id.clone()))?;
    Ok(updated.completed)
}

/// Sends a clamped rating and returns the stored one.
pub async fn rate<C: HttpClient>(
    api: &GameTrackerApi<C>,
    entry_id: &str,
    value: f64,
) -> ApiResult<Option<f64>> {
    let rating = clamp_rating(value);
    let updated = api
        .update_game(entry_id, GameUpdate::rating(rating))
        .await
        .map_err(|e| e.in_op_with("library.rate", entry_id))?;
    Ok(updated.rating.or(Some(rating)))
}

/// Removes a confirmed entry remotely and returns its id.
pub async fn remove_entry<C: HttpClient>(
    api: &GameTrackerApi<C>,
    confirmed: Confirmed,
) -> ApiResult<String> {
    api.remove_from_library(confirmed.id())
        .await
        .map_err(|e| e.in_op_with("library.remove", confirmed.id()))?;
    Ok(confirmed.id().to_string())
}
