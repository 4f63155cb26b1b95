//! Form state for the "add game" dialog.
//!
//! Groups the field signals into one `Copy` struct that can be handed to
//! child components, reset in one call and turned into a [`GameDraft`].

use gametracker::catalog::GameDraft;
use gametracker::model::{Genre, Platform};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct GameFormState {
    pub title: RwSignal<String>,
    pub genre: RwSignal<String>,
    pub platform: RwSignal<String>,
    pub release_year: RwSignal<String>,
    pub developer: RwSignal<String>,
    pub cover_url: RwSignal<String>,
    pub description: RwSignal<String>,
    pub completed: RwSignal<bool>,
}

impl GameFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            genre: RwSignal::new(String::new()),
            platform: RwSignal::new(String::new()),
            release_year: RwSignal::new(String::new()),
            developer: RwSignal::new(String::new()),
            cover_url: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            completed: RwSignal::new(false),
        }
    }

    pub fn reset(&self) {
        self.title.set(String::new());
        self.genre.set(String::new());
        self.platform.set(String::new());
        self.release_year.set(String::new());
        self.developer.set(String::new());
        self.cover_url.set(String::new());
        self.description.set(String::new());
        self.completed.set(false);
    }

    /// Unselected dropdowns stay `None` so validation reports them.
    pub fn to_draft(&self) -> GameDraft {
        let genre = self.genre.get_untracked();
        let platform = self.platform.get_untracked();
        GameDraft {
            title: self.title.get_untracked(),
            genre: (!genre.is_empty()).then(|| Genre::parse(&genre)),
            platform: (!platform.is_empty()).then(|| Platform::parse(&platform)),
            release_year: self.release_year.get_untracked(),
            developer: self.developer.get_untracked(),
            cover_url: self.cover_url.get_untracked(),
            description: self.description.get_untracked(),
            completed: self.completed.get_untracked(),
        }
    }
}

impl Default for GameFormState {
    fn default() -> Self {
        Self::new()
    }
}
