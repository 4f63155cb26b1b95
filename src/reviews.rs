//! Review editor and public review list.

use gametracker_shared::{Difficulty, MAX_RATING, NewReview, Review, ReviewUpdate, User};

use crate::api::GameTrackerApi;
use crate::collection::{self, Confirmed, PendingConfirmation};
use crate::error::{ApiError, ApiResult};
use crate::filter::{Choice, contains_ci};
use crate::request::HttpClient;

#[cfg(test)]
mod tests;

// =========================================================
// Draft & editor
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Game,
    Body,
    HoursPlayed,
    Difficulty,
    Recommendation,
    Rating,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Game => "juego",
            DraftField::Body => "reseña",
            DraftField::HoursPlayed => "horas jugadas",
            DraftField::Difficulty => "dificultad",
            DraftField::Recommendation => "recomendación",
            DraftField::Rating => "puntuación",
        }
    }
}

/// Raw review form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub game_id: String,
    pub body: String,
    pub rating: u8,
    /// Kept as typed so the input can be edited freely.
    pub hours_played: String,
    pub difficulty: Option<Difficulty>,
    pub recommends: Option<bool>,
}

impl ReviewDraft {
    fn hours(&self) -> Option<f64> {
        self.hours_played
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|h| h.is_finite() && *h >= 0.0)
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.game_id.trim().is_empty() {
            missing.push(DraftField::Game);
        }
        if self.body.trim().is_empty() {
            missing.push(DraftField::Body);
        }
        if self.hours().is_none() {
            missing.push(DraftField::HoursPlayed);
        }
        if self.difficulty.is_none() {
            missing.push(DraftField::Difficulty);
        }
        if self.recommends.is_none() {
            missing.push(DraftField::Recommendation);
        }
        if self.rating == 0 {
            missing.push(DraftField::Rating);
        }
        missing
    }

    pub fn validate(&self) -> ApiResult<NewReview> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(DraftField::label).collect();
            return Err(ApiError::validation(format!(
                "Por favor completa todos los campos ({})",
                names.join(", ")
            )));
        }
        let (Some(hours_played), Some(difficulty), Some(recommends)) =
            (self.hours(), self.difficulty.clone(), self.recommends)
        else {
            return Err(ApiError::validation("Por favor completa todos los campos"));
        };

        Ok(NewReview {
            game_id: self.game_id.trim().to_string(),
            content: ReviewUpdate {
                body: self.body.trim().to_string(),
                rating: self.rating.min(MAX_RATING),
                hours_played,
                difficulty,
                recommends,
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorMode {
    #[default]
    Create,
    /// Editing an existing review; the game cannot change.
    Edit { review_id: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewEditor {
    mode: EditorMode,
    draft: ReviewDraft,
}

impl ReviewEditor {
    pub fn create() -> Self {
        Self::default()
    }

    /// Prefills the form from a review handed over by the list view.
    pub fn edit(review: &Review) -> Self {
        Self {
            mode: EditorMode::Edit {
                review_id: review.id.clone(),
            },
            draft: ReviewDraft {
                game_id: review.game_ref_id().unwrap_or_default().to_string(),
                body: review.body.clone(),
                rating: review.rating.min(MAX_RATING),
                hours_played: review
                    .hours_played
                    .map(|h| h.to_string())
                    .unwrap_or_default(),
                difficulty: review.difficulty.clone(),
                recommends: Some(review.recommends),
            },
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Ignored while editing. Returns whether the game changed.
    pub fn set_game(&mut self, game_id: &str) -> bool {
        if self.is_editing() {
            return false;
        }
        self.draft.game_id = game_id.to_string();
        true
    }

    pub fn set_body(&mut self, body: &str) {
        self.draft.body = body.to_string();
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.draft.rating = rating.min(MAX_RATING);
    }

    pub fn set_hours(&mut self, hours: &str) {
        self.draft.hours_played = hours.to_string();
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.draft.difficulty = difficulty;
    }

    pub fn set_recommends(&mut self, recommends: Option<bool>) {
        self.draft.recommends = recommends;
    }

    /// Back to an empty create form.
    pub fn reset(&mut self) {
        *self = Self::create();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

/// Validates the draft, then creates or updates. Nothing is sent when the
/// draft is incomplete.
pub async fn submit_review<C: HttpClient>(
    api: &GameTrackerApi<C>,
    editor: &ReviewEditor,
) -> ApiResult<SubmitOutcome> {
    let review = editor
        .draft()
        .validate()
        .map_err(|e| e.in_op("reviews.submit"))?;

    match editor.mode() {
        EditorMode::Create => {
            api.create_review(&review)
                .await
                .map_err(|e| e.in_op("reviews.submit"))?;
            Ok(SubmitOutcome::Created)
        }
        EditorMode::Edit { review_id } => {
            api.update_review(review_id, review.content)
                .await
                .map_err(|e| e.in_op_with("reviews.submit", review_id.clone()))?;
            Ok(SubmitOutcome::Updated)
        }
    }
}

// =========================================================
// List filtering
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecommendFilter {
    #[default]
    All,
    Recommended,
    NotRecommended,
}

impl RecommendFilter {
    /// Select values: "todas", "si", "no".
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "si" | "sí" | "yes" => RecommendFilter::Recommended,
            "no" => RecommendFilter::NotRecommended,
            _ => RecommendFilter::All,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            RecommendFilter::All => "todas",
            RecommendFilter::Recommended => "si",
            RecommendFilter::NotRecommended => "no",
        }
    }

    fn allows(&self, recommends: bool) -> bool {
        match self {
            RecommendFilter::All => true,
            RecommendFilter::Recommended => recommends,
            RecommendFilter::NotRecommended => !recommends,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    /// Searched in the review body and the game title.
    pub query: String,
    pub difficulty: Choice<Difficulty>,
    pub recommendation: RecommendFilter,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        let text_match = contains_ci(&review.body, &self.query)
            || review
                .game_title()
                .is_some_and(|title| contains_ci(title, &self.query));

        text_match
            && self.difficulty.allows(|wanted| {
                review
                    .difficulty
                    .as_ref()
                    .is_some_and(|d| d.matches(wanted))
            })
            && self.recommendation.allows(review.recommends)
    }

    /// Matching reviews, newest first. Undated reviews go last.
    pub fn apply(&self, reviews: &[Review]) -> Vec<Review> {
        let mut visible: Vec<Review> = reviews
            .iter()
            .filter(|review| self.matches(review))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_on().cmp(&a.created_on()));
        visible
    }
}

/// UI-only ownership check; the backend enforces the real one.
pub fn is_author(review: &Review, viewer: Option<&User>) -> bool {
    match (viewer, review.author_ref_id()) {
        (Some(user), Some(author)) => !user.id.is_empty() && user.id == author,
        _ => false,
    }
}

// =========================================================
// List state
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsState {
    reviews: Vec<Review>,
    loading: bool,
    deletion: PendingConfirmation,
}

impl ReviewsState {
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn replace(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
        self.loading = false;
        self.deletion.cancel();
    }

    pub fn visible(&self, filter: &ReviewFilter) -> Vec<Review> {
        filter.apply(&self.reviews)
    }

    /// Only the author may queue their review for deletion.
    pub fn request_deletion(&mut self, id: &str, viewer: Option<&User>) -> bool {
        match collection::find_by_id(&self.reviews, id) {
            Some(review) if is_author(review, viewer) => {
                self.deletion.request(id);
                true
            }
            _ => false,
        }
    }

    pub fn pending_deletion(&self) -> Option<&Review> {
        self.deletion
            .target()
            .and_then(|id| collection::find_by_id(&self.reviews, id))
    }

    pub fn cancel_deletion(&mut self) {
        self.deletion.cancel();
    }

    pub fn confirm_deletion(&mut self) -> Option<Confirmed> {
        self.deletion.confirm()
    }

    pub fn apply_deletion(&mut self, id: &str) -> bool {
        collection::remove_by_id(&mut self.reviews, id)
    }
}

pub async fn load_reviews<C: HttpClient>(api: &GameTrackerApi<C>) -> ApiResult<Vec<Review>> {
    match api.list_reviews().await {
        Ok(reviews) => Ok(reviews),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e.in_op("reviews.load")),
    }
}

pub async fn delete_review<C: HttpClient>(
    api: &GameTrackerApi<C>,
    confirmed: Confirmed,
) -> ApiResult<String> {
    api.delete_review(confirmed.id())
        .await
        .map_err(|e| e.in_op_with("reviews.delete", confirmed.id()))?;
    Ok(confirmed.id().to_string())
}
