//! Helpers for lists of backend records keyed by id.

use gametracker_shared::{Game, Review};

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Game {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Review {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Applies `patch` to the first element with `id`. Returns whether one matched.
pub fn patch_by_id<T: Identified>(items: &mut [T], id: &str, patch: impl FnOnce(&mut T)) -> bool {
    match items.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            patch(item);
            true
        }
        None => false,
    }
}

/// Drops every element with `id`. Returns whether anything was removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

// =========================================================
// Two-step confirmation
// =========================================================

/// Remembers which item a destructive action is waiting on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingConfirmation {
    target: Option<String>,
}

impl PendingConfirmation {
    pub fn request(&mut self, id: &str) {
        self.target = Some(id.to_string());
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.target.is_some()
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    pub fn confirm(&mut self) -> Option<Confirmed> {
        self.target.take().map(|id| Confirmed { id })
    }
}

/// Proof that the user confirmed an action on `id`.
///
/// Only [`PendingConfirmation::confirm`] creates one, so async operations that
/// take it cannot run unconfirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmed {
    id: String,
}

impl Confirmed {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(ids: &[&str]) -> Vec<Game> {
        ids.iter()
            .map(|id| Game {
                id: id.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn patch_touches_only_the_match() {
        let mut list = games(&["a", "b", "c"]);

        assert!(patch_by_id(&mut list, "b", |g| g.completed = true));

        let flags: Vec<bool> = list.iter().map(|g| g.completed).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn patch_unknown_id_is_a_no_op() {
        let mut list = games(&["a"]);
        let before = list.clone();
        assert!(!patch_by_id(&mut list, "zz", |g| g.completed = true));
        assert_eq!(list, before);
    }

    #[test]
    fn remove_filters_by_id() {
        let mut list = games(&["a", "b"]);
        assert!(remove_by_id(&mut list, "a"));
        assert!(!remove_by_id(&mut list, "a"));
        assert_eq!(find_by_id(&list, "b").map(|g| g.id.as_str()), Some("b"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn confirmation_is_single_use() {
        let mut pending = PendingConfirmation::default();
        assert!(pending.confirm().is_none());

        pending.request("g1");
        assert_eq!(pending.target(), Some("g1"));
        let confirmed = pending.confirm().unwrap();
        assert_eq!(confirmed.id(), "g1");
        assert!(!pending.is_pending());

        pending.request("g2");
        pending.cancel();
        assert!(pending.confirm().is_none());
    }
}
