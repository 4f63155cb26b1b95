//! Persisted session: the signed-in user and their bearer token.
//!
//! All writes go through [`SessionStore`], which keeps both storage entries
//! consistent and notifies subscribers after every change.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gametracker_shared::User;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "usuario";

/// String key-value storage, e.g. browser `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns `false` when the write was refused.
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<RefCell<Vec<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes writes to `key` fail, like a full quota would.
    pub fn refuse_writes_to(&self, key: &str) {
        self.read_only.borrow_mut().push(key.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if self.read_only.borrow().iter().any(|k| k == key) {
            return false;
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

type Listener = Box<dyn Fn(Option<&Session>)>;

pub struct SessionStore<S> {
    storage: S,
    listeners: RefCell<Vec<Listener>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// `None` unless both entries exist and the user record parses.
    pub fn get_session(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let raw_user = self.storage.get(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { user, token }),
            Err(e) => {
                log::warn!("stored user record is unreadable: {}", e);
                None
            }
        }
    }

    /// Persists token then user. A failed user write puts the previous token
    /// back, so an earlier session survives untouched.
    pub fn set_session(&self, user: &User, token: &str) -> ApiResult<Session> {
        let raw_user = serde_json::to_string(user).map_err(|e| {
            ApiError::storage("cannot encode user record")
                .with_source(e)
                .in_op("session.set")
        })?;

        let previous_token = self.storage.get(TOKEN_KEY);
        if !self.storage.set(TOKEN_KEY, token) {
            return Err(ApiError::storage("token write refused").in_op("session.set"));
        }
        if !self.storage.set(USER_KEY, &raw_user) {
            self.rollback_token(previous_token.as_deref());
            return Err(ApiError::storage("user write refused").in_op("session.set"));
        }

        let session = Session {
            user: user.clone(),
            token: token.to_string(),
        };
        log::info!("session started for {}", user.email);
        self.notify(Some(&session));
        Ok(session)
    }

    /// Replaces the stored user, keeping the current token.
    pub fn update_user(&self, user: &User) -> ApiResult<Session> {
        let token = self
            .storage
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("no active session").in_op("session.update_user"))?;

        let raw_user = serde_json::to_string(user).map_err(|e| {
            ApiError::storage("cannot encode user record")
                .with_source(e)
                .in_op("session.update_user")
        })?;
        if !self.storage.set(USER_KEY, &raw_user) {
            return Err(ApiError::storage("user write refused").in_op("session.update_user"));
        }

        let session = Session {
            user: user.clone(),
            token,
        };
        self.notify(Some(&session));
        Ok(session)
    }

    fn rollback_token(&self, previous: Option<&str>) {
        let restored = match previous {
            Some(token) => self.storage.set(TOKEN_KEY, token),
            None => self.storage.delete(TOKEN_KEY),
        };
        if !restored {
            // Token and user may now belong to different accounts.
            log::warn!("token rollback failed, dropping the stored session");
            self.clear_session();
        }
    }

    pub fn clear_session(&self) {
        self.storage.delete(TOKEN_KEY);
        self.storage.delete(USER_KEY);
        log::info!("session cleared");
        self.notify(None);
    }

    /// Listeners run synchronously after each write and must not subscribe
    /// from inside the callback.
    pub fn subscribe(&self, listener: impl Fn(Option<&Session>) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self, session: Option<&Session>) {
        for listener in self.listeners.borrow().iter() {
            listener(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@test".into(),
            ..Default::default()
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_session(&ana(), "tok").unwrap();

        let session = store.get_session().unwrap();
        assert_eq!(session.user, ana());
        assert_eq!(session.token, "tok");
    }

    #[test]
    fn clear_removes_both_entries() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.set_session(&ana(), "tok").unwrap();

        store.clear_session();

        assert!(store.get_session().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn missing_or_broken_entries_mean_no_session() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());

        storage.set(TOKEN_KEY, "tok");
        assert!(store.get_session().is_none());

        storage.set(USER_KEY, "{not json");
        assert!(store.get_session().is_none());

        storage.set(USER_KEY, r#"{"_id":"u1","nombre":"Ana"}"#);
        storage.delete(TOKEN_KEY);
        assert!(store.get_session().is_none());
    }

    #[test]
    fn failed_user_write_rolls_back_token() {
        let storage = MemoryStorage::new();
        storage.refuse_writes_to(USER_KEY);
        let store = SessionStore::new(storage.clone());

        assert!(store.set_session(&ana(), "tok").is_err());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn failed_switch_keeps_previous_session() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.set_session(&ana(), "tok-ana").unwrap();

        let log = seen.clone();
        store.subscribe(move |s| log.borrow_mut().push(s.map(|s| s.user.name.clone())));
        storage.refuse_writes_to(USER_KEY);

        let luis = User {
            id: "u2".into(),
            name: "Luis".into(),
            email: "luis@test".into(),
            ..Default::default()
        };
        assert!(store.set_session(&luis, "tok-luis").is_err());

        let session = store.get_session().unwrap();
        assert_eq!(session.user, ana());
        assert_eq!(session.token, "tok-ana");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn update_user_keeps_token() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_session(&ana(), "tok").unwrap();

        let renamed = User {
            name: "Ana María".into(),
            ..ana()
        };
        store.update_user(&renamed).unwrap();

        let session = store.get_session().unwrap();
        assert_eq!(session.user.name, "Ana María");
        assert_eq!(session.token, "tok");
    }

    #[test]
    fn update_user_without_session_fails() {
        let store = SessionStore::new(MemoryStorage::new());
        let err = store.update_user(&ana()).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn subscribers_see_every_write() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let store = SessionStore::new(MemoryStorage::new());
        let log = seen.clone();
        store.subscribe(move |s| log.borrow_mut().push(s.map(|s| s.user.name.clone())));

        store.set_session(&ana(), "tok").unwrap();
        store.clear_session();

        assert_eq!(*seen.borrow(), vec![Some("Ana".to_string()), None]);
    }
}
