//! Session state shared through context.
//!
//! The persisted session lives in a `SessionStore` over `localStorage`; its
//! subscriber mirrors every write into a signal, so the router guard and the
//! navbar react to login, profile edits and logout without polling.

use std::rc::Rc;

use gametracker::model::{Credentials, User};
use gametracker::{ApiError, ClientConfig, GameTrackerApi, Notice, Session, SessionStore, auth};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::web::http::FetchClient;
use crate::web::storage::BrowserStorage;

pub type Api = GameTrackerApi<FetchClient>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    store: StoredValue<Rc<SessionStore<BrowserStorage>>, LocalStorage>,
    config: StoredValue<ClientConfig>,
}

impl AuthContext {
    /// Restores any persisted session and starts mirroring store writes.
    pub fn new(config: ClientConfig) -> Self {
        let store = SessionStore::new(BrowserStorage);
        let restored = store.get_session();
        if let Some(session) = &restored {
            log::info!("restored session for {}", session.user.email);
        }

        let (state, set_state) = signal(AuthState { session: restored });
        store.subscribe(move |session| {
            set_state.set(AuthState {
                session: session.cloned(),
            });
        });

        Self {
            state,
            store: StoredValue::new_local(Rc::new(store)),
            config: StoredValue::new(config),
        }
    }

    /// Injected into the router guard.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.is_some()))
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.session.as_ref().map(|s| s.user.clone()))
    }

    pub fn user_untracked(&self) -> Option<User> {
        self.state
            .with_untracked(|s| s.session.as_ref().map(|s| s.user.clone()))
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    /// Client carrying the current token, if any.
    pub fn api(&self) -> Api {
        let token = self
            .state
            .with_untracked(|s| s.session.as_ref().map(|s| s.token.clone()));
        GameTrackerApi::new(FetchClient, &self.config.get_value()).with_token(token)
    }

    pub async fn login(&self, credentials: Credentials) -> Result<Session, ApiError> {
        let store = self.store.with_value(Rc::clone);
        auth::login(&self.api(), &store, &credentials).await
    }

    pub fn sign_out(&self) {
        self.store.with_value(|s| s.clear_session());
    }

    /// Stores a refreshed user record under the current token.
    pub fn update_user(&self, user: &User) -> Result<Session, ApiError> {
        self.store.with_value(|s| s.update_user(user))
    }

    /// Turns a failure into a toast. An expired token ends the session, and
    /// the router guard then leaves any protected page.
    pub fn handle_error(&self, err: &ApiError, fallback: &str) -> Notice {
        log::warn!("{}", err);
        if err.is_unauthorized() && self.state.with_untracked(|s| s.session.is_some()) {
            self.sign_out();
        }
        Notice::from_error(err, fallback)
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
