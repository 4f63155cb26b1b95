//! GameTracker web app.
//!
//! Context-driven layout:
//! - `web::route`: route table (pure data)
//! - `web::router`: History-API router with the auth guard
//! - `auth`: session context over the core `SessionStore`
//! - `toast`: notifications
//! - `components`: pages and presentational components

mod auth;
mod components {
    pub mod account;
    mod add_game_dialog;
    mod charts;
    mod confirm_dialog;
    mod edit_game_dialog;
    pub mod explore;
    mod game_card;
    mod game_detail_dialog;
    pub mod home;
    mod icons;
    pub mod library;
    mod login_dialog;
    pub mod navbar;
    mod register_dialog;
    mod review_card;
    pub mod review_editor;
    pub mod reviews;
    mod star_rating;
    pub mod statistics;
}
mod toast;

// Browser adapters for the platform-independent core.
pub(crate) mod web {
    pub mod console;
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use gametracker::ClientConfig;
use leptos::prelude::*;

use crate::auth::AuthContext;
use crate::components::account::AccountPage;
use crate::components::explore::ExplorePage;
use crate::components::home::HomePage;
use crate::components::library::LibraryPage;
use crate::components::navbar::Navbar;
use crate::components::review_editor::{EditingReview, ReviewEditorPage};
use crate::components::reviews::ReviewsPage;
use crate::components::statistics::StatisticsPage;
use crate::toast::{ToastHost, Toaster};
use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

pub use web::console::init as init_logging;

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Explore => view! { <ExplorePage /> }.into_any(),
        AppRoute::Library => view! { <LibraryPage /> }.into_any(),
        AppRoute::ReviewEditor => view! { <ReviewEditorPage /> }.into_any(),
        AppRoute::Reviews => view! { <ReviewsPage /> }.into_any(),
        AppRoute::Statistics => view! { <StatisticsPage /> }.into_any(),
        AppRoute::Account => view! { <AccountPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Página no encontrada"</p>
                    <Link to=AppRoute::Home class="btn btn-primary">"Volver al inicio"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session context, restored from localStorage
    let config = ClientConfig::from_build_env();
    log::info!("api base url: {}", config.api_base_url);
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 2. Toasts and the list-to-editor review hand-over
    provide_context(Toaster::new());
    provide_context(EditingReview::new());

    // 3. The router only sees the auth signal
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <Navbar />
                <main>
                    <RouterOutlet matcher=route_matcher />
                </main>
                <ToastHost />
            </div>
        </Router>
    }
}
