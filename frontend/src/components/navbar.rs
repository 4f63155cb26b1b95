use gametracker::profile;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{Gamepad, LogOut, UserIcon};
use crate::components::login_dialog::LoginDialog;
use crate::components::register_dialog::RegisterDialog;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// Small round picture, or initials when the user has none.
#[component]
pub fn Avatar(#[prop(into, default = "w-10".to_string())] size: String) -> impl IntoView {
    let auth = use_auth();
    let config = auth.config();

    move || {
        let Some(user) = auth.user() else {
            return view! { <></> }.into_any();
        };
        match profile::avatar_url(&config, &user) {
            Some(src) => view! {
                <div class="avatar">
                    <div class=format!("{} rounded-full", size)>
                        <img src=src alt=user.display_name().to_string() />
                    </div>
                </div>
            }
            .into_any(),
            None => view! {
                <div class="avatar placeholder">
                    <div class=format!("{} rounded-full bg-primary text-primary-content", size)>
                        <span>{profile::initials(&user)}</span>
                    </div>
                </div>
            }
            .into_any(),
        }
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let router = use_router();
    let is_authenticated = auth.is_authenticated_signal();
    let current = router.current_route();

    let on_logout = move |_| {
        auth.sign_out();
        toaster.success("Sesión cerrada correctamente");
        router.navigate_to(AppRoute::Home);
    };

    let nav_links = move || {
        AppRoute::nav_items()
            .into_iter()
            .filter(|(route, _)| is_authenticated.get() || !route.requires_auth())
            .map(|(route, label)| {
                let class = if current.get() == route { "active" } else { "" };
                view! {
                    <li>
                        <Link to=route class=class>{label}</Link>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="navbar bg-base-100 shadow-lg sticky top-0 z-40">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl gap-2">
                    <Gamepad attr:class="h-6 w-6 text-primary" />
                    "GameTracker"
                </Link>
                <ul class="menu menu-horizontal px-1 hidden md:flex">{nav_links}</ul>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <LoginDialog trigger_class="btn btn-ghost" />
                        <RegisterDialog trigger_class="btn btn-primary" />
                    }
                >
                    <div class="dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                            <Avatar size="w-8" />
                            <span class="hidden md:inline">
                                {move || auth.user().map(|u| u.display_name().to_string()).unwrap_or_default()}
                            </span>
                        </div>
                        <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                            <li>
                                <Link to=AppRoute::Account>
                                    <UserIcon attr:class="h-4 w-4" /> "Mi cuenta"
                                </Link>
                            </li>
                            <li>
                                <a on:click=on_logout class="text-error">
                                    <LogOut attr:class="h-4 w-4" /> "Cerrar sesión"
                                </a>
                            </li>
                        </ul>
                    </div>
                </Show>
            </div>
        </div>
    }
}
