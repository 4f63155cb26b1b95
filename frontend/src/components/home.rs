use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{BookOpen, ChartBars, Gamepad, MessageSquare};
use crate::components::login_dialog::LoginDialog;
use crate::components::register_dialog::RegisterDialog;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
fn Feature(#[prop(into)] title: String, #[prop(into)] text: String, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body items-center text-center">
                <div class="p-3 bg-primary/10 rounded-2xl text-primary">{children()}</div>
                <h3 class="card-title">{title}</h3>
                <p class="text-base-content/70">{text}</p>
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated_signal();

    view! {
        <div class="hero min-h-[60vh] bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-xl space-y-6">
                    <Gamepad attr:class="h-16 w-16 mx-auto text-primary" />
                    <h1 class="text-5xl font-bold">"GameTracker"</h1>
                    <p class="text-lg text-base-content/70">
                        "Organiza tu colección de videojuegos, califica lo que juegas y comparte tus reseñas."
                    </p>
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| view! {
                            <div class="flex justify-center gap-4">
                                <LoginDialog trigger_label="Iniciar sesión" trigger_class="btn btn-primary btn-lg" />
                                <RegisterDialog trigger_label="Crear cuenta" trigger_class="btn btn-outline btn-lg" />
                            </div>
                        }
                    >
                        <div class="flex justify-center gap-4">
                            <Link to=AppRoute::Library class="btn btn-primary btn-lg">"Ir a mi biblioteca"</Link>
                            <Link to=AppRoute::Explore class="btn btn-outline btn-lg">"Explorar juegos"</Link>
                        </div>
                    </Show>
                </div>
            </div>
        </div>

        <div class="max-w-7xl mx-auto p-4 md:p-8 grid gap-6 md:grid-cols-3">
            <Feature title="Tu biblioteca" text="Marca juegos como completados y califícalos del 1 al 5.">
                <BookOpen attr:class="h-8 w-8" />
            </Feature>
            <Feature title="Reseñas" text="Escribe reseñas y descubre lo que opina la comunidad.">
                <MessageSquare attr:class="h-8 w-8" />
            </Feature>
            <Feature title="Estadísticas" text="Sigue tu progreso por plataforma y género.">
                <ChartBars attr:class="h-8 w-8" />
            </Feature>
        </div>
    }
}
