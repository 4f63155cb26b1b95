use gametracker::filter::Choice;
use gametracker::library::{self, LibraryFilter, LibraryState};
use gametracker::model::{Game, Genre};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::game_card::LibraryCard;
use crate::components::icons::{RefreshCw, Search};
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// Genre dropdown shared by the library and explore filters.
pub fn genre_options() -> impl IntoView {
    Genre::known()
        .into_iter()
        .map(|genre| {
            let label = genre.label().to_string();
            let value = label.clone();
            view! { <option value=value>{label}</option> }
        })
        .collect_view()
}

/// Re-renders a card when its mutable fields change.
fn card_key(game: &Game) -> (String, bool, Option<u8>) {
    (
        game.id.clone(),
        game.completed,
        game.rating.map(|_| game.rating_stars()),
    )
}

#[component]
pub fn LibraryPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();

    let state = RwSignal::new(LibraryState::default());
    let filter = RwSignal::new(LibraryFilter::default());

    let load = move || {
        state.update(|s| s.set_loading(true));
        let api = auth.api();
        spawn_local(async move {
            match library::load_library(&api).await {
                Ok(entries) => {
                    if entries.is_empty() {
                        toaster.info("Tu biblioteca está vacía. Añade juegos desde Explorar.");
                    }
                    state.try_update(|s| s.replace(entries));
                }
                Err(e) => {
                    toaster.push(auth.handle_error(&e, "Error al cargar tu biblioteca"));
                    state.try_update(|s| s.set_loading(false));
                }
            }
        });
    };

    // Initial load
    Effect::new(move |_| load());

    let on_toggle = move |entry: Game| {
        state.update(|s| s.set_busy(true));
        let api = auth.api();
        spawn_local(async move {
            match library::toggle_completion(&api, &entry).await {
                Ok(completed) => {
                    state.try_update(|s| s.apply_completion(&entry.id, completed));
                    toaster.success(if completed {
                        "¡Juego marcado como completado!"
                    } else {
                        "Juego marcado como pendiente"
                    });
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al actualizar el juego")),
            }
            state.try_update(|s| s.set_busy(false));
        });
    };

    let on_rate = move |(id, value): (String, u8)| {
        state.update(|s| s.set_busy(true));
        let api = auth.api();
        spawn_local(async move {
            match library::rate(&api, &id, f64::from(value)).await {
                Ok(rating) => {
                    state.try_update(|s| s.apply_rating(&id, rating));
                    toaster.success("Calificación guardada");
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al guardar la calificación")),
            }
            state.try_update(|s| s.set_busy(false));
        });
    };

    let on_remove = move |id: String| {
        state.update(|s| {
            s.request_removal(&id);
        });
    };

    let on_confirm_removal = move |_: ()| {
        let Some(confirmed) = state.try_update(|s| s.confirm_removal()).flatten() else {
            return;
        };
        state.update(|s| s.set_busy(true));
        let api = auth.api();
        spawn_local(async move {
            match library::remove_entry(&api, confirmed).await {
                Ok(id) => {
                    state.try_update(|s| s.apply_removal(&id));
                    toaster.success("Juego eliminado de tu biblioteca");
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al eliminar el juego")),
            }
            state.try_update(|s| s.set_busy(false));
        });
    };

    let stats = Memo::new(move |_| state.with(|s| s.stats()));
    let visible = Memo::new(move |_| filter.with(|f| state.with(|s| s.visible(f))));
    let busy = Signal::derive(move || state.with(|s| s.is_busy()));
    let removal_open = Signal::derive(move || state.with(|s| s.pending_removal().is_some()));
    let removal_message = Signal::derive(move || {
        state.with(|s| {
            s.pending_removal()
                .map(|g| format!("¿Seguro que quieres quitar \"{}\" de tu biblioteca?", g.title))
                .unwrap_or_default()
        })
    });

    let genre_value = move || {
        filter.with(|f| {
            f.genre
                .value()
                .map(|g| g.label().to_string())
                .unwrap_or_else(|| "todos".to_string())
        })
    };

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Mi biblioteca"</h1>
                    <p class="text-base-content/70">
                        {move || {
                            let s = stats.get();
                            format!(
                                "{} juegos · {} completados · {}% de progreso",
                                s.total, s.completed, s.completion_percentage,
                            )
                        }}
                    </p>
                </div>
                <button
                    class="btn btn-ghost btn-circle"
                    disabled=move || state.with(|s| s.is_loading())
                    on:click=move |_| load()
                >
                    <RefreshCw attr:class=move || if state.with(|s| s.is_loading()) { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                </button>
            </div>

            <progress
                class="progress progress-primary w-full"
                max="100"
                value=move || stats.get().completion_percentage.to_string()
            ></progress>

            <div class="flex flex-col md:flex-row gap-4">
                <label class="input input-bordered flex items-center gap-2 flex-1">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Buscar por título..."
                        prop:value=move || filter.with(|f| f.query.clone())
                        on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
                    />
                </label>
                <select
                    class="select select-bordered"
                    prop:value=genre_value
                    on:change=move |ev| filter.update(|f| f.genre = Choice::parse(&event_target_value(&ev)))
                >
                    <option value="todos">"Todos los géneros"</option>
                    {genre_options()}
                </select>
                <Show when=move || filter.with(|f| f.is_active())>
                    <button class="btn btn-ghost" on:click=move |_| filter.update(|f| f.clear())>
                        "Limpiar filtros"
                    </button>
                </Show>
            </div>

            <p class="text-sm text-base-content/70">
                {move || format!("Mostrando {} de {} juegos", visible.with(Vec::len), stats.get().total)}
            </p>

            <Show when=move || state.with(|s| s.is_loading() && s.entries().is_empty())>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || state.with(|s| !s.is_loading() && s.entries().is_empty())>
                <div class="text-center py-16 space-y-4">
                    <p class="text-base-content/70">"Todavía no tienes juegos en tu biblioteca."</p>
                    <Link to=AppRoute::Explore class="btn btn-primary">"Explorar juegos"</Link>
                </div>
            </Show>

            <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                <For
                    each=move || visible.get()
                    key=card_key
                    children=move |game| {
                        view! {
                            <LibraryCard
                                game=game
                                busy=busy
                                on_toggle=on_toggle
                                on_rate=on_rate
                                on_remove=on_remove
                            />
                        }
                    }
                />
            </div>

            <ConfirmDialog
                open=removal_open
                title="Quitar de la biblioteca"
                message=removal_message
                confirm_label="Quitar"
                busy=busy
                on_confirm=on_confirm_removal
                on_cancel=move |_: ()| state.update(|s| s.cancel_removal())
            />
        </div>
    }
}
