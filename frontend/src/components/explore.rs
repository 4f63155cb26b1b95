use gametracker::catalog::{self, CatalogFilter, CatalogState, GameDraft, GameEdit};
use gametracker::filter::Choice;
use gametracker::model::{Game, Platform};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::add_game_dialog::AddGameDialog;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::edit_game_dialog::EditGameDialog;
use crate::components::game_card::CatalogCard;
use crate::components::icons::Search;
use crate::components::library::genre_options;
use crate::toast::use_toaster;

fn platform_options() -> impl IntoView {
    Platform::known()
        .into_iter()
        .map(|platform| {
            let label = platform.label().to_string();
            let value = label.clone();
            view! { <option value=value>{label}</option> }
        })
        .collect_view()
}

/// Re-renders a card after an edit.
fn card_key(game: &Game) -> (String, String, Option<String>, Option<String>, Option<String>) {
    (
        game.id.clone(),
        game.title.clone(),
        game.description.clone(),
        game.developer.clone(),
        game.cover_url.clone(),
    )
}

fn choice_value<T: std::fmt::Display>(choice: &Choice<T>) -> String {
    choice
        .value()
        .map(ToString::to_string)
        .unwrap_or_else(|| "todos".to_string())
}

#[component]
pub fn ExplorePage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let signed_in = auth.is_authenticated_signal();

    let state = RwSignal::new(CatalogState::default());
    let filter = RwSignal::new(CatalogFilter::default());
    let editing = RwSignal::new(Option::<Game>::None);
    let (deleting, set_deleting) = signal(false);

    let load_catalog = move || {
        state.update(|s| s.set_loading(true));
        let api = auth.api();
        spawn_local(async move {
            match catalog::load_catalog(&api).await {
                Ok(games) => {
                    state.try_update(|s| s.replace(games));
                }
                Err(e) => {
                    toaster.push(auth.handle_error(&e, "Error al cargar los juegos"));
                    state.try_update(|s| s.set_loading(false));
                }
            }
        });
    };

    // Catalog on mount; membership whenever the signed-in user changes.
    Effect::new(move |_| load_catalog());
    Effect::new(move |_| {
        let Some(user_id) = auth.user().map(|u| u.id) else {
            state.update(|s| s.set_owned(Default::default()));
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            match catalog::load_owned_ids(&api, &user_id).await {
                Ok(owned) => {
                    state.try_update(|s| s.set_owned(owned));
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al cargar tu biblioteca")),
            }
        });
    });

    let on_add = move |draft: GameDraft| {
        let api = auth.api();
        spawn_local(async move {
            match catalog::create_game(&api, &draft).await {
                Ok(()) => {
                    toaster.success("Juego añadido correctamente");
                    load_catalog();
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al añadir el juego")),
            }
        });
    };

    let on_library = move |(id, add): (String, bool)| {
        let api = auth.api();
        spawn_local(async move {
            match catalog::set_in_library(&api, &id, add).await {
                Ok(owned) => {
                    state.try_update(|s| s.mark_owned(&id, owned));
                    toaster.success(if owned {
                        "Juego añadido a tu biblioteca"
                    } else {
                        "Juego eliminado de tu biblioteca"
                    });
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al actualizar tu biblioteca")),
            }
        });
    };

    let on_edit = move |game: Game| editing.set(Some(game));

    let on_save = move |(id, edit): (String, GameEdit)| {
        let api = auth.api();
        spawn_local(async move {
            match catalog::save_edit(&api, &id, &edit).await {
                Ok(updated) => {
                    state.try_update(|s| s.apply_edit(updated));
                    toaster.success("Juego actualizado");
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al actualizar el juego")),
            }
        });
    };

    let on_delete = move |id: String| {
        state.update(|s| {
            s.request_deletion(&id);
        });
    };

    let on_confirm_delete = move |_: ()| {
        let Some(confirmed) = state.try_update(|s| s.confirm_deletion()).flatten() else {
            return;
        };
        set_deleting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match catalog::delete_game(&api, confirmed).await {
                Ok(id) => {
                    state.try_update(|s| s.apply_deletion(&id));
                    toaster.success("Juego eliminado");
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al eliminar el juego")),
            }
            set_deleting.try_set(false);
        });
    };

    let visible = Memo::new(move |_| filter.with(|f| state.with(|s| s.visible(f))));
    let delete_open = Signal::derive(move || state.with(|s| s.pending_deletion().is_some()));
    let delete_message = Signal::derive(move || {
        state.with(|s| {
            s.pending_deletion()
                .map(|g| format!("¿Seguro que quieres eliminar \"{}\" del catálogo?", g.title))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Explorar juegos"</h1>
                    <p class="text-base-content/70">
                        {move || format!("{} juegos en el catálogo", state.with(|s| s.games().len()))}
                    </p>
                </div>
                <Show when=move || signed_in.get()>
                    <AddGameDialog on_add=on_add />
                </Show>
            </div>

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
                    prop:value=move || filter.with(|f| choice_value(&f.genre))
                    on:change=move |ev| filter.update(|f| f.genre = Choice::parse(&event_target_value(&ev)))
                >
                    <option value="todos">"Todos los géneros"</option>
                    {genre_options()}
                </select>
                <select
                    class="select select-bordered"
                    prop:value=move || filter.with(|f| choice_value(&f.platform))
                    on:change=move |ev| filter.update(|f| f.platform = Choice::parse(&event_target_value(&ev)))
                >
                    <option value="todos">"Todas las plataformas"</option>
                    {platform_options()}
                </select>
            </div>

            <Show when=move || state.with(|s| s.is_loading() && s.games().is_empty())>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !state.with(|s| s.is_loading()) && visible.with(Vec::is_empty)>
                <p class="text-center py-16 text-base-content/50">
                    "No se encontraron juegos con esos filtros."
                </p>
            </Show>

            <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                <For
                    each=move || visible.get()
                    key=card_key
                    children=move |game| {
                        let id = game.id.clone();
                        let owned = Signal::derive(move || state.with(|s| s.is_owned(&id)));
                        view! {
                            <CatalogCard
                                game=game
                                owned=owned
                                signed_in=signed_in
                                on_library=on_library
                                on_edit=on_edit
                                on_delete=on_delete
                            />
                        }
                    }
                />
            </div>

            <EditGameDialog editing=editing on_save=on_save />

            <ConfirmDialog
                open=delete_open
                title="Eliminar juego"
                message=delete_message
                busy=deleting
                on_confirm=on_confirm_delete
                on_cancel=move |_: ()| state.update(|s| s.cancel_deletion())
            />
        </div>
    }
}
