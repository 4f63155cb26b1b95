use gametracker::catalog;
use gametracker::model::Game;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::{Gamepad, X};

#[derive(Debug, Clone, PartialEq)]
enum Detail {
    Loading,
    Loaded(Game),
    Failed,
}

#[component]
fn Fact(#[prop(into)] label: String, value: String) -> impl IntoView {
    view! {
        <p>
            <span class="font-semibold">{label} ": "</span>
            <span class="text-base-content/70">{value}</span>
        </p>
    }
}

/// Read-only game sheet. Open while `game_id` holds an id.
#[component]
pub fn GameDetailDialog(game_id: RwSignal<Option<String>>) -> impl IntoView {
    let auth = use_auth();
    let config = auth.config();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let detail = RwSignal::new(Detail::Loading);

    Effect::new(move |_| {
        let current = game_id.get();
        if let Some(id) = current.clone() {
            detail.set(Detail::Loading);
            let api = auth.api();
            spawn_local(async move {
                let result = catalog::load_game(&api, &id).await;
                // Ignore answers for a game the user already closed or replaced.
                if game_id.try_get_untracked().flatten().as_deref() != Some(id.as_str()) {
                    return;
                }
                match result {
                    Ok(game) => {
                        detail.try_set(Detail::Loaded(game));
                    }
                    Err(e) => {
                        log::warn!("game {} unavailable: {}", id, e);
                        detail.try_set(Detail::Failed);
                    }
                }
            });
        }
        if let Some(dialog) = dialog_ref.get() {
            if current.is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let close = move || {
        if game_id.with_untracked(Option::is_some) {
            game_id.set(None);
        }
    };

    let heading = move || match detail.get() {
        Detail::Loading => "Cargando...".to_string(),
        Detail::Loaded(game) => game.title,
        Detail::Failed => "Juego".to_string(),
    };

    let body = move || match detail.get() {
        Detail::Loading => view! {
            <div class="flex justify-center py-10">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        Detail::Failed => view! {
            <p class="py-10 text-center text-error">"No se pudo cargar la información del juego."</p>
        }
        .into_any(),
        Detail::Loaded(game) => {
            let cover = game.cover_url.as_deref().map(|url| config.asset_url(url));
            let year = game
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string());
            view! {
                <div class="flex flex-col md:flex-row gap-6 pt-4">
                    <div class="md:w-1/2">
                        {match cover {
                            Some(src) => view! {
                                <img src=src alt=game.title.clone() class="rounded-xl w-full h-72 object-cover" />
                            }
                            .into_any(),
                            None => view! {
                                <div class="rounded-xl w-full h-72 bg-base-300 flex items-center justify-center">
                                    <Gamepad attr:class="h-12 w-12 opacity-30" />
                                </div>
                            }
                            .into_any(),
                        }}
                    </div>
                    <div class="md:w-1/2 space-y-4">
                        <p class="leading-relaxed">
                            {game.description.clone().unwrap_or_else(|| "Sin descripción disponible.".to_string())}
                        </p>
                        <div class="space-y-1">
                            <Fact label="Plataforma" value=game.platform_label().to_string() />
                            <Fact label="Género" value=game.genre_label().to_string() />
                            <Fact label="Desarrollador" value=game.developer.clone().unwrap_or_else(|| "-".to_string()) />
                            <Fact label="Año" value=year />
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box max-w-4xl">
                <div class="flex items-center justify-between">
                    <h3 class="font-bold text-2xl">{heading}</h3>
                    <button class="btn btn-sm btn-circle btn-ghost" on:click=move |_| close()>
                        <X attr:class="h-4 w-4" />
                    </button>
                </div>
                {body}
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
