//! Game cards for the library and the catalog.

use gametracker::model::Game;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{Check, Gamepad, Pencil, Plus, Trash2};
use crate::components::star_rating::StarRating;

#[component]
fn Cover(game: Game) -> impl IntoView {
    let config = use_auth().config();
    let src = game
        .cover_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| config.asset_url(url));
    let title = game.title.clone();

    match src {
        Some(src) => view! {
            <figure class="h-48 bg-base-300">
                <img src=src alt=title class="h-full w-full object-cover" />
            </figure>
        }
        .into_any(),
        None => view! {
            <figure class="h-48 bg-base-300 flex items-center justify-center">
                <Gamepad attr:class="h-12 w-12 opacity-30" />
            </figure>
        }
        .into_any(),
    }
}

#[component]
fn Badges(game: Game) -> impl IntoView {
    let year = game.release_year.map(|year| year.to_string());
    view! {
        <div class="flex flex-wrap gap-1">
            <span class="badge badge-primary badge-outline">{game.platform_label().to_string()}</span>
            <span class="badge badge-secondary badge-outline">{game.genre_label().to_string()}</span>
            {year.map(|year| view! { <span class="badge badge-ghost">{year}</span> })}
        </div>
    }
}

/// Card in "my library": completion toggle, star rating and removal.
#[component]
pub fn LibraryCard(
    game: Game,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_toggle: Callback<Game>,
    #[prop(into)] on_rate: Callback<(String, u8)>,
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    let completed = game.completed;
    let stars = game.rating_stars();
    let id = game.id.clone();
    let rate_id = id.clone();
    let toggled = game.clone();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <Cover game=game.clone() />
            <div class="card-body gap-3">
                <div class="flex items-start justify-between gap-2">
                    <h3 class="card-title">{game.title.clone()}</h3>
                    {completed.then(|| view! {
                        <span class="badge badge-success gap-1">
                            <Check attr:class="h-3 w-3" /> "Completado"
                        </span>
                    })}
                </div>
                <Badges game=game.clone() />
                {game.developer.clone().map(|dev| view! {
                    <p class="text-sm text-base-content/70">{dev}</p>
                })}
                <StarRating
                    value=Signal::stored(stars)
                    disabled=busy
                    on_rate=Callback::new(move |value: u8| on_rate.run((rate_id.clone(), value)))
                />
                <div class="card-actions justify-end">
                    <button
                        class=if completed { "btn btn-sm btn-outline" } else { "btn btn-sm btn-success" }
                        disabled=move || busy.get()
                        on:click=move |_| on_toggle.run(toggled.clone())
                    >
                        {if completed { "Marcar pendiente" } else { "Marcar completado" }}
                    </button>
                    <button
                        class="btn btn-sm btn-ghost text-error"
                        disabled=move || busy.get()
                        on:click=move |_| on_remove.run(id.clone())
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Card in the catalog. Library and admin actions only show when signed in.
#[component]
pub fn CatalogCard(
    game: Game,
    #[prop(into)] owned: Signal<bool>,
    #[prop(into)] signed_in: Signal<bool>,
    #[prop(into)] on_library: Callback<(String, bool)>,
    #[prop(into)] on_edit: Callback<Game>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let stars = game.score_stars();
    let library_id = game.id.clone();
    let delete_id = game.id.clone();
    let edited = game.clone();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <Cover game=game.clone() />
            <div class="card-body gap-3">
                <h3 class="card-title">{game.title.clone()}</h3>
                <Badges game=game.clone() />
                {game.description.clone().map(|text| view! {
                    <p class="text-sm text-base-content/70 line-clamp-3">{text}</p>
                })}
                <StarRating value=Signal::stored(stars) />
                <Show when=move || signed_in.get()>
                    <div class="card-actions justify-between items-center">
                        {
                            let library_id = library_id.clone();
                            move || {
                                let id = library_id.clone();
                                if owned.get() {
                                    view! {
                                        <button
                                            class="btn btn-sm btn-outline"
                                            on:click=move |_| on_library.run((id.clone(), false))
                                        >
                                            <Check attr:class="h-4 w-4" /> "En tu biblioteca"
                                        </button>
                                    }
                                    .into_any()
                                } else {
                                    view! {
                                        <button
                                            class="btn btn-sm btn-primary"
                                            on:click=move |_| on_library.run((id.clone(), true))
                                        >
                                            <Plus attr:class="h-4 w-4" /> "Añadir a biblioteca"
                                        </button>
                                    }
                                    .into_any()
                                }
                            }
                        }
                        <div class="flex gap-1">
                            {
                                let edited = edited.clone();
                                view! {
                                    <button
                                        class="btn btn-sm btn-ghost btn-square"
                                        title="Editar"
                                        on:click=move |_| on_edit.run(edited.clone())
                                    >
                                        <Pencil attr:class="h-4 w-4" />
                                    </button>
                                }
                            }
                            {
                                let delete_id = delete_id.clone();
                                view! {
                                    <button
                                        class="btn btn-sm btn-ghost btn-square text-error"
                                        title="Eliminar"
                                        on:click=move |_| on_delete.run(delete_id.clone())
                                    >
                                        <Trash2 attr:class="h-4 w-4" />
                                    </button>
                                }
                            }
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
