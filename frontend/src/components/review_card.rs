use gametracker::model::Review;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{Clock, Gamepad, Pencil, ThumbsDown, ThumbsUp, Trash2};
use crate::components::star_rating::StarRating;

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{} h", hours as u64)
    } else {
        format!("{:.1} h", hours)
    }
}

#[component]
pub fn ReviewCard(
    review: Review,
    /// Edit and delete buttons are shown to the author only.
    is_author: bool,
    #[prop(into)] on_edit: Callback<Review>,
    #[prop(into)] on_delete: Callback<String>,
    /// Opens the game sheet for the reviewed game.
    #[prop(into)]
    on_view_game: Callback<String>,
) -> impl IntoView {
    let config = use_auth().config();
    let title = review.game_title().unwrap_or("Juego desconocido").to_string();
    let cover = review.cover_url().map(|url| config.asset_url(url));
    let author = review.author_name().to_string();
    let date = review
        .created_on()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    let edited = review
        .updated_on()
        .zip(review.created_on())
        .is_some_and(|(updated, created)| updated > created);
    let difficulty = review.difficulty.as_ref().map(|d| d.label().to_string());
    let hours = review.hours_played.map(format_hours);
    let recommends = review.recommends;
    let rating = review.rating;
    let body = review.body.clone();
    let delete_id = review.id.clone();
    let game_ref = review.game_ref_id().map(str::to_string);

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body gap-3">
                <div class="flex items-start gap-4">
                    {match cover {
                        Some(src) => view! {
                            <img src=src alt=title.clone() class="w-16 h-20 rounded object-cover" />
                        }
                        .into_any(),
                        None => view! {
                            <div class="w-16 h-20 rounded bg-base-300 flex items-center justify-center">
                                <Gamepad attr:class="h-6 w-6 opacity-30" />
                            </div>
                        }
                        .into_any(),
                    }}
                    <div class="flex-1 min-w-0">
                        {match game_ref {
                            Some(id) => view! {
                                <button
                                    class="card-title link link-hover text-left"
                                    on:click=move |_| on_view_game.run(id.clone())
                                >
                                    {title.clone()}
                                </button>
                            }
                            .into_any(),
                            None => view! { <h3 class="card-title">{title.clone()}</h3> }.into_any(),
                        }}
                        <p class="text-sm text-base-content/70">
                            "por " {author} " · " {date}
                            {edited.then(|| view! { <span class="italic">" (editada)"</span> })}
                        </p>
                        <StarRating value=Signal::stored(rating) />
                    </div>
                </div>

                <p class="whitespace-pre-line">{body}</p>

                <div class="flex flex-wrap gap-2">
                    {difficulty.map(|d| view! { <span class="badge badge-outline">{d}</span> })}
                    {hours.map(|h| view! {
                        <span class="badge badge-ghost gap-1"><Clock attr:class="h-3 w-3" />{h}</span>
                    })}
                    {if recommends {
                        view! {
                            <span class="badge badge-success gap-1">
                                <ThumbsUp attr:class="h-3 w-3" /> "Lo recomienda"
                            </span>
                        }
                        .into_any()
                    } else {
                        view! {
                            <span class="badge badge-error gap-1">
                                <ThumbsDown attr:class="h-3 w-3" /> "No lo recomienda"
                            </span>
                        }
                        .into_any()
                    }}
                </div>

                {is_author.then(|| {
                    let edited_review = review.clone();
                    let delete_id = delete_id.clone();
                    view! {
                        <div class="card-actions justify-end">
                            <button
                                class="btn btn-sm btn-ghost gap-1"
                                on:click=move |_| on_edit.run(edited_review.clone())
                            >
                                <Pencil attr:class="h-4 w-4" /> "Editar"
                            </button>
                            <button
                                class="btn btn-sm btn-ghost text-error gap-1"
                                on:click=move |_| on_delete.run(delete_id.clone())
                            >
                                <Trash2 attr:class="h-4 w-4" /> "Eliminar"
                            </button>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
