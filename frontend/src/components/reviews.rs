use gametracker::filter::Choice;
use gametracker::model::{Difficulty, Review};
use gametracker::reviews::{self, RecommendFilter, ReviewFilter, ReviewsState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::game_detail_dialog::GameDetailDialog;
use crate::components::icons::{MessageSquare, Search};
use crate::components::review_card::ReviewCard;
use crate::components::review_editor::use_editing_review;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ReviewsPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let router = use_router();
    let editing = use_editing_review();
    let signed_in = auth.is_authenticated_signal();

    let state = RwSignal::new(ReviewsState::default());
    let filter = RwSignal::new(ReviewFilter::default());
    let (deleting, set_deleting) = signal(false);
    let viewing_game = RwSignal::new(Option::<String>::None);

    state.update(|s| s.set_loading(true));
    let api = auth.api();
    spawn_local(async move {
        match reviews::load_reviews(&api).await {
            Ok(list) => {
                state.try_update(|s| s.replace(list));
            }
            Err(e) => {
                toaster.push(auth.handle_error(&e, "Error al cargar las reseñas"));
                state.try_update(|s| s.set_loading(false));
            }
        }
    });

    let on_edit = move |review: Review| {
        editing.0.set(Some(review));
        router.navigate_to(AppRoute::ReviewEditor);
    };

    let on_delete = move |id: String| {
        let viewer = auth.user_untracked();
        state.update(|s| {
            if !s.request_deletion(&id, viewer.as_ref()) {
                log::warn!("delete refused for review {} by non-author", id);
            }
        });
    };

    let on_confirm_delete = move |_: ()| {
        let Some(confirmed) = state.try_update(|s| s.confirm_deletion()).flatten() else {
            return;
        };
        set_deleting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match reviews::delete_review(&api, confirmed).await {
                Ok(id) => {
                    state.try_update(|s| s.apply_deletion(&id));
                    toaster.success("Reseña eliminada");
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al eliminar la reseña")),
            }
            set_deleting.try_set(false);
        });
    };

    let visible = Memo::new(move |_| filter.with(|f| state.with(|s| s.visible(f))));
    let delete_open = Signal::derive(move || state.with(|s| s.pending_deletion().is_some()));
    let delete_message = Signal::derive(move || {
        state.with(|s| {
            s.pending_deletion()
                .map(|r| {
                    format!(
                        "¿Seguro que quieres eliminar tu reseña de \"{}\"?",
                        r.game_title().unwrap_or("este juego")
                    )
                })
                .unwrap_or_default()
        })
    });

    let difficulty_options = Difficulty::known()
        .into_iter()
        .map(|d| {
            let label = d.label().to_string();
            let value = label.clone();
            view! { <option value=value>{label}</option> }
        })
        .collect_view();

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
            <div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Reseñas de la comunidad"</h1>
                    <p class="text-base-content/70">
                        {move || format!("{} reseñas", state.with(|s| s.reviews().len()))}
                    </p>
                </div>
                <Show when=move || signed_in.get()>
                    <button
                        class="btn btn-primary gap-2"
                        on:click=move |_| router.navigate_to(AppRoute::ReviewEditor)
                    >
                        <MessageSquare attr:class="h-4 w-4" /> "Escribir reseña"
                    </button>
                </Show>
            </div>

            <div class="flex flex-col md:flex-row gap-4">
                <label class="input input-bordered flex items-center gap-2 flex-1">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Buscar en reseñas o juegos..."
                        prop:value=move || filter.with(|f| f.query.clone())
                        on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
                    />
                </label>
                <select
                    class="select select-bordered"
                    prop:value=move || filter.with(|f| {
                        f.difficulty
                            .value()
                            .map(|d| d.label().to_string())
                            .unwrap_or_else(|| "todas".to_string())
                    })
                    on:change=move |ev| filter.update(|f| f.difficulty = Choice::parse(&event_target_value(&ev)))
                >
                    <option value="todas">"Todas las dificultades"</option>
                    {difficulty_options}
                </select>
                <select
                    class="select select-bordered"
                    prop:value=move || filter.with(|f| f.recommendation.value())
                    on:change=move |ev| filter.update(|f| f.recommendation = RecommendFilter::parse(&event_target_value(&ev)))
                >
                    <option value="todas">"Todas"</option>
                    <option value="si">"Recomendadas"</option>
                    <option value="no">"No recomendadas"</option>
                </select>
            </div>

            <Show when=move || state.with(|s| s.is_loading())>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !state.with(|s| s.is_loading()) && visible.with(Vec::is_empty)>
                <p class="text-center py-16 text-base-content/50">"No hay reseñas que mostrar."</p>
            </Show>

            <div class="space-y-6">
                <For
                    each=move || {
                        let viewer = auth.user();
                        visible
                            .get()
                            .into_iter()
                            .map(|review| (reviews::is_author(&review, viewer.as_ref()), review))
                            .collect::<Vec<_>>()
                    }
                    key=|(is_author, review)| (review.id.clone(), *is_author)
                    children=move |(is_author, review)| {
                        view! {
                            <ReviewCard
                                review=review
                                is_author=is_author
                                on_edit=on_edit
                                on_delete=on_delete
                                on_view_game=move |id: String| viewing_game.set(Some(id))
                            />
                        }
                    }
                />
            </div>

            <GameDetailDialog game_id=viewing_game />

            <ConfirmDialog
                open=delete_open
                title="Eliminar reseña"
                message=delete_message
                busy=deleting
                on_confirm=on_confirm_delete
                on_cancel=move |_: ()| state.update(|s| s.cancel_deletion())
            />
        </div>
    }
}
