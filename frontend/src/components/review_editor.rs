use gametracker::Notice;
use gametracker::library;
use gametracker::model::{Difficulty, Game, Review};
use gametracker::reviews::{self, ReviewEditor, SubmitOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::star_rating::StarRating;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Review handed from the list to the editor when the author clicks "edit".
#[derive(Clone, Copy)]
pub struct EditingReview(pub RwSignal<Option<Review>>);

impl EditingReview {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }
}

impl Default for EditingReview {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_editing_review() -> EditingReview {
    use_context::<EditingReview>().expect("EditingReview should be provided")
}

#[component]
pub fn ReviewEditorPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let router = use_router();

    // The hand-over is consumed once; a reload starts a fresh review.
    let handed_over = use_editing_review().0.try_update(Option::take).flatten();
    let locked_title = handed_over
        .as_ref()
        .map(|r| r.game_title().unwrap_or("Juego desconocido").to_string());
    let editor = RwSignal::new(match &handed_over {
        Some(review) => ReviewEditor::edit(review),
        None => ReviewEditor::create(),
    });
    let is_editing = editor.with_untracked(ReviewEditor::is_editing);

    let games = RwSignal::new(Vec::<Game>::new());
    let (loading_games, set_loading_games) = signal(!is_editing);
    let (is_submitting, set_is_submitting) = signal(false);

    if !is_editing {
        let api = auth.api();
        spawn_local(async move {
            match library::load_library(&api).await {
                Ok(entries) => {
                    games.try_set(entries);
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al cargar tus juegos")),
            }
            set_loading_games.try_set(false);
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let snapshot = editor.get_untracked();
        if let Err(e) = snapshot.draft().validate() {
            toaster.push(Notice::from_error(&e, "Revisa el formulario"));
            return;
        }
        set_is_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match reviews::submit_review(&api, &snapshot).await {
                Ok(SubmitOutcome::Created) => {
                    toaster.success("¡Reseña publicada!");
                    editor.try_update(ReviewEditor::reset);
                    router.navigate_to(AppRoute::Reviews);
                }
                Ok(SubmitOutcome::Updated) => {
                    toaster.success("Reseña actualizada");
                    router.navigate_to(AppRoute::Reviews);
                }
                Err(e) => toaster.push(auth.handle_error(&e, "Error al guardar la reseña")),
            }
            set_is_submitting.try_set(false);
        });
    };

    let rating = Signal::derive(move || editor.with(|e| e.draft().rating));
    let difficulty_value = move || {
        editor.with(|e| {
            e.draft()
                .difficulty
                .as_ref()
                .map(|d| d.label().to_string())
                .unwrap_or_default()
        })
    };
    let difficulty_options = Difficulty::known()
        .into_iter()
        .map(|d| {
            let label = d.label().to_string();
            let value = label.clone();
            view! { <option value=value>{label}</option> }
        })
        .collect_view();

    let game_picker = move || match locked_title.clone() {
        Some(title) => view! {
            <input type="text" class="input input-bordered w-full" prop:value=title disabled=true />
        }
        .into_any(),
        None => view! {
            <select
                class="select select-bordered w-full"
                disabled=move || loading_games.get()
                prop:value=move || editor.with(|e| e.draft().game_id.clone())
                on:change=move |ev| {
                    editor.update(|e| {
                        e.set_game(&event_target_value(&ev));
                    })
                }
            >
                <option value="">
                    {move || if loading_games.get() { "Cargando juegos..." } else { "Selecciona un juego" }}
                </option>
                <For
                    each=move || games.get()
                    key=|game| game.id.clone()
                    children=|game| view! { <option value=game.id.clone()>{game.title}</option> }
                />
            </select>
        }
        .into_any(),
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-6">
            <h1 class="text-3xl font-bold">
                {if is_editing { "Editar reseña" } else { "Escribir reseña" }}
            </h1>

            <Show when=move || !is_editing && !loading_games.get() && games.with(Vec::is_empty)>
                <div role="alert" class="alert alert-info">
                    "Añade juegos a tu biblioteca para poder reseñarlos."
                </div>
            </Show>

            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body space-y-4">
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Juego"</span></label>
                        {game_picker}
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">"Puntuación"</span></label>
                        <StarRating
                            value=rating
                            on_rate=Callback::new(move |value: u8| editor.update(|e| e.set_rating(value)))
                        />
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">"Tu reseña"</span></label>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            rows="6"
                            placeholder="¿Qué te ha parecido?"
                            prop:value=move || editor.with(|e| e.draft().body.clone())
                            on:input=move |ev| editor.update(|e| e.set_body(&event_target_value(&ev)))
                        ></textarea>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Horas jugadas"</span></label>
                            <input
                                type="number"
                                min="0"
                                step="0.5"
                                class="input input-bordered w-full"
                                prop:value=move || editor.with(|e| e.draft().hours_played.clone())
                                on:input=move |ev| editor.update(|e| e.set_hours(&event_target_value(&ev)))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Dificultad"</span></label>
                            <select
                                class="select select-bordered w-full"
                                prop:value=difficulty_value
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    let difficulty = (!raw.is_empty()).then(|| Difficulty::parse(&raw));
                                    editor.update(|e| e.set_difficulty(difficulty));
                                }
                            >
                                <option value="">"Selecciona la dificultad"</option>
                                {difficulty_options}
                            </select>
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">"¿Lo recomendarías?"</span></label>
                        <div class="flex gap-6">
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="radio"
                                    name="recommends"
                                    class="radio radio-success"
                                    prop:checked=move || editor.with(|e| e.draft().recommends == Some(true))
                                    on:change=move |_| editor.update(|e| e.set_recommends(Some(true)))
                                />
                                <span class="label-text">"Sí"</span>
                            </label>
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="radio"
                                    name="recommends"
                                    class="radio radio-error"
                                    prop:checked=move || editor.with(|e| e.draft().recommends == Some(false))
                                    on:change=move |_| editor.update(|e| e.set_recommends(Some(false)))
                                />
                                <span class="label-text">"No"</span>
                            </label>
                        </div>
                    </div>

                    <div class="card-actions justify-end">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| router.navigate_to(AppRoute::Reviews)
                        >
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || match (is_submitting.get(), is_editing) {
                                (true, _) => view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any(),
                                (false, true) => "Guardar cambios".into_any(),
                                (false, false) => "Publicar reseña".into_any(),
                            }}
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
