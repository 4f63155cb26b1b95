mod form_state;

use gametracker::catalog::GameDraft;
use gametracker::model::{Genre, Platform};
use leptos::prelude::*;

use crate::components::icons::Plus;
use form_state::GameFormState;

fn options(labels: Vec<String>) -> impl IntoView {
    labels
        .into_iter()
        .map(|label| {
            let value = label.clone();
            view! { <option value=value>{label}</option> }
        })
        .collect_view()
}

#[component]
fn TextField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into, default = "text".to_string())] kind: String,
    #[prop(into, optional)] placeholder: String,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id.clone() class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full"
            />
        </div>
    }
}

/// "Add game" button plus its modal. Submits only drafts that validate.
#[component]
pub fn AddGameDialog(#[prop(into)] on_add: Callback<GameDraft>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let form = GameFormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.to_draft();
        if let Err(e) = draft.validate() {
            set_error_msg.set(Some(e.message().to_string()));
            return;
        }
        set_error_msg.set(None);
        on_add.run(draft);
        set_open.set(false);
        form.reset();
    };

    let genres = Genre::known().iter().map(|g| g.label().to_string()).collect();
    let platforms = Platform::known().iter().map(|p| p.label().to_string()).collect();

    view! {
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Añadir juego"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">"Añadir nuevo juego"</h3>

                <form on:submit=on_submit class="space-y-4 pt-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            {move || error_msg.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <TextField id="game_title" label="Título" value=form.title />

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Género"</span></label>
                            <select
                                class="select select-bordered w-full"
                                prop:value=form.genre
                                on:change=move |ev| form.genre.set(event_target_value(&ev))
                            >
                                <option value="">"Selecciona un género"</option>
                                {options(genres)}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Plataforma"</span></label>
                            <select
                                class="select select-bordered w-full"
                                prop:value=form.platform
                                on:change=move |ev| form.platform.set(event_target_value(&ev))
                            >
                                <option value="">"Selecciona una plataforma"</option>
                                {options(platforms)}
                            </select>
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <TextField
                            id="game_year"
                            label="Año de lanzamiento"
                            kind="number"
                            placeholder="2023"
                            value=form.release_year
                        />
                        <TextField id="game_developer" label="Desarrollador" value=form.developer />
                    </div>

                    <TextField
                        id="game_cover"
                        label="URL de la portada"
                        kind="url"
                        placeholder="https://..."
                        value=form.cover_url
                    />

                    <div class="form-control">
                        <label for="game_description" class="label">
                            <span class="label-text">"Descripción"</span>
                        </label>
                        <textarea
                            id="game_description"
                            class="textarea textarea-bordered w-full"
                            rows="3"
                            prop:value=form.description
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                        ></textarea>
                    </div>

                    <div class="form-control">
                        <label class="label cursor-pointer justify-start gap-3">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-primary"
                                prop:checked=form.completed
                                on:change=move |ev| form.completed.set(event_target_checked(&ev))
                            />
                            <span class="label-text">"Ya lo he completado"</span>
                        </label>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary">"Guardar juego"</button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
