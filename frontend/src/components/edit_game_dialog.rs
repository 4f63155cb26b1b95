use gametracker::catalog::GameEdit;
use gametracker::model::Game;
use leptos::prelude::*;

/// Edit modal for a catalog game. Open while `editing` holds a game.
#[component]
pub fn EditGameDialog(
    editing: RwSignal<Option<Game>>,
    #[prop(into)] on_save: Callback<(String, GameEdit)>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let developer = RwSignal::new(String::new());
    let cover_url = RwSignal::new(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let current = editing.get();
        if let Some(game) = &current {
            let edit = GameEdit::from_game(game);
            title.set(edit.title);
            description.set(edit.description);
            developer.set(edit.developer);
            cover_url.set(edit.cover_url);
            set_error_msg.set(None);
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

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.with_untracked(|g| g.as_ref().map(|g| g.id.clone())) else {
            return;
        };
        let edit = GameEdit {
            title: title.get_untracked(),
            description: description.get_untracked(),
            developer: developer.get_untracked(),
            cover_url: cover_url.get_untracked(),
        };
        if let Err(e) = edit.validate() {
            set_error_msg.set(Some(e.message().to_string()));
            return;
        }
        on_save.run((id, edit));
        editing.set(None);
    };

    let close = move || {
        if editing.with_untracked(Option::is_some) {
            editing.set(None);
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Editar juego"</h3>
                <form on:submit=on_submit class="space-y-4 pt-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            {move || error_msg.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Título"</span></label>
                        <input
                            type="text"
                            class="input input-bordered w-full"
                            prop:value=title
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Desarrollador"</span></label>
                        <input
                            type="text"
                            class="input input-bordered w-full"
                            prop:value=developer
                            on:input=move |ev| developer.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"URL de la portada"</span></label>
                        <input
                            type="url"
                            class="input input-bordered w-full"
                            prop:value=cover_url
                            on:input=move |ev| cover_url.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Descripción"</span></label>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            rows="3"
                            prop:value=description
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| close()>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary">"Guardar cambios"</button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
