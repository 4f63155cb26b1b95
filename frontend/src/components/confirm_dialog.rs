use leptos::prelude::*;

/// Modal yes/no prompt. Closing it by any means other than the confirm
/// button counts as a cancel.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into, default = "Eliminar".to_string())] confirm_label: String,
    #[prop(into, default = Signal::stored(false))] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
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

    let on_close = move |_| {
        if open.get_untracked() {
            on_cancel.run(());
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=on_close>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4 text-base-content/70">{move || message.get()}</p>
                <div class="modal-action">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="button"
                        class="btn btn-error"
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() {
                            view! { <span class="loading loading-spinner"></span> }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }}
                        {confirm_label}
                    </button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
