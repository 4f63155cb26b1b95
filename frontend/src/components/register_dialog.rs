use gametracker::model::NewUser;
use gametracker::{Notice, auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::toast::use_toaster;

#[component]
pub fn RegisterDialog(
    #[prop(into, default = "Crear cuenta".to_string())] trigger_label: String,
    #[prop(into, default = "btn btn-outline".to_string())] trigger_class: String,
) -> impl IntoView {
    let auth_ctx = use_auth();
    let toaster = use_toaster();

    let (open, set_open) = signal(false);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
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
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let new_user = NewUser {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            match auth::register(&auth_ctx.api(), &new_user).await {
                Ok(()) => {
                    toaster.success("Cuenta creada. Ya puedes iniciar sesión.");
                    name.try_set(String::new());
                    email.try_set(String::new());
                    password.try_set(String::new());
                    set_open.try_set(false);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    let notice = Notice::from_error(&e, "No se pudo crear la cuenta");
                    set_error_msg.try_set(Some(notice.message));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label for=id class="label">
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    class="input input-bordered w-full"
                    prop:value=value
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <button class=trigger_class on:click=move |_| set_open.set(true)>
            {trigger_label}
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Crear cuenta"</h3>
                <form class="space-y-4 pt-4" on:submit=on_submit>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            {move || error_msg.get().unwrap_or_default()}
                        </div>
                    </Show>
                    {field("register_name", "Nombre", "text", name)}
                    {field("register_email", "Email", "email", email)}
                    {field("register_password", "Contraseña", "password", password)}
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Creando..." }.into_any()
                            } else {
                                "Registrarse".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
