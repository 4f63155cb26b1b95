use gametracker::Notice;
use gametracker::model::Credentials;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginDialog(
    #[prop(into, default = "Iniciar sesión".to_string())] trigger_label: String,
    #[prop(into, default = "btn btn-primary".to_string())] trigger_class: String,
) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let router = use_router();

    let (open, set_open) = signal(false);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
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

        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            match auth.login(credentials).await {
                Ok(session) => {
                    toaster.success(format!("¡Bienvenido, {}!", session.user.display_name()));
                    set_password.try_set(String::new());
                    set_open.try_set(false);
                    router.navigate_to(AppRoute::auth_success_redirect());
                }
                Err(e) => {
                    log::warn!("{}", e);
                    let notice = Notice::from_error(&e, "Credenciales incorrectas");
                    set_error_msg.try_set(Some(notice.message));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <button class=trigger_class on:click=move |_| set_open.set(true)>
            {trigger_label}
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Iniciar sesión"</h3>
                <form class="space-y-4 pt-4" on:submit=on_submit>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            {move || error_msg.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <div class="form-control">
                        <label for="login_email" class="label">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input
                            id="login_email"
                            type="email"
                            autocomplete="email"
                            class="input input-bordered w-full"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label for="login_password" class="label">
                            <span class="label-text">"Contraseña"</span>
                        </label>
                        <input
                            id="login_password"
                            type="password"
                            autocomplete="current-password"
                            class="input input-bordered w-full"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                            } else {
                                "Entrar".into_any()
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
