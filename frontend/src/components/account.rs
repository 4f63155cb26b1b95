use gametracker::model::User;
use gametracker::profile::{self, AvatarUpload, ProfileDraft};
use gametracker::stats::LibraryStats;
use gametracker::{ApiError, library};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::auth::use_auth;
use crate::components::icons::{LogOut, Pencil};
use crate::components::navbar::Avatar;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Reads the first file of an `<input type="file">` into memory.
async fn read_selected_file(input: web_sys::HtmlInputElement) -> Result<Option<AvatarUpload>, ApiError> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ApiError::validation("No se pudo leer la imagen"))?;
    Ok(Some(AvatarUpload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}

/// Editable profile fields. Fills use `try_set` because they run after
/// awaits, when the page may already be gone.
#[derive(Clone, Copy)]
struct ProfileForm {
    editing: RwSignal<bool>,
    name: RwSignal<String>,
    bio: RwSignal<String>,
    avatar: RwSignal<Option<AvatarUpload>>,
}

impl ProfileForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(false),
            name: RwSignal::new(String::new()),
            bio: RwSignal::new(String::new()),
            avatar: RwSignal::new(None),
        }
    }

    fn fill(&self, user: &User) {
        let draft = ProfileDraft::from_user(user);
        self.name.try_set(draft.name);
        self.bio.try_set(draft.bio);
        self.avatar.try_set(None);
    }

    /// Refreshes from a fetched profile unless the user is mid-edit.
    fn refresh(&self, user: &User) {
        if !self.editing.try_get_untracked().unwrap_or(true) {
            self.fill(user);
        }
    }

    fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.name.get_untracked(),
            bio: self.bio.get_untracked(),
            avatar: self.avatar.get_untracked(),
        }
    }
}

#[component]
pub fn AccountPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let router = use_router();

    let form = ProfileForm::new();
    let ProfileForm {
        editing,
        name,
        bio,
        avatar,
    } = form;
    let (saving, set_saving) = signal(false);
    let stats = RwSignal::new(LibraryStats::default());

    if let Some(user) = auth.user_untracked() {
        form.fill(&user);
    }

    // Fresh profile from the backend, then the library counters.
    let api = auth.api();
    spawn_local(async move {
        match profile::load_profile(&api).await {
            Ok(user) => {
                if let Err(e) = auth.update_user(&user) {
                    log::warn!("{}", e);
                }
                form.refresh(&user);
            }
            Err(e) => toaster.push(auth.handle_error(&e, "Error al cargar tu perfil")),
        }
        match library::load_library(&api).await {
            Ok(entries) => {
                stats.try_set(LibraryStats::from_entries(&entries));
            }
            Err(e) => toaster.push(auth.handle_error(&e, "Error al cargar tu biblioteca")),
        }
    });

    let on_file = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        spawn_local(async move {
            match read_selected_file(input).await {
                Ok(upload) => {
                    avatar.try_set(upload);
                }
                Err(e) => toaster.push(auth.handle_error(&e, "No se pudo leer la imagen")),
            }
        });
    };

    let on_cancel = move |_| {
        if let Some(user) = auth.user_untracked() {
            form.fill(&user);
        }
        editing.set(false);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        set_saving.set(true);
        let api = auth.api();
        spawn_local(async move {
            match profile::save_profile(&api, &draft).await {
                Ok(user) => match auth.update_user(&user) {
                    Ok(_) => {
                        toaster.success("Perfil actualizado");
                        form.fill(&user);
                        editing.try_set(false);
                    }
                    Err(e) => toaster.push(auth.handle_error(&e, "Error al guardar tu perfil")),
                },
                Err(e) => toaster.push(auth.handle_error(&e, "Error al actualizar el perfil")),
            }
            set_saving.try_set(false);
        });
    };

    let on_logout = move |_| {
        auth.sign_out();
        toaster.success("Sesión cerrada correctamente");
        router.navigate_to(AppRoute::Home);
    };

    let user_field = move |f: fn(&User) -> String| move || auth.user().map(|u| f(&u)).unwrap_or_default();

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-8">
            <h1 class="text-3xl font-bold">"Mi cuenta"</h1>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center gap-4">
                        <Avatar size="w-20" />
                        <div class="flex-1">
                            <h2 class="text-2xl font-bold">{user_field(|u| u.display_name().to_string())}</h2>
                            <p class="text-base-content/70">{user_field(|u| u.email.clone())}</p>
                        </div>
                        <Show when=move || !editing.get()>
                            <button class="btn btn-ghost gap-2" on:click=move |_| editing.set(true)>
                                <Pencil attr:class="h-4 w-4" /> "Editar perfil"
                            </button>
                        </Show>
                    </div>

                    <Show
                        when=move || editing.get()
                        fallback=move || view! {
                            <p class="pt-4 whitespace-pre-line">
                                {move || auth
                                    .user()
                                    .and_then(|u| u.bio)
                                    .unwrap_or_else(|| "Todavía no has escrito una descripción.".to_string())}
                            </p>
                        }
                    >
                        <form class="space-y-4 pt-4" on:submit=on_submit>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Nombre"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered w-full"
                                    prop:value=name
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Descripción"</span></label>
                                <textarea
                                    class="textarea textarea-bordered w-full"
                                    rows="4"
                                    prop:value=bio
                                    on:input=move |ev| bio.set(event_target_value(&ev))
                                ></textarea>
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Foto de perfil"</span></label>
                                <input
                                    type="file"
                                    accept="image/*"
                                    class="file-input file-input-bordered w-full"
                                    on:change=on_file
                                />
                                <Show when=move || avatar.with(Option::is_some)>
                                    <span class="label-text-alt pt-1">
                                        {move || avatar.with(|a| a.as_ref().map(|a| a.file_name.clone()).unwrap_or_default())}
                                    </span>
                                </Show>
                            </div>
                            <div class="flex justify-end gap-2">
                                <button type="button" class="btn btn-ghost" on:click=on_cancel>
                                    "Cancelar"
                                </button>
                                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                    {move || if saving.get() {
                                        view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                                    } else {
                                        "Guardar cambios".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </Show>
                </div>
            </div>

            <div class="stats shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Juegos en tu biblioteca"</div>
                    <div class="stat-value text-primary">{move || stats.with(|s| s.total)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Completados"</div>
                    <div class="stat-value text-success">{move || stats.with(|s| s.completed)}</div>
                    <div class="stat-desc">
                        {move || stats.with(|s| format!("{}% de tu biblioteca", s.completion_percentage))}
                    </div>
                </div>
            </div>

            <button class="btn btn-outline btn-error gap-2" on:click=on_logout>
                <LogOut attr:class="h-4 w-4" /> "Cerrar sesión"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;

    fn ana() -> User {
        User {
            id: "u1".into(),
            name: "Ana".into(),
            bio: Some("Speedruns".into()),
            ..Default::default()
        }
    }

    #[test]
    fn refresh_fills_unless_editing() {
        let form = ProfileForm::new();
        form.refresh(&ana());
        assert_eq!(form.name.get_untracked(), "Ana");

        form.editing.set(true);
        form.name.set("draft".into());
        form.refresh(&ana());
        assert_eq!(form.name.get_untracked(), "draft");
    }

    #[test]
    fn refresh_after_page_teardown_is_a_no_op() {
        let owner = Owner::new();
        let form = owner.with(ProfileForm::new);
        owner.cleanup();

        form.refresh(&ana());
        form.fill(&ana());
        assert!(form.name.try_get_untracked().is_none());
    }
}
