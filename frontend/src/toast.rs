//! Toast notifications. Each notice dismisses itself after three seconds.

use gametracker::{Notice, NoticeLevel};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DISMISS_AFTER_MS: u32 = 3_000;

#[derive(Clone, Copy)]
pub struct Toaster {
    notices: RwSignal<Vec<Notice>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = notice.id;
        let notices = self.notices;
        notices.update(|list| list.push(notice));
        Timeout::new(DISMISS_AFTER_MS, move || {
            notices.try_update(|list| list.retain(|n| n.id != id));
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Notice::success(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Notice::info(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Notice::error(message));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

fn alert_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "alert alert-success shadow-lg",
        NoticeLevel::Info => "alert alert-info shadow-lg",
        NoticeLevel::Error => "alert alert-error shadow-lg",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();
    let notices = toaster.notices;

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    view! {
                        <div class=alert_class(notice.level) role="alert">
                            <span>{notice.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
