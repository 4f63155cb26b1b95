use gametracker::model::MAX_RATING;
use leptos::prelude::*;

use crate::components::icons::Star;

/// Row of stars. Clickable when `on_rate` is given, display-only otherwise.
#[component]
pub fn StarRating(
    #[prop(into)] value: Signal<u8>,
    #[prop(optional, into)] on_rate: Option<Callback<u8>>,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
) -> impl IntoView {
    let stars = (1..=MAX_RATING)
        .map(|star| {
            let class = move || {
                if value.get() >= star {
                    "h-5 w-5 fill-warning text-warning"
                } else {
                    "h-5 w-5 text-base-content/30"
                }
            };
            match on_rate {
                Some(on_rate) => view! {
                    <button
                        type="button"
                        class="btn btn-ghost btn-xs px-0"
                        title=format!("{} de {}", star, MAX_RATING)
                        disabled=move || disabled.get()
                        on:click=move |_| on_rate.run(star)
                    >
                        <Star attr:class=class />
                    </button>
                }
                .into_any(),
                None => view! { <Star attr:class=class /> }.into_any(),
            }
        })
        .collect_view();

    view! { <div class="flex items-center gap-0.5">{stars}</div> }
}
