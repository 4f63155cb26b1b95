use gametracker::library;
use gametracker::stats::LibraryStats;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::charts::{BarChart, DonutChart};
use crate::components::icons::{BookOpen, ChartBars, Check, Star};
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
fn StatTile(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into, default = Signal::stored(String::new()))] desc: Signal<String>,
    #[prop(into)] tone: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class=format!("stat-figure {}", tone)>{children()}</div>
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", tone)>{move || value.get()}</div>
            <div class="stat-desc">{move || desc.get()}</div>
        </div>
    }
}

#[component]
pub fn StatisticsPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();

    let stats = RwSignal::new(LibraryStats::default());
    let (loading, set_loading) = signal(true);

    let api = auth.api();
    spawn_local(async move {
        match library::load_library(&api).await {
            Ok(entries) => {
                stats.try_set(LibraryStats::from_entries(&entries));
            }
            Err(e) => toaster.push(auth.handle_error(&e, "Error al cargar las estadísticas")),
        }
        set_loading.try_set(false);
    });

    let total = Signal::derive(move || stats.with(|s| s.total.to_string()));
    let completed = Signal::derive(move || stats.with(|s| s.completed.to_string()));
    let percentage =
        Signal::derive(move || stats.with(|s| format!("{}% completado", s.completion_percentage)));
    let active = Signal::derive(move || stats.with(|s| format!("{} pendientes", s.active())));
    let average = Signal::derive(move || stats.with(LibraryStats::average_rating_label));
    let rated = Signal::derive(move || stats.with(|s| format!("{} juegos calificados", s.rated)));

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <h1 class="text-3xl font-bold">"Estadísticas"</h1>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || stats.with(|s| s.total > 0)
                    fallback=|| view! {
                        <div class="text-center py-16 space-y-4">
                            <p class="text-base-content/70">
                                "Añade juegos a tu biblioteca para ver tus estadísticas."
                            </p>
                            <Link to=AppRoute::Explore class="btn btn-primary">"Explorar juegos"</Link>
                        </div>
                    }
                >
                    <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                        <StatTile title="Juegos totales" value=total desc=active tone="text-primary">
                            <BookOpen attr:class="h-8 w-8" />
                        </StatTile>
                        <StatTile title="Completados" value=completed desc=percentage tone="text-success">
                            <Check attr:class="h-8 w-8" />
                        </StatTile>
                        <StatTile title="Calificación media" value=average desc=rated tone="text-warning">
                            <Star attr:class="h-8 w-8" />
                        </StatTile>
                    </div>

                    <div class="grid gap-6 lg:grid-cols-2">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title gap-2">
                                    <ChartBars attr:class="h-5 w-5" /> "Juegos por plataforma"
                                </h3>
                                {move || view! { <BarChart points=stats.with(LibraryStats::platform_series) /> }}
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">"Juegos por género"</h3>
                                {move || view! { <DonutChart points=stats.with(LibraryStats::genre_series) /> }}
                            </div>
                        </div>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
