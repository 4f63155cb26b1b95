//! Minimal SVG charts for the statistics page.

use std::f64::consts::PI;

use gametracker::stats::ChartPoint;
use leptos::prelude::*;

const PALETTE: [&str; 5] = ["#6C63FF", "#00E5FF", "#FF4081", "#00FF88", "#FF1744"];

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn share_label(share: f64) -> String {
    format!("{}%", (share * 100.0).round() as u32)
}

/// Horizontal bars scaled to the largest value.
#[component]
pub fn BarChart(points: Vec<ChartPoint>) -> impl IntoView {
    let max = points.iter().map(|p| p.value).max().unwrap_or(0).max(1);

    let rows = points
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            let width = format!(
                "width: {:.1}%; background-color: {}",
                point.value as f64 * 100.0 / max as f64,
                color(i)
            );
            view! {
                <div class="space-y-1">
                    <div class="flex justify-between text-sm">
                        <span>{point.name}</span>
                        <span class="text-base-content/70">{point.value}</span>
                    </div>
                    <div class="h-3 w-full rounded bg-base-300">
                        <div class="h-3 rounded" style=width></div>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! { <div class="space-y-3">{rows}</div> }
}

/// Point on a circle of radius `r` centred in a 100x100 box; angle 0 is
/// twelve o'clock.
fn polar(r: f64, angle: f64) -> (f64, f64) {
    (50.0 + r * angle.sin(), 50.0 - r * angle.cos())
}

/// Ring segment path from `start` to `end` radians.
fn arc_path(start: f64, end: f64) -> String {
    const OUTER: f64 = 45.0;
    const INNER: f64 = 28.0;
    let large = if end - start > PI { 1 } else { 0 };
    let (x0, y0) = polar(OUTER, start);
    let (x1, y1) = polar(OUTER, end);
    let (x2, y2) = polar(INNER, end);
    let (x3, y3) = polar(INNER, start);
    format!(
        "M {x0:.3} {y0:.3} A {OUTER} {OUTER} 0 {large} 1 {x1:.3} {y1:.3} \
         L {x2:.3} {y2:.3} A {INNER} {INNER} 0 {large} 0 {x3:.3} {y3:.3} Z"
    )
}

/// Donut with a legend. A single slice is drawn as a full ring.
#[component]
pub fn DonutChart(points: Vec<ChartPoint>) -> impl IntoView {
    let mut start = 0.0;
    let slices = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.share > 0.0)
        .map(|(i, point)| {
            // A closed arc of exactly 2π renders as nothing.
            let sweep = (point.share * 2.0 * PI).min(2.0 * PI - 1e-4);
            let path = arc_path(start, start + sweep);
            start += sweep;
            view! { <path d=path fill=color(i)></path> }
        })
        .collect_view();

    let legend = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let swatch = format!("background-color: {}", color(i));
            view! {
                <li class="flex items-center gap-2 text-sm">
                    <span class="inline-block h-3 w-3 rounded-sm" style=swatch></span>
                    <span class="flex-1">{point.name.clone()}</span>
                    <span class="text-base-content/70">{share_label(point.share)}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="flex flex-col md:flex-row items-center gap-6">
            <svg viewBox="0 0 100 100" class="w-48 h-48">{slices}</svg>
            <ul class="space-y-2 w-full">{legend}</ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_starts_at_twelve_oclock() {
        let (x, y) = polar(10.0, 0.0);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn wide_arcs_use_the_large_arc_flag() {
        assert!(arc_path(0.0, 1.5 * PI).contains(" 0 1 1 "));
        assert!(arc_path(0.0, 0.5 * PI).contains(" 0 0 1 "));
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(color(0), color(PALETTE.len()));
    }
}
