//! Rendering of command results.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;
use shade::{PreferenceSource, Route, ThemePreference, TrackingState};

use crate::cli::OutputMode;

/// Everything `shade theme` reports about the current state.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeReport {
    pub preference: ThemePreference,
    pub source: &'static str,
    pub tracking: bool,
    pub classes: Vec<String>,
    pub color_scheme: Option<String>,
    pub store: PathBuf,
}

impl ThemeReport {
    pub fn source_label(source: PreferenceSource) -> &'static str {
        match source {
            PreferenceSource::Stored => "stored",
            PreferenceSource::Ambient => "system",
            PreferenceSource::Fallback => "fallback",
        }
    }

    pub fn is_tracking(state: TrackingState) -> bool {
        state == TrackingState::Tracking
    }
}

fn preference_style(preference: ThemePreference, color: bool) -> Style {
    let style = match preference {
        ThemePreference::Light => Style::new().yellow().bold(),
        ThemePreference::Dark => Style::new().blue().bold(),
    };
    style.force_styling(color)
}

fn muted(color: bool) -> Style {
    Style::new().dim().force_styling(color)
}

pub fn render_theme(report: &ThemeReport, mode: OutputMode) -> String {
    if mode.is_json() {
        return to_json(report);
    }

    let color = mode.should_use_color();
    let label = muted(color);
    let tracking = if report.tracking {
        "following system"
    } else {
        "fixed"
    };
    format!(
        "{} {} {}\n{} {}\n{} {}\n",
        label.apply_to("theme:"),
        preference_style(report.preference, color).apply_to(report.preference),
        label.apply_to(format!("({}, {})", report.source, tracking)),
        label.apply_to("classes:"),
        report.classes.join(" "),
        label.apply_to("store:"),
        report.store.display(),
    )
}

/// One line per ambient-driven change seen by `shade theme watch`.
pub fn render_change(preference: ThemePreference, mode: OutputMode) -> String {
    if mode.is_json() {
        return to_json(&serde_json::json!({ "preference": preference }));
    }
    let color = mode.should_use_color();
    format!(
        "{} {}\n",
        muted(color).apply_to("system theme changed:"),
        preference_style(preference, color).apply_to(preference)
    )
}

pub fn render_routes(routes: &[Route], mode: OutputMode) -> String {
    if mode.is_json() {
        return to_json(&routes);
    }

    let color = mode.should_use_color();
    let width = routes.iter().map(|r| r.path.len()).max().unwrap_or(0);
    let path_style = Style::new().cyan().force_styling(color);
    routes
        .iter()
        .map(|route| {
            format!(
                "{}  {} {}\n",
                path_style.apply_to(format!("{:<width$}", route.path, width = width)),
                route.name,
                muted(color).apply_to(format!("-> {}", route.view)),
            )
        })
        .collect()
}

pub fn render_route(route: &Route, mode: OutputMode) -> String {
    render_routes(std::slice::from_ref(route), mode)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{}\n", json),
        Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
    }
}
