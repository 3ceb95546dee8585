//! Browser bindings. Every export takes the session as JSON and returns
//! JSON (or SVG); nothing is kept between calls.

use linescale_core::model::Session;
use linescale_core::svg::render_svg;
use linescale_core::views::{ScaleReport, render_plot, scale_session};
use linescale_protocol::{RenderCommand, Viewport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Which line set to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlotKind {
    Original,
    Scaled,
}

impl PlotKind {
    fn parse(s: &str) -> Result<Self, String> {
        match s {
            "original" => Ok(Self::Original),
            "scaled" => Ok(Self::Scaled),
            _ => Err(format!("unknown plot: {s} (expected 'original' or 'scaled')")),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn report_for(session_json: &str) -> Result<ScaleReport, String> {
    let session = Session::from_json(session_json).map_err(|e| e.to_string())?;
    scale_session(&session).map_err(|e| e.to_string())
}

fn plot_commands(
    session_json: &str,
    which: &str,
    width: f64,
    height: f64,
) -> Result<Vec<RenderCommand>, String> {
    let kind = PlotKind::parse(which)?;
    let report = report_for(session_json)?;
    let viewport = Viewport::sized(width, height);
    let commands = match kind {
        PlotKind::Original => {
            render_plot(&report.original, report.old_area, &viewport, "Original Lines")
        }
        PlotKind::Scaled => render_plot(&report.scaled, report.new_area, &viewport, "Scaled Lines"),
    };
    Ok(commands)
}

/// The default lab session as JSON, for seeding the page's editor.
#[wasm_bindgen]
pub fn default_session() -> Result<String, JsError> {
    to_json(&Session::default()).map_err(|e| JsError::new(&e))
}

/// Scale a session and return the results report as JSON.
#[wasm_bindgen]
pub fn scale_session_json(session_json: &str) -> Result<String, JsError> {
    report_for(session_json)
        .and_then(|report| to_json(&report))
        .map_err(|e| JsError::new(&e))
}

/// Render commands for the `"original"` or `"scaled"` plot, as JSON.
#[wasm_bindgen]
pub fn render_plot_json(
    session_json: &str,
    which: &str,
    width: f64,
    height: f64,
) -> Result<String, JsError> {
    plot_commands(session_json, which, width, height)
        .and_then(|cmds| to_json(&cmds))
        .map_err(|e| JsError::new(&e))
}

/// The `"original"` or `"scaled"` plot as an SVG document.
#[wasm_bindgen]
pub fn render_plot_svg(
    session_json: &str,
    which: &str,
    width: f64,
    height: f64,
    dark: bool,
) -> Result<String, JsError> {
    plot_commands(session_json, which, width, height)
        .map(|cmds| render_svg(&cmds, width, height, dark))
        .map_err(|e| JsError::new(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_json() -> String {
        to_json(&Session::default()).unwrap()
    }

    #[test]
    fn report_roundtrips_through_json() {
        let report = report_for(&default_json()).unwrap();
        assert_eq!(report.rows.len(), 8);
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"Line 1\""));
        assert!(json.contains("\"InBounds\""));
    }

    #[test]
    fn plot_kind_is_validated() {
        let err = plot_commands(&default_json(), "sideways", 400.0, 400.0).unwrap_err();
        assert!(err.contains("unknown plot"));
    }

    #[test]
    fn invalid_area_surfaces_as_message() {
        let mut session = Session::default();
        session.old_area.width = 0.0;
        let err = report_for(&to_json(&session).unwrap()).unwrap_err();
        assert!(err.contains("original working area"));
    }

    #[test]
    fn scaled_plot_has_commands() {
        let cmds = plot_commands(&default_json(), "scaled", 400.0, 400.0).unwrap();
        assert!(!cmds.is_empty());
    }
}
