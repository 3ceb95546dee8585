//! Integration test: load a session file, scale it, and check the results
//! table, bounds flags, and both plots.

use linescale_core::model::{LineSegment, ProcessParameters, Session};
use linescale_core::svg::render_svg;
use linescale_core::transform::{Bounds, ScaleFactors};
use linescale_core::views::{render_plot, scale_session};
use linescale_protocol::{LineColor, RenderCommand, ThemeToken, Viewport};

fn load_fixture() -> Session {
    let text = include_str!("fixtures/narrow_table.json");
    Session::from_json(text).expect("fixture should parse")
}

#[test]
fn narrow_area_scales_axes_independently() {
    let session = load_fixture();
    let report = scale_session(&session).expect("scaling should succeed");

    assert_eq!(report.factors, ScaleFactors { x: 0.25, y: 0.5 });
    assert_eq!(report.rows.len(), 3);
    assert_eq!(
        report.rows[0].scaled,
        LineSegment::from_coords(107.5, 60.0, 107.5, 500.0)
    );
    assert_eq!(
        report.rows[1].scaled,
        LineSegment::from_coords(312.5, 505.0, 197.5, 505.0)
    );
}

#[test]
fn only_the_stray_line_is_flagged() {
    let session = load_fixture();
    let report = scale_session(&session).expect("scaling should succeed");

    assert_eq!(report.out_of_bounds_rows(), vec![2]);
    let stray = &report.rows[2];
    assert_eq!(
        stray.scaled,
        LineSegment::from_coords(335.0, 27.5, 312.5, 575.0)
    );
    assert_eq!(stray.bounds.start_x, Bounds::OutOfBounds);
    assert_eq!(stray.bounds.start_y, Bounds::InBounds);
    assert_eq!(stray.bounds.end_x, Bounds::InBounds);
    assert_eq!(stray.bounds.end_y, Bounds::OutOfBounds);
}

#[test]
fn parameters_and_colors_follow_line_index() {
    let session = load_fixture();
    let report = scale_session(&session).expect("scaling should succeed");

    let params: Vec<ProcessParameters> = report.rows.iter().map(|r| r.params).collect();
    assert_eq!(params, session.table.params());

    let colors: Vec<LineColor> = report.rows.iter().map(|r| r.color).collect();
    assert_eq!(colors, vec![LineColor::Blue, LineColor::Green, LineColor::Red]);

    let labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Line 1", "Line 2", "Line 3"]);
}

#[test]
fn session_is_untouched_by_scaling() {
    let session = load_fixture();
    let before = session.clone();
    let _ = scale_session(&session).expect("scaling should succeed");
    assert_eq!(session, before);
}

#[test]
fn both_plots_render_every_line() {
    let session = load_fixture();
    let report = scale_session(&session).expect("scaling should succeed");
    let viewport = Viewport::sized(640.0, 640.0);

    let original = render_plot(&report.original, report.old_area, &viewport, "Original Lines");
    let scaled = render_plot(&report.scaled, report.new_area, &viewport, "Scaled Lines");

    for cmds in [&original, &scaled] {
        let strokes = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { line_index: Some(_), .. }))
            .count();
        assert_eq!(strokes, 3);
    }

    // The stray line pokes outside the original area too.
    let rings = |cmds: &[RenderCommand]| {
        cmds.iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawCircle {
                        ring: Some(ThemeToken::OutOfBounds),
                        ..
                    }
                )
            })
            .count()
    };
    assert_eq!(rings(original.as_slice()), 2);
    assert_eq!(rings(scaled.as_slice()), 2);

    let svg = render_svg(&scaled, viewport.width, viewport.height, false);
    assert!(svg.contains("Width: 325"));
    assert!(svg.contains("Height: 550"));
}
