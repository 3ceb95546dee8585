use linescale_protocol::{LineColor, line_color};
use serde::{Deserialize, Serialize};

use crate::model::{LineSegment, LineSet, ProcessParameters, Session, WorkingArea};
use crate::transform::scale::apply_checked;
use crate::transform::{DEFAULT_DECIMALS, ScaleError, ScaleFactors, SegmentBounds, format, round_to};

/// One row of the scaled-results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRow {
    /// `"Line 1"`, `"Line 2"`, …
    pub label: String,
    /// Original segment, rounded for display.
    pub original: LineSegment,
    /// Scaled segment, rounded for display.
    pub scaled: LineSegment,
    /// Process parameters of the line; speed rounded for display.
    pub params: ProcessParameters,
    pub color: LineColor,
    /// Classification of the scaled coordinates as displayed.
    pub bounds: SegmentBounds,
}

/// Everything the operator sees after pressing "scale": both line sets
/// for plotting and the annotated results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleReport {
    pub old_area: WorkingArea,
    pub new_area: WorkingArea,
    pub factors: ScaleFactors,
    pub original: LineSet,
    pub scaled: LineSet,
    pub rows: Vec<ScaledRow>,
}

impl ScaleReport {
    /// Indices of rows with at least one out-of-bounds coordinate.
    pub fn out_of_bounds_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.bounds.any_out())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Scale the session's lines from its old area into its new area and build
/// the results table. The session is read, never modified.
pub fn scale_session(session: &Session) -> Result<ScaleReport, ScaleError> {
    if session.table.is_empty() {
        return Err(ScaleError::NoLines);
    }

    let factors = ScaleFactors::between(session.old_area, session.new_area)?;
    let original = session.table.segments();
    let scaled = apply_checked(&factors, &original)?;

    let rows: Vec<ScaledRow> = session
        .table
        .rows()
        .iter()
        .zip(&scaled)
        .enumerate()
        .map(|(i, (row, scaled_segment))| ScaledRow {
            label: format!("Line {}", i + 1),
            original: format(&row.segment, DEFAULT_DECIMALS),
            scaled: format(scaled_segment, DEFAULT_DECIMALS),
            params: ProcessParameters {
                speed_mm_s: round_to(row.params.speed_mm_s, DEFAULT_DECIMALS),
                ..row.params
            },
            color: line_color(i),
            bounds: SegmentBounds::check_displayed(scaled_segment, session.new_area),
        })
        .collect();

    let flagged = rows.iter().filter(|r| r.bounds.any_out()).count();
    tracing::debug!(
        lines = rows.len(),
        out_of_bounds = flagged,
        old_area = %session.old_area,
        new_area = %session.new_area,
        "scaled session"
    );

    Ok(ScaleReport {
        old_area: session.old_area,
        new_area: session.new_area,
        factors,
        original,
        scaled,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineTable;
    use crate::transform::{AreaRole, Bounds};

    #[test]
    fn default_session_halves_everything() {
        let report = scale_session(&Session::default()).unwrap();
        assert_eq!(report.rows.len(), 8);
        assert_eq!(report.factors, ScaleFactors { x: 0.5, y: 0.5 });

        let first = &report.rows[0];
        assert_eq!(first.label, "Line 1");
        assert_eq!(first.scaled, LineSegment::from_coords(215.0, 60.0, 215.0, 500.0));
        assert_eq!(first.params, ProcessParameters::new(58.1, 5, 2));
        assert_eq!(first.color, LineColor::Blue);
        assert!(report.out_of_bounds_rows().is_empty());
    }

    #[test]
    fn report_keeps_unrounded_sets_for_plotting() {
        let mut session = Session::default();
        session.new_area = WorkingArea::new(100.0, 100.0);
        let report = scale_session(&session).unwrap();
        assert!((report.scaled[0].start.x - 430.0 / 13.0).abs() < 1e-12);
        assert_eq!(report.rows[0].scaled.start.x, 33.08);
        assert_eq!(report.original, session.table.segments());
    }

    #[test]
    fn flags_rows_outside_new_area() {
        let mut session = Session::default();
        session
            .table
            .set_segment(2, LineSegment::from_coords(1400.0, 120.0, 787.0, 1000.0))
            .unwrap();
        let report = scale_session(&session).unwrap();
        assert_eq!(report.out_of_bounds_rows(), vec![2]);
        assert_eq!(report.rows[2].bounds.start_x, Bounds::OutOfBounds);
        assert_eq!(report.rows[2].bounds.end_x, Bounds::InBounds);
        // Still reported with its scaled value.
        assert_eq!(report.rows[2].scaled.start.x, 700.0);
    }

    #[test]
    fn line_on_old_edge_is_not_flagged() {
        let mut table = LineTable::new();
        table.push(
            LineSegment::from_coords(1300.0, 0.0, 1300.0, 1100.0),
            ProcessParameters::default(),
        );
        let session = Session {
            old_area: WorkingArea::new(1300.0, 1100.0),
            new_area: WorkingArea::new(3.0, 550.0),
            table,
        };
        let report = scale_session(&session).unwrap();
        assert!(report.scaled[0].start.x > 3.0);
        assert_eq!(report.rows[0].scaled.start.x, 3.0);
        assert!(!report.rows[0].bounds.any_out());
        assert!(report.out_of_bounds_rows().is_empty());
    }

    #[test]
    fn overflowing_line_blocks_the_report() {
        let mut session = Session::default();
        session.old_area = WorkingArea::new(1.0, 1.0);
        session
            .table
            .set_segment(3, LineSegment::from_coords(1e308, 0.0, 0.0, 0.0))
            .unwrap();
        assert!(matches!(
            scale_session(&session),
            Err(ScaleError::MalformedSegment { index: 3, .. })
        ));
    }

    #[test]
    fn rounds_speed_for_display() {
        let mut session = Session::default();
        session
            .table
            .set_params(0, ProcessParameters::new(58.123_456, 7, 3))
            .unwrap();
        let report = scale_session(&session).unwrap();
        assert_eq!(report.rows[0].params, ProcessParameters::new(58.12, 7, 3));
    }

    #[test]
    fn empty_table_is_an_error() {
        let session = Session {
            old_area: WorkingArea::new(1300.0, 1100.0),
            new_area: WorkingArea::new(650.0, 550.0),
            table: LineTable::new(),
        };
        assert_eq!(scale_session(&session), Err(ScaleError::NoLines));
    }

    #[test]
    fn invalid_area_blocks_the_whole_report() {
        let session = Session {
            old_area: WorkingArea::new(1300.0, 0.0),
            new_area: WorkingArea::new(650.0, 550.0),
            table: LineTable::default(),
        };
        // No lines is checked first.
        assert_eq!(scale_session(&session), Err(ScaleError::NoLines));

        let mut session = Session::default();
        session.old_area.height = 0.0;
        assert!(matches!(
            scale_session(&session),
            Err(ScaleError::InvalidArea {
                which: AreaRole::Old,
                ..
            })
        ));
    }
}
