use linescale_core::transform::Bounds;
use linescale_core::views::{ScaleReport, ScaledRow};

pub const HEADERS: [&str; 13] = [
    "Line",
    "Orig X start",
    "Orig Y start",
    "Orig X end",
    "Orig Y end",
    "Scaled X start",
    "Scaled Y start",
    "Scaled X end",
    "Scaled Y end",
    "Speed (mm/s)",
    "T cycle (ms)",
    "T pulse (ms)",
    "Color",
];

/// A rendered table cell: its text and whether it needs highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub flagged: bool,
}

impl Cell {
    fn plain(text: String) -> Self {
        Self {
            text,
            flagged: false,
        }
    }
}

/// Cells of one results row, in [`HEADERS`] order.
pub fn row_cells(row: &ScaledRow) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(HEADERS.len());
    cells.push(Cell::plain(row.label.clone()));
    for v in row.original.components() {
        cells.push(Cell::plain(format!("{v:.2}")));
    }
    for (v, bounds) in row.scaled.components().into_iter().zip(row.bounds.components()) {
        cells.push(Cell {
            text: format!("{v:.2}"),
            flagged: bounds == Bounds::OutOfBounds,
        });
    }
    cells.push(Cell::plain(format!("{:.2}", row.params.speed_mm_s)));
    cells.push(Cell::plain(row.params.cycle_time_ms.to_string()));
    cells.push(Cell::plain(row.params.pulse_time_ms.to_string()));
    cells.push(Cell::plain(row.color.to_string()));
    cells
}

/// Plain-text table; out-of-bounds cells end in `!`.
pub fn format_report(report: &ScaleReport) -> String {
    let body: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            row_cells(row)
                .into_iter()
                .map(|c| if c.flagged { format!("{}!", c.text) } else { c.text })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!(
        "{} -> {} (scale x {:.4}, y {:.4})\n",
        report.old_area, report.new_area, report.factors.x, report.factors.y
    );
    push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
    for row in body {
        push_line(&mut out, row.into_iter(), &widths);
    }

    let flagged = report.out_of_bounds_rows();
    if flagged.is_empty() {
        out.push_str("All scaled coordinates are inside the new working area.\n");
    } else {
        let labels: Vec<&str> = flagged
            .iter()
            .map(|&i| report.rows[i].label.as_str())
            .collect();
        out.push_str(&format!(
            "Outside the new working area (marked !): {}\n",
            labels.join(", ")
        ));
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:>w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use linescale_core::model::{LineSegment, Session};
    use linescale_core::views::scale_session;

    #[test]
    fn default_report_has_header_and_all_lines() {
        let report = scale_session(&Session::default()).unwrap();
        let text = format_report(&report);
        assert!(text.contains("Scaled X start"));
        assert!(text.contains("Line 8"));
        assert!(text.contains("215.00"));
        assert!(text.contains("All scaled coordinates are inside"));
        assert!(!text.contains('!'));
    }

    #[test]
    fn flagged_cells_are_marked() {
        let mut session = Session::default();
        session
            .table
            .set_segment(0, LineSegment::from_coords(1400.0, 120.0, 430.0, 1000.0))
            .unwrap();
        let report = scale_session(&session).unwrap();

        let cells = row_cells(&report.rows[0]);
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[5].text, "700.00");
        assert!(cells[5].flagged);
        assert!(!cells[6].flagged);

        let text = format_report(&report);
        assert!(text.contains("700.00!"));
        assert!(text.contains("(marked !): Line 1"));
    }
}
