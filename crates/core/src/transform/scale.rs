use linescale_protocol::Point;
use serde::{Deserialize, Serialize};

use super::{AreaRole, ScaleError};
use crate::model::{LineRow, LineSegment, LineSet, LineTable, WorkingArea};

/// Per-axis ratios taking coordinates from one working area to another.
///
/// The axes are independent; aspect ratio is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    /// Factors mapping `old` onto `new`. Both areas must be finite with
    /// positive sides; a zero-sized old area has no defined factor.
    pub fn between(old: WorkingArea, new: WorkingArea) -> Result<Self, ScaleError> {
        check_area(old, AreaRole::Old)?;
        check_area(new, AreaRole::New)?;
        Ok(Self {
            x: new.width / old.width,
            y: new.height / old.height,
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.x, p.y * self.y)
    }

    pub fn apply_segment(&self, segment: &LineSegment) -> LineSegment {
        LineSegment::new(self.apply(segment.start), self.apply(segment.end))
    }
}

fn check_area(area: WorkingArea, which: AreaRole) -> Result<(), ScaleError> {
    if area.is_valid() {
        Ok(())
    } else {
        Err(ScaleError::InvalidArea {
            which,
            width: area.width,
            height: area.height,
        })
    }
}

/// Apply `factors` to every segment in order.
///
/// A non-finite input coordinate, or a finite one that overflows once
/// scaled, is reported as [`ScaleError::MalformedSegment`] with its index.
pub(crate) fn apply_checked<'a>(
    factors: &ScaleFactors,
    segments: impl IntoIterator<Item = &'a LineSegment>,
) -> Result<LineSet, ScaleError> {
    segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            if let Some(value) = segment.first_non_finite() {
                return Err(ScaleError::MalformedSegment { index, value });
            }
            let scaled = factors.apply_segment(segment);
            match scaled.first_non_finite() {
                Some(value) => Err(ScaleError::MalformedSegment { index, value }),
                None => Ok(scaled),
            }
        })
        .collect()
}

/// Rescale `lines` from `old` into `new`.
///
/// Returns a new set of the same length where index `i` is the image of
/// input segment `i`. The input is left untouched.
pub fn scale(
    lines: &[LineSegment],
    old: WorkingArea,
    new: WorkingArea,
) -> Result<LineSet, ScaleError> {
    let factors = ScaleFactors::between(old, new)?;
    tracing::trace!(
        lines = lines.len(),
        scale_x = factors.x,
        scale_y = factors.y,
        "scaling lines"
    );
    apply_checked(&factors, lines)
}

/// Rescale every row of `table`, carrying each row's process parameters
/// through unchanged.
pub fn scale_table(
    table: &LineTable,
    old: WorkingArea,
    new: WorkingArea,
) -> Result<LineTable, ScaleError> {
    let factors = ScaleFactors::between(old, new)?;
    let scaled = apply_checked(&factors, table.rows().iter().map(|r| &r.segment))?;
    let rows = table
        .rows()
        .iter()
        .zip(scaled)
        .map(|(row, segment)| LineRow {
            segment,
            params: row.params,
        })
        .collect();
    Ok(LineTable::from_rows(rows))
}
