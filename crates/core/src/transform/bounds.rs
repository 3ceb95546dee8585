use serde::{Deserialize, Serialize};

use super::format::{DEFAULT_DECIMALS, format};
use crate::model::{LineSegment, WorkingArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bounds {
    InBounds,
    OutOfBounds,
}

impl Bounds {
    pub fn is_out(self) -> bool {
        self == Self::OutOfBounds
    }
}

/// Classify a coordinate against an axis spanning `[0, axis_size]`.
///
/// The boundary is inclusive: `v == axis_size` is in bounds.
pub fn classify(v: f64, axis_size: f64) -> Bounds {
    if v < 0.0 || v > axis_size {
        Bounds::OutOfBounds
    } else {
        Bounds::InBounds
    }
}

/// Bounds of each scalar component of one segment. X components are
/// checked against the area width, Y components against its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentBounds {
    pub start_x: Bounds,
    pub start_y: Bounds,
    pub end_x: Bounds,
    pub end_y: Bounds,
}

impl SegmentBounds {
    pub fn check(segment: &LineSegment, area: WorkingArea) -> Self {
        Self {
            start_x: classify(segment.start.x, area.width),
            start_y: classify(segment.start.y, area.height),
            end_x: classify(segment.end.x, area.width),
            end_y: classify(segment.end.y, area.height),
        }
    }

    /// Classify `segment` as displayed, rounded to [`DEFAULT_DECIMALS`].
    ///
    /// A coordinate on the area edge can land one ulp past it after
    /// scaling (`1300 * (3 / 1300)` is `3.0000000000000004`); rounding
    /// first keeps it in bounds.
    pub fn check_displayed(segment: &LineSegment, area: WorkingArea) -> Self {
        Self::check(&format(segment, DEFAULT_DECIMALS), area)
    }

    /// `[start_x, start_y, end_x, end_y]`, matching [`LineSegment::components`].
    pub fn components(&self) -> [Bounds; 4] {
        [self.start_x, self.start_y, self.end_x, self.end_y]
    }

    pub fn any_out(&self) -> bool {
        self.components().into_iter().any(Bounds::is_out)
    }

    pub fn start_out(&self) -> bool {
        self.start_x.is_out() || self.start_y.is_out()
    }

    pub fn end_out(&self) -> bool {
        self.end_x.is_out() || self.end_y.is_out()
    }
}
