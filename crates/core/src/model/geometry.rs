use linescale_protocol::Point;
use serde::{Deserialize, Serialize};

/// A straight tool-path stroke between two points, in millimetres.
///
/// Degenerate segments (`start == end`) are valid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Build a segment from `(x1, y1)`–`(x2, y2)`.
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// The four scalar components in `[start.x, start.y, end.x, end.y]` order.
    pub fn components(&self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }

    /// First non-finite component, if any.
    pub fn first_non_finite(&self) -> Option<f64> {
        self.components().into_iter().find(|v| !v.is_finite())
    }
}

/// An ordered sequence of segments. Position is meaningful: it determines
/// display order, palette colour, and the correspondence between an original
/// set and its scaled copy.
pub type LineSet = Vec<LineSegment>;

/// A rectangular working area anchored at the origin, spanning
/// `(0, 0)`–`(width, height)` in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingArea {
    pub width: f64,
    pub height: f64,
}

impl WorkingArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Closed outline of the area: `(0,0)-(w,0)-(w,h)-(0,h)-(0,0)`.
    pub fn outline(&self) -> [Point; 5] {
        [
            Point::ORIGIN,
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
            Point::ORIGIN,
        ]
    }
}

impl std::fmt::Display for WorkingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} mm", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_is_closed_rectangle() {
        let outline = WorkingArea::new(1300.0, 1100.0).outline();
        assert_eq!(outline[0], outline[4]);
        assert_eq!(outline[2], Point::new(1300.0, 1100.0));
        assert_eq!(outline[1], Point::new(1300.0, 0.0));
        assert_eq!(outline[3], Point::new(0.0, 1100.0));
    }

    #[test]
    fn validity() {
        assert!(WorkingArea::new(1.0, 1.0).is_valid());
        assert!(!WorkingArea::new(0.0, 1.0).is_valid());
        assert!(!WorkingArea::new(1.0, -5.0).is_valid());
        assert!(!WorkingArea::new(f64::INFINITY, 1.0).is_valid());
    }

    #[test]
    fn non_finite_component_detected() {
        let seg = LineSegment::from_coords(1.0, 2.0, f64::NAN, 4.0);
        assert!(seg.first_non_finite().is_some_and(f64::is_nan));
        assert_eq!(LineSegment::from_coords(1.0, 2.0, 3.0, 4.0).first_non_finite(), None);
    }
}
