use linescale_protocol::Point;

use crate::model::LineSegment;

/// Decimal places shown for coordinates and speeds.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Round `v` to `decimals` fractional digits, halves away from zero on the
/// scaled value. Values whose scaled form overflows are returned unchanged.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = v * factor;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / factor
}

/// A copy of `segment` with every coordinate rounded to `decimals` places.
pub fn format(segment: &LineSegment, decimals: u32) -> LineSegment {
    let round = |p: Point| Point::new(round_to(p.x, decimals), round_to(p.y, decimals));
    LineSegment::new(round(segment.start), round(segment.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_each_coordinate_independently() {
        let seg = LineSegment::from_coords(1.005, 2.004, 3.999, 4.0);
        let out = format(&seg, DEFAULT_DECIMALS);
        // 1.005 is stored just below the halfway point, so it rounds down.
        assert_eq!(out, LineSegment::from_coords(1.0, 2.0, 4.0, 4.0));
        // Input left as it was.
        assert_eq!(seg.start.x, 1.005);
    }

    #[test]
    fn zero_decimals_rounds_to_integers() {
        let out = format(&LineSegment::from_coords(2.5, -2.5, 0.4, 7.6), 0);
        assert_eq!(out, LineSegment::from_coords(3.0, -3.0, 0.0, 8.0));
    }

    #[test]
    fn extra_decimals_keep_precision() {
        assert_eq!(round_to(33.076_923, 4), 33.0769);
        assert_eq!(round_to(215.0, 6), 215.0);
    }

    #[test]
    fn huge_precision_leaves_value_alone() {
        assert_eq!(round_to(1e300, 20), 1e300);
    }
}
