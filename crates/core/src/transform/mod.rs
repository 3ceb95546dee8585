//! The scaling pipeline: map segments between working areas, flag scaled
//! coordinates outside the target area, and round them for display.

pub mod bounds;
pub mod format;
pub mod scale;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bounds::{Bounds, SegmentBounds, classify};
pub use format::{DEFAULT_DECIMALS, format, round_to};
pub use scale::{ScaleFactors, scale, scale_table};

/// Which of the two working areas an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaRole {
    Old,
    New,
}

impl std::fmt::Display for AreaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Old => f.write_str("original"),
            Self::New => f.write_str("new"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    #[error("{which} working area must have positive width and height (got {width}x{height})")]
    InvalidArea {
        which: AreaRole,
        width: f64,
        height: f64,
    },
    /// A coordinate is NaN or infinite, either as given or once scaled.
    #[error("line {} has a non-finite coordinate ({value})", .index + 1)]
    MalformedSegment { index: usize, value: f64 },
    #[error("no lines to scale")]
    NoLines,
}
