//! Line scaling between rectangular working areas.
//!
//! ```text
//!   Session ──▶ scale ──▶ SegmentBounds ──▶ ScaleReport (results table)
//!                 │
//!                 └──▶ render_plot ──▶ RenderCommand[] ──▶ SVG / terminal / canvas
//! ```
//!
//! Every operation is a pure function of its arguments. The caller owns the
//! [`model::Session`] and decides when to edit it.

pub mod model;
pub mod svg;
pub mod transform;
pub mod views;

pub use model::{LineSegment, LineSet, LineTable, Point, ProcessParameters, Session, WorkingArea};
pub use transform::{Bounds, ScaleError, SegmentBounds, classify, format, scale};
