pub mod commands;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use theme::{LineColor, PALETTE, ThemeToken, line_color};
pub use types::{Point, Rect, Viewport};
