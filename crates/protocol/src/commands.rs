use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each plot. Renderers consume
/// this list sequentially — each command carries all the data it needs.
/// Coordinates are device pixels with y growing downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally outlined.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
    },

    /// Draw a text string at a position. `rotation` is in degrees,
    /// clockwise, around `position`.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        rotation: f64,
    },

    /// Draw a line segment. `line_index` ties the stroke back to a row of
    /// the line table; frame and grid strokes carry `None`.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
        line_index: Option<usize>,
    },

    /// Draw a filled circle marker, optionally ringed.
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        ring: Option<ThemeToken>,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (e.g. all strokes of one line). Renderers may
    /// use this for layer separation or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_survive_json() {
        let cmd = RenderCommand::DrawLine {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 5.0),
            color: ThemeToken::AreaFrame,
            width: 3.0,
            line_index: None,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.starts_with(r#"{"DrawLine":"#));
        let back: RenderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
