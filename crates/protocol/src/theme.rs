use serde::{Deserialize, Serialize};

/// One entry of the fixed line palette.
///
/// Lines are coloured by their position in the table, cycling through
/// [`PALETTE`] in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineColor {
    Blue,
    Green,
    Red,
    Cyan,
    Magenta,
    Yellow,
    Purple,
    Orange,
    Brown,
}

impl LineColor {
    /// Lowercase colour name, as shown in the results table.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Brown => "brown",
        }
    }
}

impl std::fmt::Display for LineColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub const PALETTE: [LineColor; 9] = [
    LineColor::Blue,
    LineColor::Green,
    LineColor::Red,
    LineColor::Cyan,
    LineColor::Magenta,
    LineColor::Yellow,
    LineColor::Purple,
    LineColor::Orange,
    LineColor::Brown,
];

/// Colour assigned to the line at `index`.
pub fn line_color(index: usize) -> LineColor {
    PALETTE[index % PALETTE.len()]
}

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Line(LineColor),

    Background,
    PlotBackground,
    Grid,

    AreaFrame,
    AreaLabel,
    OutOfBounds,

    TextPrimary,
    TextSecondary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(line_color(0), LineColor::Blue);
        assert_eq!(line_color(8), LineColor::Brown);
        assert_eq!(line_color(9), LineColor::Blue);
        assert_eq!(line_color(20), LineColor::Red);
    }

    #[test]
    fn palette_entries_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn line_color_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeToken::Line(LineColor::Magenta)).unwrap();
        assert_eq!(json, r#"{"Line":"magenta"}"#);
    }
}
