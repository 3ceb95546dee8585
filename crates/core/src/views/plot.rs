use linescale_protocol::{
    Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport, line_color,
};

use crate::model::{LineSegment, WorkingArea};
use crate::transform::SegmentBounds;

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 28.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 44.0;
/// Axes extend past the working area so the frame and labels stay visible.
const AXIS_OVERSHOOT: f64 = 1.08;
const LABEL_OFFSET: f64 = 1.02;
const FRAME_WIDTH: f64 = 3.0;
const LINE_WIDTH: f64 = 1.5;
const GRID_WIDTH: f64 = 0.5;
const MARKER_RADIUS: f64 = 3.0;
const TITLE_FONT_SIZE: f64 = 14.0;
const FONT_SIZE: f64 = 10.0;
const TARGET_TICKS: f64 = 8.0;

/// Maps working-area millimetres onto device pixels with equal aspect and
/// the y axis pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    /// Pixel rect holding the axes.
    pub plot: Rect,
    /// Pixels per millimetre, same on both axes.
    pub px_per_mm: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PlotFrame {
    /// Fit `area` (plus overshoot) into `viewport`. `None` when the area is
    /// invalid or the viewport too small to hold the margins.
    pub fn fit(area: WorkingArea, viewport: &Viewport) -> Option<Self> {
        if !area.is_valid() {
            return None;
        }
        let avail_w = viewport.width - MARGIN_LEFT - MARGIN_RIGHT;
        let avail_h = viewport.height - MARGIN_TOP - MARGIN_BOTTOM;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return None;
        }

        let x_max = area.width * AXIS_OVERSHOOT;
        let y_max = area.height * AXIS_OVERSHOOT;
        let px_per_mm = (avail_w / x_max).min(avail_h / y_max);
        let w = x_max * px_per_mm;
        let h = y_max * px_per_mm;
        let x = viewport.x + MARGIN_LEFT + (avail_w - w) / 2.0;
        let y = viewport.y + MARGIN_TOP + (avail_h - h) / 2.0;

        Some(Self {
            plot: Rect::new(x, y, w, h),
            px_per_mm,
            x_max,
            y_max,
        })
    }

    pub fn to_px(&self, p: Point) -> Point {
        Point::new(
            self.plot.x + p.x * self.px_per_mm,
            self.plot.bottom() - p.y * self.px_per_mm,
        )
    }
}

/// Render a line set against its working area: background, grid, the
/// area's frame, every segment in palette order, and the size annotations.
///
/// Endpoints outside the area are still drawn, ringed with
/// [`ThemeToken::OutOfBounds`].
pub fn render_plot(
    lines: &[LineSegment],
    area: WorkingArea,
    viewport: &Viewport,
    title: &str,
) -> Vec<RenderCommand> {
    let Some(frame) = PlotFrame::fit(area, viewport) else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(64 + lines.len() * 6);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(viewport.x, viewport.y, viewport.width, viewport.height),
        color: ThemeToken::Background,
        border_color: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: frame.plot,
        color: ThemeToken::PlotBackground,
        border_color: Some(ThemeToken::Grid),
    });

    push_grid(&mut commands, &frame);

    // Working area outline
    let outline = area.outline();
    for pair in outline.windows(2) {
        commands.push(RenderCommand::DrawLine {
            from: frame.to_px(pair[0]),
            to: frame.to_px(pair[1]),
            color: ThemeToken::AreaFrame,
            width: FRAME_WIDTH,
            line_index: None,
        });
    }

    commands.push(RenderCommand::SetClip { rect: frame.plot });
    for (i, segment) in lines.iter().enumerate() {
        let color = ThemeToken::Line(line_color(i));
        commands.push(RenderCommand::BeginGroup {
            id: format!("line-{}", i + 1),
            label: Some(format!("Line {}", i + 1)),
        });
        commands.push(RenderCommand::DrawLine {
            from: frame.to_px(segment.start),
            to: frame.to_px(segment.end),
            color,
            width: LINE_WIDTH,
            line_index: Some(i),
        });
        let bounds = SegmentBounds::check_displayed(segment, area);
        for (end, out) in [
            (segment.start, bounds.start_out()),
            (segment.end, bounds.end_out()),
        ] {
            commands.push(RenderCommand::DrawCircle {
                center: frame.to_px(end),
                radius: MARKER_RADIUS,
                color,
                ring: out.then_some(ThemeToken::OutOfBounds),
            });
        }
        commands.push(RenderCommand::EndGroup);
    }
    commands.push(RenderCommand::ClearClip);

    commands.push(RenderCommand::DrawText {
        position: frame.to_px(Point::new(area.width / 2.0, area.height * LABEL_OFFSET)),
        text: format!("Width: {}", area.width),
        color: ThemeToken::AreaLabel,
        font_size: FONT_SIZE,
        align: TextAlign::Center,
        rotation: 0.0,
    });
    commands.push(RenderCommand::DrawText {
        position: frame.to_px(Point::new(area.width * LABEL_OFFSET, area.height / 2.0)),
        text: format!("Height: {}", area.height),
        color: ThemeToken::AreaLabel,
        font_size: FONT_SIZE,
        align: TextAlign::Center,
        rotation: 90.0,
    });

    push_titles(&mut commands, &frame, title);

    commands
}

fn push_grid(commands: &mut Vec<RenderCommand>, frame: &PlotFrame) {
    let step = nice_step(frame.x_max.max(frame.y_max) / TARGET_TICKS);

    let mut x = 0.0;
    while x <= frame.x_max {
        let top = frame.to_px(Point::new(x, frame.y_max));
        let bottom = frame.to_px(Point::new(x, 0.0));
        commands.push(RenderCommand::DrawLine {
            from: top,
            to: bottom,
            color: ThemeToken::Grid,
            width: GRID_WIDTH,
            line_index: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(bottom.x, bottom.y + FONT_SIZE + 4.0),
            text: format_tick(x),
            color: ThemeToken::TextSecondary,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
            rotation: 0.0,
        });
        x += step;
    }

    let mut y = 0.0;
    while y <= frame.y_max {
        let left = frame.to_px(Point::new(0.0, y));
        let right = frame.to_px(Point::new(frame.x_max, y));
        commands.push(RenderCommand::DrawLine {
            from: left,
            to: right,
            color: ThemeToken::Grid,
            width: GRID_WIDTH,
            line_index: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(left.x - 4.0, left.y + FONT_SIZE / 3.0),
            text: format_tick(y),
            color: ThemeToken::TextSecondary,
            font_size: FONT_SIZE,
            align: TextAlign::Right,
            rotation: 0.0,
        });
        y += step;
    }
}

fn push_titles(commands: &mut Vec<RenderCommand>, frame: &PlotFrame, title: &str) {
    let plot = frame.plot;
    commands.push(RenderCommand::DrawText {
        position: Point::new(plot.x + plot.w / 2.0, plot.y - 12.0),
        text: title.to_string(),
        color: ThemeToken::TextPrimary,
        font_size: TITLE_FONT_SIZE,
        align: TextAlign::Center,
        rotation: 0.0,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(plot.x + plot.w / 2.0, plot.bottom() + 34.0),
        text: "Width".to_string(),
        color: ThemeToken::TextPrimary,
        font_size: FONT_SIZE,
        align: TextAlign::Center,
        rotation: 0.0,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(plot.x - 42.0, plot.y + plot.h / 2.0),
        text: "Height".to_string(),
        color: ThemeToken::TextPrimary,
        font_size: FONT_SIZE,
        align: TextAlign::Center,
        rotation: -90.0,
    });
}

/// Smallest 1/2/5 x 10^k step at or above `raw`.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    for m in [1.0, 2.0, 5.0] {
        if m * magnitude >= raw {
            return m * magnitude;
        }
    }
    10.0 * magnitude
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}
