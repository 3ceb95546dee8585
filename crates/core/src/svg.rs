//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use linescale_protocol::{LineColor, RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );

    let mut clip_count = 0usize;
    let mut clip_open = false;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(svg, r#" stroke="{}""#, resolve_color(*border, dark));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                ..
            } => {
                let stroke = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}" stroke-linecap="round"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                ring,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}""#,
                    center.x, center.y,
                );
                if let Some(ring) = ring {
                    let _ = write!(
                        svg,
                        r#" stroke="{}" stroke-width="2""#,
                        resolve_color(*ring, dark)
                    );
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                rotation,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}""#,
                    position.x, position.y,
                );
                if *rotation != 0.0 {
                    let _ = write!(
                        svg,
                        r#" transform="rotate({rotation} {} {})""#,
                        position.x, position.y
                    );
                }
                let _ = write!(svg, ">{}</text>", escape_xml(text));
            }
            RenderCommand::SetClip { rect } => {
                if clip_open {
                    svg.push_str("</g>");
                }
                clip_count += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clip_count}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_count})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                clip_open = true;
            }
            RenderCommand::ClearClip => {
                if clip_open {
                    svg.push_str("</g>");
                    clip_open = false;
                }
            }
            RenderCommand::BeginGroup { id, label } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    if clip_open {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

/// CSS colour for a palette entry. Same in both themes so a line keeps its
/// colour between the results table and the plot.
pub fn line_css_color(color: LineColor) -> &'static str {
    match color {
        LineColor::Blue => "#1f77b4",
        LineColor::Green => "#2ca02c",
        LineColor::Red => "#d62728",
        LineColor::Cyan => "#17becf",
        LineColor::Magenta => "#e377c2",
        LineColor::Yellow => "#e6c619",
        LineColor::Purple => "#9467bd",
        LineColor::Orange => "#ff7f0e",
        LineColor::Brown => "#8c564b",
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if let ThemeToken::Line(color) = token {
        return line_css_color(color);
    }
    if dark {
        match token {
            ThemeToken::Background => "#181818",
            ThemeToken::PlotBackground => "#1f1f1f",
            ThemeToken::Grid => "#3a3a3a",
            ThemeToken::AreaFrame | ThemeToken::TextPrimary => "#ececec",
            ThemeToken::AreaLabel => "#64b5f6",
            ThemeToken::OutOfBounds => "#ffa726",
            ThemeToken::TextSecondary => "#9e9e9e",
            ThemeToken::Line(_) => "#616161",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::PlotBackground => "#ffffff",
            ThemeToken::Grid => "#dee2e6",
            ThemeToken::AreaFrame | ThemeToken::TextPrimary => "#000000",
            ThemeToken::AreaLabel => "#1f4fd1",
            ThemeToken::OutOfBounds => "#ff8c00",
            ThemeToken::TextSecondary => "#666677",
            ThemeToken::Line(_) => "#999999",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
