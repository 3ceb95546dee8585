use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use linescale_core::views::{ScaleReport, render_plot};
use linescale_protocol::{LineColor, Point, RenderCommand, ThemeToken, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::table::{HEADERS, row_cells};

/// Viewport units per terminal column / row.
const CELL_W: f64 = 10.0;
const CELL_H: f64 = 20.0;

fn theme_to_color(token: &ThemeToken) -> Color {
    match token {
        ThemeToken::Line(line) => match line {
            LineColor::Blue => Color::Blue,
            LineColor::Green => Color::Green,
            LineColor::Red => Color::Red,
            LineColor::Cyan => Color::Cyan,
            LineColor::Magenta => Color::Magenta,
            LineColor::Yellow => Color::Yellow,
            LineColor::Purple => Color::Rgb(148, 103, 189),
            LineColor::Orange => Color::Rgb(255, 127, 14),
            LineColor::Brown => Color::Rgb(140, 86, 75),
        },
        ThemeToken::Background | ThemeToken::PlotBackground => Color::Black,
        ThemeToken::Grid => Color::DarkGray,
        ThemeToken::AreaFrame | ThemeToken::TextPrimary => Color::White,
        ThemeToken::AreaLabel => Color::LightBlue,
        ThemeToken::OutOfBounds => Color::Rgb(255, 140, 0),
        ThemeToken::TextSecondary => Color::Gray,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlotSide {
    Original,
    Scaled,
}

/// Interactive results view: the table on the left, a coarse plot of the
/// original or scaled lines on the right.
pub fn render_tui(report: &ScaleReport) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TableState::default().with_selected(Some(0));
    let mut side = PlotSide::Scaled;
    let row_count = report.rows.len();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let [header_area, body] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
            let [table_area, plot_area] =
                Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                    .areas(body);

            let header = Block::default()
                .title(format!(
                    " linescale: {} → {} | ↑↓ select | tab plot | q quit ",
                    report.old_area, report.new_area
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            frame.render_stateful_widget(results_table(report), table_area, &mut state);

            let (lines, working_area, title) = match side {
                PlotSide::Original => (&report.original, report.old_area, " Original Lines "),
                PlotSide::Scaled => (&report.scaled, report.new_area, " Scaled Lines "),
            };
            let block = Block::default().borders(Borders::ALL).title(title);
            let inner = block.inner(plot_area);
            frame.render_widget(block, plot_area);

            let viewport = Viewport::sized(
                f64::from(inner.width) * CELL_W,
                f64::from(inner.height) * CELL_H,
            );
            let cmds = render_plot(lines, working_area, &viewport, "");
            draw_commands(frame.buffer_mut(), inner, &cmds, state.selected());
        })?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down if row_count > 0 => {
                    let next = state.selected().map_or(0, |i| (i + 1).min(row_count - 1));
                    state.select(Some(next));
                }
                KeyCode::Up => {
                    let prev = state.selected().map_or(0, |i| i.saturating_sub(1));
                    state.select(Some(prev));
                }
                KeyCode::Tab => {
                    side = match side {
                        PlotSide::Original => PlotSide::Scaled,
                        PlotSide::Scaled => PlotSide::Original,
                    };
                }
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn results_table(report: &ScaleReport) -> Table<'static> {
    let flagged = Style::default()
        .fg(Color::Black)
        .bg(theme_to_color(&ThemeToken::OutOfBounds));

    let rows: Vec<Row<'static>> = report
        .rows
        .iter()
        .map(|row| {
            let color = theme_to_color(&ThemeToken::Line(row.color));
            let cells: Vec<Cell<'static>> = row_cells(row)
                .into_iter()
                .enumerate()
                .map(|(i, c)| {
                    let style = if c.flagged {
                        flagged
                    } else if i == HEADERS.len() - 1 {
                        Style::default().fg(color)
                    } else {
                        Style::default()
                    };
                    Cell::from(c.text).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = HEADERS
        .iter()
        .map(|h| Constraint::Length(h.len().max(7) as u16))
        .collect();

    Table::new(rows, widths)
        .header(
            Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    " Scaled Line Parameters (x {:.4}, y {:.4}) ",
                    report.factors.x, report.factors.y
                )),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
}

/// Rasterise plot strokes into terminal cells. Only the area frame, the
/// lines, and endpoint markers are drawn; text does not fit at this size.
fn draw_commands(buf: &mut Buffer, area: Rect, cmds: &[RenderCommand], selected: Option<usize>) {
    let to_cell = |p: Point| -> Option<(u16, u16)> {
        let col = (p.x / CELL_W).floor();
        let row = (p.y / CELL_H).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height) {
            return None;
        }
        Some((area.x + col as u16, area.y + row as u16))
    };

    for cmd in cmds {
        match cmd {
            RenderCommand::DrawLine {
                from,
                to,
                color,
                line_index,
                ..
            } => {
                let glyph = match (color, line_index) {
                    (ThemeToken::AreaFrame, _) => '·',
                    (_, Some(i)) if Some(*i) == selected => '█',
                    (_, Some(_)) => '•',
                    _ => continue,
                };
                let fg = theme_to_color(color);
                let window = (f64::from(area.width) * CELL_W, f64::from(area.height) * CELL_H);
                let Some((from, to)) = clip_line(*from, *to, window) else {
                    continue;
                };
                let steps = ((to.x - from.x).abs() / CELL_W)
                    .max((to.y - from.y).abs() / CELL_H)
                    .ceil()
                    .max(1.0) as usize;
                for s in 0..=steps {
                    let t = s as f64 / steps as f64;
                    let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
                    if let Some(pos) = to_cell(p) {
                        buf[pos].set_char(glyph).set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawCircle {
                center, color, ring, ..
            } => {
                if let Some(pos) = to_cell(*center) {
                    let fg = theme_to_color(ring.as_ref().unwrap_or(color));
                    let glyph = if ring.is_some() { '◉' } else { 'o' };
                    buf[pos].set_char(glyph).set_fg(fg);
                }
            }
            _ => {}
        }
    }
}

/// Clip `from`-`to` to `[0, w] x [0, h]` (Liang-Barsky). Returns `None`
/// when no part of the line is inside.
fn clip_line(from: Point, to: Point, (w, h): (f64, f64)) -> Option<(Point, Point)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, from.x), (dx, w - from.x), (-dy, from.y), (dy, h - from.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| Point::new(from.x + dx * t, from.y + dy * t);
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linescale_core::model::{LineSegment, WorkingArea};

    #[test]
    fn clip_keeps_inside_lines_whole() {
        let (a, b) = (Point::new(5.0, 5.0), Point::new(30.0, 12.0));
        assert_eq!(clip_line(a, b, (40.0, 20.0)), Some((a, b)));
    }

    #[test]
    fn clip_trims_to_window() {
        let clipped = clip_line(Point::new(-10.0, 10.0), Point::new(1e13, 10.0), (40.0, 20.0));
        let (a, b) = clipped.unwrap();
        assert!(a.x.abs() < 1e-9 && (b.x - 40.0).abs() < 1e-3);
        assert_eq!((a.y, b.y), (10.0, 10.0));
    }

    #[test]
    fn clip_drops_lines_outside() {
        assert_eq!(
            clip_line(Point::new(50.0, 5.0), Point::new(90.0, 5.0), (40.0, 20.0)),
            None
        );
        assert_eq!(
            clip_line(Point::new(-5.0, 30.0), Point::new(60.0, 25.0), (40.0, 20.0)),
            None
        );
    }

    #[test]
    fn far_away_line_rasterises_within_the_buffer() {
        let cmds = render_plot(
            &[LineSegment::from_coords(0.0, 0.0, 1e13, 0.0)],
            WorkingArea::new(1300.0, 1100.0),
            &Viewport::sized(400.0, 400.0),
            "Scaled Lines",
        );
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        draw_commands(&mut buf, area, &cmds, Some(0));
        let drawn = buf.content().iter().filter(|c| c.symbol() == "█").count();
        assert!(drawn > 0);
        assert!(drawn <= usize::from(area.width));
    }
}
