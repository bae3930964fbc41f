//! Activity panel: braille sparkline, totals and one heat bar per day

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::activity::heatmap::bar_cells;
use crate::activity::ActivitySummary;

use super::app::App;
use super::utils::{get_heat_color, ACCENT};

/// Label, day number and count columns around each bar
const ROW_CHROME: u16 = 14;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let Some(summary) = app.activity.last() else {
        let placeholder = Paragraph::new("No activity computed yet")
            .style(Style::default().fg(Color::Gray))
            .block(panel_block(0));
        f.render_widget(placeholder, area);
        return;
    };

    let block = panel_block(summary.total);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Sparkline
            Constraint::Length(1), // Totals
            Constraint::Min(7),    // Day bars
        ])
        .split(inner);

    render_sparkline(f, summary, chunks[0]);
    render_totals(f, summary, chunks[1]);
    render_bars(f, summary, chunks[2]);
}

fn panel_block(total: u32) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" Activity (last 7 days) ")
        .title(
            ratatui::widgets::block::Title::from(format!(" {} activities ", total))
                .alignment(ratatui::layout::Alignment::Right),
        )
        .border_style(Style::default().fg(Color::Cyan))
}

/// Draw the polyline on a canvas sized to the chart dimensions
///
/// Chart y grows downward while canvas y grows upward, so y is flipped.
fn render_sparkline(f: &mut Frame, summary: &ActivitySummary, area: Rect) {
    let geometry = &summary.sparkline;
    let dims = geometry.dimensions;
    let flip = |y: f64| dims.height - y;

    let markers: Vec<(f64, f64)> = geometry.points.iter().map(|p| (p.x, flip(p.y))).collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, dims.width])
        .y_bounds([0.0, dims.height])
        .paint(|ctx| {
            // Closing edges of the filled area: the baseline
            if let [.., right, left] = geometry.area.as_slice() {
                ctx.draw(&CanvasLine {
                    x1: left.x,
                    y1: flip(left.y),
                    x2: right.x,
                    y2: flip(right.y),
                    color: Color::DarkGray,
                });
            }
            ctx.layer();

            for pair in geometry.points.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].x,
                    y1: flip(pair[0].y),
                    x2: pair[1].x,
                    y2: flip(pair[1].y),
                    color: ACCENT,
                });
            }
            ctx.draw(&Points {
                coords: &markers,
                color: Color::White,
            });
        });

    f.render_widget(canvas, area);
}

fn render_totals(f: &mut Frame, summary: &ActivitySummary, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} total", summary.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Max/day: {}", summary.max_count),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_bars(f: &mut Frame, summary: &ActivitySummary, area: Rect) {
    let bar_width = area.width.saturating_sub(ROW_CHROME) as usize;

    let lines: Vec<Line> = summary
        .days
        .iter()
        .map(|day| {
            let filled = bar_cells(day.bar_percent, bar_width);
            let color = get_heat_color(day.bar_percent);
            Line::from(vec![
                Span::styled(
                    format!("{:<5}", day.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>2} ", day.day_number),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(bar_width - filled),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!(" {:>3}", day.count),
                    Style::default().fg(Color::White),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
