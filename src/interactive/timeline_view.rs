//! Timeline panel: events grouped by date, newest first

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::timeline::group_by_date;
use crate::utils::truncate_string;

use super::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let groups = group_by_date(&app.events);

    let mut lines = Vec::new();
    let mut selected_line = 0usize;
    let mut index = 0usize;

    if groups.is_empty() {
        lines.push(Line::from(Span::styled(
            "No activities yet.",
            Style::default().fg(Color::Gray),
        )));
    }

    for group in &groups {
        lines.push(Line::from(vec![
            Span::styled(
                group.date.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} min", group.total_minutes()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        for event in &group.events {
            let is_selected = app.selected_event == Some(index);
            if is_selected {
                selected_line = lines.len();
            }

            let mut style = Style::default();
            if is_selected {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }

            let minutes = event
                .duration_minutes
                .map(|m| format!("{} min", m))
                .unwrap_or_default();

            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(truncate_string(&event.title, 40), style),
                Span::styled(format!("  {}", minutes), Style::default().fg(Color::Yellow)),
            ]));

            if let Some(notes) = event.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", truncate_string(notes, 60)),
                    Style::default().fg(Color::Gray),
                )));
            }

            index += 1;
        }
        lines.push(Line::from(""));
    }

    // Keep the selection on screen
    let visible = area.height.saturating_sub(2) as usize;
    let offset = selected_line.saturating_sub(visible.saturating_sub(1));

    let title = format!(" Timeline ({} events) ", app.events.len());
    let paragraph = Paragraph::new(lines)
        .scroll((offset as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(paragraph, area);
}
