//! Main UI rendering logic

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Progress;
use crate::skills::format_hours;

use super::app::{App, AppMode};
use super::utils::{get_message_style, get_progress_color};
use super::{activity_panel, timeline_view};

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(16),   // Main content
            Constraint::Length(5), // Messages
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, app, chunks[0]);

    match app.mode {
        AppMode::Help => render_help(f, chunks[1]),
        _ => render_main_content(f, app, chunks[1]),
    }

    render_messages(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " SkillStack - {} skills, {} hours - {} ",
        app.stats.total_skills,
        format_hours(app.stats.total_hours),
        app.client.base_url()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(15), // Activity card
            Constraint::Min(5),     // Skills overview
        ])
        .split(columns[0]);

    activity_panel::render(f, app, left[0]);
    render_skills(f, app, left[1]);
    timeline_view::render(f, app, columns[1]);
}

/// Overview counts plus the most recent skills
fn render_skills(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(
        Progress::ALL
            .iter()
            .flat_map(|p| {
                [
                    Span::styled(
                        format!("{} ", p.label()),
                        Style::default().fg(get_progress_color(p.as_str())),
                    ),
                    Span::styled(
                        format!("{}   ", app.stats.count(*p)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]
            })
            .collect::<Vec<_>>(),
    )];
    lines.push(Line::from(""));

    if app.skills.is_empty() {
        lines.push(Line::from(Span::styled(
            "No skills yet",
            Style::default().fg(Color::Gray),
        )));
    }

    for skill in &app.skills {
        let progress = skill.progress.as_deref().unwrap_or("started");
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<20} ", crate::utils::truncate_string(&skill.name, 20)),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:<12}", progress),
                Style::default().fg(get_progress_color(progress)),
            ),
            Span::styled(
                format!("{}h", format_hours(skill.hours_spent.unwrap_or(0.0))),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Skills ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("  ↑/↓ or k/j    Select timeline event"),
        Line::from("  Home          Jump to newest event"),
        Line::from("  d / Del       Delete selected event (confirm with y)"),
        Line::from("  r             Re-fetch events and skills"),
        Line::from("  ?             This help"),
        Line::from("  q / Esc       Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "The activity card counts events per day over the last 7 days.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for msg in app.messages.iter().rev().take(3).collect::<Vec<_>>().into_iter().rev() {
        let style = get_message_style(msg.message_type);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", msg.icon()), style),
            Span::styled(msg.text.as_str(), style),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ready",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.mode {
        AppMode::Normal => "[↑↓] Select  [d]elete  [r]efresh  [?] help  [q]uit",
        AppMode::DeleteEvent => "[y] Confirm  [any other key] Cancel",
        AppMode::Help => "Press any key to return",
    };

    let footer = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(footer, area);
}
