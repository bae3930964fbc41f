//! Utility functions for the dashboard UI

use super::messages::MessageType;
use ratatui::style::{Color, Style};

/// Orange used for the sparkline and the busiest bars
pub const ACCENT: Color = Color::Rgb(255, 153, 0);

/// Bar color for a day, by its share of the busiest day
pub fn get_heat_color(bar_percent: u8) -> Color {
    match bar_percent {
        0 => Color::DarkGray,
        1..=33 => Color::Rgb(255, 216, 155),
        34..=66 => Color::Rgb(255, 185, 80),
        _ => ACCENT,
    }
}

/// Color for a skill's progress badge
pub fn get_progress_color(progress: &str) -> Color {
    match progress {
        "completed" => Color::Green,
        "in-progress" => Color::Blue,
        _ => Color::Gray,
    }
}

/// Get style for message type
pub fn get_message_style(message_type: MessageType) -> Style {
    match message_type {
        MessageType::Info => Style::default().fg(Color::Cyan),
        MessageType::Success => Style::default().fg(Color::Green),
        MessageType::Warning => Style::default().fg(Color::Yellow),
        MessageType::Error => Style::default().fg(Color::Red),
    }
}
