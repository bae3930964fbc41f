use chrono::{Local, NaiveDate};
use std::fs;
use std::path::Path;

use crate::error::{Result, ValidationError};
use crate::models::Event;

/// Utility functions for the skillstack client

// ===== STRING UTILITIES =====

/// Truncates a string to a maximum number of characters, adding "..." if truncated
pub fn truncate_string(s: &str, max_length: usize) -> String {
    if s.chars().count() <= max_length {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Checks if a string is empty or contains only whitespace
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// ===== DATE UTILITIES =====

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"];

/// The viewer's current calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a date in YYYY-MM-DD, YYYY.MM.DD or YYYY/MM/DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let trimmed = date_str.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::InvalidDateFormat(date_str.to_string()).into())
}

/// Parses an optional date argument, defaulting to today
pub fn date_or_today(date_str: Option<&str>) -> Result<NaiveDate> {
    match date_str {
        Some(d) => parse_date(d),
        None => Ok(today()),
    }
}

// ===== EVENT FILES =====

/// Reads a JSON array of events, as returned by `GET /events/`
pub fn load_events_file(path: &Path) -> Result<Vec<Event>> {
    let data = fs::read_to_string(path)?;
    let events: Vec<Event> = serde_json::from_str(&data)?;
    tracing::debug!(path = %path.display(), count = events.len(), "loaded events from file");
    Ok(events)
}
