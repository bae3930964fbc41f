use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use super::labels::DayLabeler;
use super::WINDOW_DAYS;
use crate::models::Event;

/// Event count for one calendar day of the trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub iso_date: String,
    pub label: String,
    pub day_number: u32,
    pub count: u32,
}

/// Bucket events into the 7 days ending at `today`, oldest first
///
/// Events without a usable date or outside the window do not count.
/// Events sharing a date all count toward that day.
pub fn aggregate(events: &[Event], today: NaiveDate, labeler: &DayLabeler) -> Vec<DayBucket> {
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for day in events.iter().filter_map(Event::day) {
        *counts.entry(day).or_insert(0) += 1;
    }

    (0..WINDOW_DAYS as i64)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (label, day_number) = labeler.label(date);
            DayBucket {
                iso_date: date.format("%Y-%m-%d").to_string(),
                label,
                day_number,
                count: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
