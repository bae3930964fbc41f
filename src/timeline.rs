//! Events grouped by day for the timeline view

use crate::models::Event;

/// Heading used for events that carry no date
pub const UNDATED: &str = "undated";

/// All events logged on one date
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: &'a str,
    pub events: Vec<&'a Event>,
}

impl DateGroup<'_> {
    pub fn total_minutes(&self) -> i64 {
        self.events
            .iter()
            .filter_map(|e| e.duration_minutes)
            .sum()
    }
}

/// Group events by their date string, newest date first
///
/// Events keep their input order within a group. Events without a date
/// are collected into a trailing group headed [`UNDATED`].
pub fn group_by_date(events: &[Event]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();
    let mut undated: Vec<&Event> = Vec::new();

    for event in events {
        match event.date.as_deref() {
            Some(date) if !date.is_empty() => {
                match groups.iter().position(|g| g.date == date) {
                    Some(pos) => groups[pos].events.push(event),
                    None => groups.push(DateGroup {
                        date,
                        events: vec![event],
                    }),
                }
            }
            _ => undated.push(event),
        }
    }

    // ISO dates sort chronologically as strings
    groups.sort_by(|a, b| b.date.cmp(a.date));

    if !undated.is_empty() {
        groups.push(DateGroup {
            date: UNDATED,
            events: undated,
        });
    }

    groups
}

/// The `limit` most recent events, as listed under the activity card
pub fn recent(events: &[Event], limit: usize) -> Vec<&Event> {
    group_by_date(events)
        .into_iter()
        .flat_map(|group| group.events)
        .take(limit)
        .collect()
}
