// Library-level tests for the 7-day activity widget
// Events are built from JSON the way the backend returns them

use chrono::{Duration, NaiveDate};
use serde_json::json;
use skillstack::activity::{ActivitySummary, ActivityWidget, ChartDimensions, DayLabeler};
use skillstack::models::Event;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn events_from(value: serde_json::Value) -> Vec<Event> {
    serde_json::from_value(value).unwrap()
}

fn compose(events: &[Event], today: NaiveDate) -> ActivitySummary {
    ActivitySummary::compose(events, today, &DayLabeler::default(), ChartDimensions::default())
}

/// A handful of event lists covering the interesting shapes
fn sample_inputs() -> Vec<Vec<Event>> {
    vec![
        Vec::new(),
        events_from(json!([
            {"id": 1, "date": "2024-01-10", "title": "a"},
            {"id": 2, "date": "2024-01-10", "title": "b"},
            {"id": 3, "date": "2024-01-12", "title": "c"}
        ])),
        events_from(json!([
            {"id": 1, "date": "2023-12-01", "title": "too old"},
            {"id": 2, "date": "2024-01-13", "title": "tomorrow"},
            {"id": 3, "date": null, "title": "undated"},
            {"id": 4, "date": "garbage", "title": "bad"}
        ])),
        events_from(json!([
            {"id": 1, "date": "2024-01-06", "title": "a"},
            {"id": 2, "date": "2024-01-07", "title": "b"},
            {"id": 3, "date": "2024-01-08", "title": "c"},
            {"id": 4, "date": "2024-01-09", "title": "d"},
            {"id": 5, "date": "2024-01-10", "title": "e"},
            {"id": 6, "date": "2024-01-11", "title": "f"},
            {"id": 7, "date": "2024-01-12", "title": "g"}
        ])),
        events_from(json!([
            {"id": "x", "date": "2024-01-08", "title": "a", "duration_minutes": 45},
            {"id": "y", "date": "2024-01-08", "title": "b"},
            {"id": "z", "date": "2024-01-08", "title": "c"},
            {"id": "w", "date": "2024-01-11", "title": "d"}
        ])),
    ]
}

#[test]
fn test_example_two_busy_days() {
    let events = events_from(json!([
        {"id": 1, "date": "2024-01-10", "title": "Scales"},
        {"id": 2, "date": "2024-01-10", "title": "Arpeggios"},
        {"id": 3, "date": "2024-01-12", "title": "Sight reading"}
    ]));
    let summary = compose(&events, day(2024, 1, 12));

    let counts: Vec<(&str, u32)> = summary
        .days
        .iter()
        .map(|d| (d.iso_date.as_str(), d.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("2024-01-06", 0),
            ("2024-01-07", 0),
            ("2024-01-08", 0),
            ("2024-01-09", 0),
            ("2024-01-10", 2),
            ("2024-01-11", 0),
            ("2024-01-12", 1),
        ]
    );
    assert_eq!(summary.total, 3);
    assert_eq!(summary.max_count, 2);
    assert_eq!(summary.days[4].bar_percent, 100);
    assert_eq!(summary.days[6].bar_percent, 50);
}

#[test]
fn test_example_no_events() {
    let summary = compose(&[], day(2024, 1, 12));

    assert_eq!(summary.days.len(), 7);
    assert!(summary.days.iter().all(|d| d.count == 0 && d.bar_percent == 0));
    assert_eq!(summary.total, 0);
    assert_eq!(summary.max_count, 1);
}

#[test]
fn test_window_is_seven_contiguous_days_ending_today() {
    let today = day(2024, 1, 12);
    for events in sample_inputs() {
        let summary = compose(&events, today);
        assert_eq!(summary.days.len(), 7);

        for (i, row) in summary.days.iter().enumerate() {
            let expected = today - Duration::days(6 - i as i64);
            assert_eq!(row.iso_date, expected.format("%Y-%m-%d").to_string());
        }
    }
}

#[test]
fn test_total_matches_bucket_sum() {
    for events in sample_inputs() {
        let summary = compose(&events, day(2024, 1, 12));
        let sum: u32 = summary.days.iter().map(|d| d.count).sum();
        assert_eq!(summary.total, sum);
        assert!(summary.max_count >= 1);
    }
}

#[test]
fn test_events_outside_window_contribute_nothing() {
    let events = &sample_inputs()[2];
    let summary = compose(events, day(2024, 1, 12));
    assert_eq!(summary.total, 0);
    assert!(summary.is_empty());
}

#[test]
fn test_bar_percent_bounds() {
    for events in sample_inputs() {
        let summary = compose(&events, day(2024, 1, 12));
        for row in &summary.days {
            assert!(row.bar_percent <= 100);
            if summary.total > 0 && row.count == summary.max_count {
                assert_eq!(row.bar_percent, 100);
            }
        }
    }
}

#[test]
fn test_geometry_spacing_and_floor() {
    for events in sample_inputs() {
        let summary = compose(&events, day(2024, 1, 12));
        let points = &summary.sparkline.points;
        assert_eq!(points.len(), 7);

        let step = points[1].x - points[0].x;
        assert!(step > 0.0);
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x - step).abs() < 1e-9);
        }

        let min_count = summary.days.iter().map(|d| d.count).min().unwrap();
        let lowest_y = summary
            .days
            .iter()
            .zip(points)
            .filter(|(d, _)| d.count == min_count)
            .map(|(_, p)| p.y)
            .fold(f64::MIN, f64::max);
        assert!(points.iter().all(|p| p.y <= lowest_y));
    }
}

#[test]
fn test_compose_is_idempotent() {
    for events in sample_inputs() {
        let first = compose(&events, day(2024, 1, 12));
        let second = compose(&events, day(2024, 1, 12));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_widget_matches_compose() {
    let mut widget = ActivityWidget::new(DayLabeler::default(), ChartDimensions::default());
    let today = day(2024, 1, 12);

    for events in sample_inputs() {
        let expected = compose(&events, today);
        assert_eq!(widget.summarize(&events, today), &expected);
        assert_eq!(widget.last(), Some(&expected));
    }
}

#[test]
fn test_widget_follows_reference_date() {
    let events = &sample_inputs()[1];
    let mut widget = ActivityWidget::new(DayLabeler::default(), ChartDimensions::default());

    assert_eq!(widget.summarize(events, day(2024, 1, 12)).total, 3);
    // A week later the same events have dropped out of the window
    assert_eq!(widget.summarize(events, day(2024, 1, 19)).total, 0);
}
