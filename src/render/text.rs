//! Plain-text rendering of the activity summary for the CLI

use crate::activity::heatmap::bar_cells;
use crate::activity::ActivitySummary;

/// Width of a full (100%) heat bar, in characters
pub const BAR_WIDTH: usize = 30;

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per day, scaled against the busiest day
pub fn sparkline_chars(summary: &ActivitySummary) -> String {
    let max = f64::from(summary.max_count.max(1));
    summary
        .days
        .iter()
        .map(|day| {
            let level = (f64::from(day.count) / max * (LEVELS.len() - 1) as f64).round() as usize;
            LEVELS[level.min(LEVELS.len() - 1)]
        })
        .collect()
}

/// Render the widget as terminal lines: header, sparkline, one bar per day
pub fn render(summary: &ActivitySummary) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Activity (last 7 days){:>width$}",
            format!("{} activities", summary.total),
            width = BAR_WIDTH
        ),
        format!(
            "{}   {} total  Max/day: {}",
            sparkline_chars(summary),
            summary.total,
            summary.max_count
        ),
        String::new(),
    ];

    for day in &summary.days {
        let filled = bar_cells(day.bar_percent, BAR_WIDTH);
        lines.push(format!(
            "{:<5} {:>2}  {}{} {:>3}",
            day.label,
            day.day_number,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            day.count
        ));
    }

    if summary.is_empty() {
        lines.push(String::new());
        lines.push("No recent activity".to_string());
    }

    lines
}
