/// Bar fill for a day, as a whole percentage of the busiest day
///
/// `max_count` is floored at 1; a count above it saturates at 100.
pub fn bar_percent(count: u32, max_count: u32) -> u8 {
    let max = f64::from(max_count.max(1));
    let percent = (f64::from(count) / max * 100.0).round();
    percent.min(100.0) as u8
}

/// Number of filled cells for a bar `width` cells wide
pub fn bar_cells(percent: u8, width: usize) -> usize {
    (usize::from(percent.min(100)) * width + 50) / 100
}
