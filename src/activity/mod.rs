//! The 7-day activity widget
//!
//! Events are bucketed per day over the trailing week, then turned into a
//! sparkline and one heat bar per day. Everything here is pure: the same
//! events and reference date always give the same summary.

pub mod aggregate;
pub mod heatmap;
pub mod labels;
pub mod sparkline;
pub mod summary;

pub use aggregate::{aggregate, DayBucket};
pub use heatmap::bar_percent;
pub use labels::DayLabeler;
pub use sparkline::{ChartDimensions, Point, SparklineGeometry};
pub use summary::{ActivitySummary, ActivityWidget, DayRow};

/// Number of days covered by the widget, ending today
pub const WINDOW_DAYS: usize = 7;
