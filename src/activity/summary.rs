use chrono::NaiveDate;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::aggregate::{aggregate, DayBucket};
use super::heatmap::bar_percent;
use super::labels::DayLabeler;
use super::sparkline::{ChartDimensions, SparklineGeometry};
use crate::models::Event;

/// One row of the per-day heat bars
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRow {
    pub iso_date: String,
    pub label: String,
    pub day_number: u32,
    pub count: u32,
    pub bar_percent: u8,
}

/// Everything needed to draw the 7-day activity widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub today: NaiveDate,
    pub days: Vec<DayRow>,
    pub total: u32,
    /// Busiest day's count, never below 1
    pub max_count: u32,
    pub sparkline: SparklineGeometry,
}

impl ActivitySummary {
    pub fn compose(
        events: &[Event],
        today: NaiveDate,
        labeler: &DayLabeler,
        dimensions: ChartDimensions,
    ) -> Self {
        let buckets = aggregate(events, today, labeler);
        let counts: Vec<u32> = buckets.iter().map(|b| b.count).collect();

        let total = counts.iter().sum();
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

        let sparkline = SparklineGeometry::build(&counts, max_count, dimensions);
        let days = buckets
            .into_iter()
            .map(|bucket| DayRow::from_bucket(bucket, max_count))
            .collect();

        tracing::debug!(
            events = events.len(),
            total,
            max_count,
            today = %today,
            "activity summary composed"
        );

        Self {
            today,
            days,
            total,
            max_count,
            sparkline,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl DayRow {
    fn from_bucket(bucket: DayBucket, max_count: u32) -> Self {
        Self {
            bar_percent: bar_percent(bucket.count, max_count),
            iso_date: bucket.iso_date,
            label: bucket.label,
            day_number: bucket.day_number,
            count: bucket.count,
        }
    }
}

/// Activity composer that skips recomputation while its input is unchanged
///
/// The cache key is a hash of every event's date plus the reference date,
/// so a redraw loop only pays for aggregation when the data or day changes.
#[derive(Debug, Clone)]
pub struct ActivityWidget {
    labeler: DayLabeler,
    dimensions: ChartDimensions,
    cached: Option<(u64, ActivitySummary)>,
}

impl ActivityWidget {
    pub fn new(labeler: DayLabeler, dimensions: ChartDimensions) -> Self {
        Self {
            labeler,
            dimensions,
            cached: None,
        }
    }

    pub fn summarize(&mut self, events: &[Event], today: NaiveDate) -> &ActivitySummary {
        let key = input_key(events, today);

        if !matches!(&self.cached, Some((cached_key, _)) if *cached_key == key) {
            self.cached = None;
        }

        let (_, summary) = self.cached.get_or_insert_with(|| {
            (
                key,
                ActivitySummary::compose(events, today, &self.labeler, self.dimensions),
            )
        });
        summary
    }

    /// Most recently computed summary, if any
    pub fn last(&self) -> Option<&ActivitySummary> {
        self.cached.as_ref().map(|(_, summary)| summary)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

fn input_key(events: &[Event], today: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    today.hash(&mut hasher);
    events.len().hash(&mut hasher);
    for event in events {
        event.date.hash(&mut hasher);
    }
    hasher.finish()
}
