//! Sparkline geometry: per-day counts mapped into a padded drawing area

use serde::{Deserialize, Serialize};

/// Pixel size of the sparkline drawing area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 36.0,
            padding: 4.0,
        }
    }
}

impl ChartDimensions {
    pub fn inner_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.padding * 2.0
    }

    /// y coordinate of the zero line
    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Polyline for the stroke plus the closed outline of the filled area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparklineGeometry {
    pub dimensions: ChartDimensions,
    /// One point per day, left to right
    pub points: Vec<Point>,
    /// `points` followed by the bottom-right and bottom-left corners
    pub area: Vec<Point>,
}

impl SparklineGeometry {
    /// Map counts to chart coordinates; y grows downward
    ///
    /// `max_count` is floored at 1 so an all-zero window stays on the baseline.
    pub fn build(counts: &[u32], max_count: u32, dimensions: ChartDimensions) -> Self {
        let max = f64::from(max_count.max(1));
        let pad = dimensions.padding;
        let steps = counts.len().saturating_sub(1).max(1) as f64;

        let points: Vec<Point> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Point {
                x: pad + (i as f64 / steps) * dimensions.inner_width(),
                y: pad + (1.0 - f64::from(count) / max) * dimensions.inner_height(),
            })
            .collect();

        let mut area = points.clone();
        area.push(Point {
            x: dimensions.width - pad,
            y: dimensions.baseline(),
        });
        area.push(Point {
            x: pad,
            y: dimensions.baseline(),
        });

        Self {
            dimensions,
            points,
            area,
        }
    }

    /// Points as an SVG `points` attribute value ("x,y x,y ...")
    pub fn points_attr(&self) -> String {
        join_points(&self.points)
    }

    pub fn area_attr(&self) -> String {
        join_points(&self.area)
    }
}

fn join_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
