// Chart geometry engine - axis scaling, point projection and path building
use crate::domain::metric::MetricKey;
use crate::domain::train::TimelinePoint;

/// Canvas for the per-metric history charts.
pub const FULL_CHART: Canvas = Canvas {
    width: 640.0,
    height: 220.0,
    padding: Padding {
        top: 20.0,
        right: 20.0,
        bottom: 40.0,
        left: 50.0,
    },
};

/// Canvas for the compact recent-energy chart.
pub const COMPACT_CHART: Canvas = Canvas {
    width: 280.0,
    height: 130.0,
    padding: Padding {
        top: 12.0,
        right: 12.0,
        bottom: 20.0,
        left: 12.0,
    },
};

/// The compact chart only shows the trailing window of the timeline.
const COMPACT_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Canvas {
    pub fn inner_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }
}

/// One projected sample, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub timestamp: String,
    pub value: f64,
}

/// Derived chart geometry, fully recomputed from the timeline on each build.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub canvas: Canvas,
    pub points: Vec<ChartPoint>,
    pub path: String,
    pub min: f64,
    pub max: f64,
}

/// Readable y-axis range for a numeric series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl AxisScale {
    /// Compute the axis range: 10% headroom over the peak, rounded up to
    /// the next multiple of 10 so tick labels stay readable. The range is
    /// never below 1, so normalization cannot divide by zero.
    pub fn from_values(values: &[f64]) -> Self {
        let raw_max = values.iter().copied().fold(1.0_f64, f64::max);
        let max = (raw_max * 1.1 / 10.0).ceil() * 10.0;
        let min = 0.0;
        let range = (max - min).max(1.0);
        Self { min, max, range }
    }
}

/// Project one metric's full timeline onto the 640x220 chart.
///
/// Samples are spaced evenly left to right in arrival order (ordinal
/// spacing, not time-proportional); a single sample lands on the left
/// padding edge. Returns `None` for an empty timeline.
pub fn full_chart(timeline: &[TimelinePoint], key: MetricKey) -> Option<ChartGeometry> {
    if timeline.is_empty() {
        return None;
    }

    let canvas = FULL_CHART;
    let values: Vec<f64> = timeline.iter().map(|point| point.value(key)).collect();
    let scale = AxisScale::from_values(&values);
    let step = canvas.inner_width() / (timeline.len() - 1).max(1) as f64;

    let points: Vec<ChartPoint> = timeline
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(index, (point, &value))| {
            let x = canvas.padding.left + index as f64 * step;
            let normalized = (value - scale.min) / scale.range;
            let y = canvas.padding.top + canvas.inner_height() - normalized * canvas.inner_height();
            ChartPoint {
                x,
                y,
                timestamp: point.timestamp.clone(),
                value,
            }
        })
        .collect();

    let path = svg_path(&points);
    Some(ChartGeometry {
        canvas,
        points,
        path,
        min: scale.min,
        max: scale.max,
    })
}

/// Project the trailing energy window onto the 280x130 compact chart.
///
/// The range comes from the raw min/max of the window itself rather than
/// the rounded axis scale: this chart trades a stable long-run axis for
/// visual contrast within the recent window.
pub fn compact_energy_chart(timeline: &[TimelinePoint]) -> Option<ChartGeometry> {
    if timeline.is_empty() {
        return None;
    }

    let canvas = COMPACT_CHART;
    let window = &timeline[timeline.len().saturating_sub(COMPACT_WINDOW)..];
    let values: Vec<f64> = window
        .iter()
        .map(|point| point.value(MetricKey::EnergiaKwh))
        .collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = (max - min).max(1.0);
    let step = canvas.inner_width() / (window.len() - 1).max(1) as f64;

    let points: Vec<ChartPoint> = window
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(index, (point, &value))| {
            let x = canvas.padding.left + index as f64 * step;
            let normalized = (value - min) / range;
            let y = canvas.padding.top + (1.0 - normalized) * canvas.inner_height();
            ChartPoint {
                x,
                y,
                timestamp: point.timestamp.clone(),
                value,
            }
        })
        .collect();

    let path = svg_path(&points);
    Some(ChartGeometry {
        canvas,
        points,
        path,
        min,
        max,
    })
}

/// SVG-style path descriptor: move to the first point, line to the rest.
fn svg_path(points: &[ChartPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let command = if index == 0 { "M" } else { "L" };
            format!("{} {} {}", command, point.x, point.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
