// Hover state and tooltip placement
use crate::domain::geometry::{Canvas, ChartPoint};
use crate::domain::metric::MetricKey;

pub const TOOLTIP_WIDTH: f64 = 120.0;
pub const TOOLTIP_HEIGHT: f64 = 34.0;

/// Preferred distance the tooltip floats above the hovered point.
const TOOLTIP_LIFT: f64 = 46.0;
const TOOLTIP_TOP_MARGIN: f64 = 4.0;

/// Anchor for a tooltip, clamped so it never overflows the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub center_x: f64,
    pub top_y: f64,
}

pub fn resolve(point: &ChartPoint, canvas: &Canvas) -> TooltipAnchor {
    let min_x = canvas.padding.left + TOOLTIP_WIDTH / 2.0;
    let max_x = canvas.width - canvas.padding.right - TOOLTIP_WIDTH / 2.0;
    let center_x = point.x.clamp(min_x, max_x);
    let top_y = (point.y - TOOLTIP_LIFT).max(canvas.padding.top + TOOLTIP_TOP_MARGIN);
    TooltipAnchor { center_x, top_y }
}

/// The hovered data point and the metric it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    pub metric: MetricKey,
    pub point: ChartPoint,
}

/// At most one hover is active at a time. A hover recorded for one
/// metric never resolves while another metric is selected.
#[derive(Debug, Default)]
pub struct HoverState {
    active: Option<Hover>,
}

impl HoverState {
    pub fn enter(&mut self, metric: MetricKey, point: ChartPoint) {
        self.active = Some(Hover { metric, point });
    }

    pub fn leave(&mut self) {
        self.active = None;
    }

    pub fn active_for(&self, selected: MetricKey) -> Option<&Hover> {
        self.active.as_ref().filter(|hover| hover.metric == selected)
    }
}
