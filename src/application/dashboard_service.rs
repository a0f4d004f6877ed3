// Dashboard service - assembles the view the presentation layer renders
use std::collections::HashMap;

use crate::application::poller::{SnapshotState, UNREACHABLE_MESSAGE};
use crate::domain::animator::HeadlineValues;
use crate::domain::geometry::{self, ChartGeometry, ChartPoint};
use crate::domain::hover::{self, Hover, HoverState, TooltipAnchor};
use crate::domain::metric::{MetricDescriptor, MetricKey, power_supply_color};
use crate::domain::train::{ExtraMetric, RouteSegment, parse_extra_metrics};

/// Shown before the first snapshot has ever arrived.
pub const LOADING_MESSAGE: &str = "Recupero dati del treno...";

/// The speed progress bar tops out at this line speed.
const MAX_SPEED_KMH: f64 = 350.0;

/// Everything the presentation layer needs to render one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No snapshot yet, still waiting for the first poll.
    Loading,
    /// No snapshot has ever arrived and the backend is unreachable.
    Unavailable { message: String },
    Ready(DashboardData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub train_id: String,
    pub headline: HeadlineValues,
    pub speed_progress: f64,
    pub charts: HashMap<MetricKey, ChartGeometry>,
    pub compact_energy: Option<ChartGeometry>,
    pub selected_metric: MetricKey,
    pub tooltip: Option<ActiveTooltip>,
    pub notes: Vec<ExtraMetric>,
    pub diagnostics: Diagnostics,
    pub power_timeline: Vec<PowerChip>,
    pub route: Vec<RouteSegment>,
    /// True when showing last-known-good data during an outage.
    pub stale: bool,
}

/// A hover resolved against the selected metric's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTooltip {
    pub hover: Hover,
    pub anchor: TooltipAnchor,
    pub label: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub stato_operativo: String,
    pub freni: String,
    pub motori: String,
    pub tensione_motori: f64,
    pub corrente_trazione: f64,
    pub pressione: f64,
    pub consumo_30min: f64,
}

/// One chip on the power-supply timeline strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerChip {
    pub timestamp: String,
    pub label: String,
    pub color: &'static str,
}

/// Per-session UI state owned by the chart display: which metric tab is
/// selected and which point, if any, is hovered.
#[derive(Debug)]
pub struct DashboardSession {
    selected: MetricKey,
    hover: HoverState,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self {
            selected: MetricKey::Velocita,
            hover: HoverState::default(),
        }
    }
}

impl DashboardSession {
    pub fn selected(&self) -> MetricKey {
        self.selected
    }

    /// Switching tabs always clears the hover, so a stale hover from a
    /// different metric can never render.
    pub fn select_metric(&mut self, metric: MetricKey) {
        self.selected = metric;
        self.hover.leave();
    }

    pub fn hover_enter(&mut self, metric: MetricKey, point: ChartPoint) {
        self.hover.enter(metric, point);
    }

    pub fn hover_leave(&mut self) {
        self.hover.leave();
    }
}

pub struct DashboardService {
    metrics: Vec<MetricDescriptor>,
}

impl DashboardService {
    pub fn new(metrics: Vec<MetricDescriptor>) -> Self {
        Self { metrics }
    }

    fn descriptor(&self, key: MetricKey) -> Option<&MetricDescriptor> {
        self.metrics.iter().find(|metric| metric.key == key)
    }

    /// Build the view for the current poll state. Pure recomputation:
    /// every chart is rebuilt from the timeline on each call.
    pub fn build_view(
        &self,
        state: &SnapshotState,
        session: &DashboardSession,
        headline: HeadlineValues,
    ) -> DashboardView {
        let Some(train) = &state.train else {
            if state.unreachable {
                return DashboardView::Unavailable {
                    message: UNREACHABLE_MESSAGE.to_string(),
                };
            }
            return DashboardView::Loading;
        };

        let charts: HashMap<MetricKey, ChartGeometry> = MetricKey::ALL
            .into_iter()
            .filter_map(|key| geometry::full_chart(&train.timeline, key).map(|g| (key, g)))
            .collect();

        let tooltip = session.hover.active_for(session.selected()).and_then(|h| {
            let chart = charts.get(&h.metric)?;
            let descriptor = self.descriptor(h.metric)?;
            Some(ActiveTooltip {
                hover: h.clone(),
                anchor: hover::resolve(&h.point, &chart.canvas),
                label: descriptor.label.clone(),
                unit: descriptor.unit.clone(),
            })
        });

        let power_timeline = train
            .timeline
            .iter()
            .map(|point| {
                let label = point
                    .tipo_alimentazione
                    .clone()
                    .filter(|tipo| !tipo.is_empty())
                    .unwrap_or_else(|| train.tipo_alimentazione.clone());
                PowerChip {
                    timestamp: point.timestamp.clone(),
                    color: power_supply_color(&label),
                    label,
                }
            })
            .collect();

        DashboardView::Ready(DashboardData {
            train_id: train.id.clone(),
            headline,
            speed_progress: (train.velocita / MAX_SPEED_KMH * 100.0).min(100.0),
            compact_energy: geometry::compact_energy_chart(&train.timeline),
            charts,
            selected_metric: session.selected(),
            tooltip,
            notes: parse_extra_metrics(&train.altre_metriche),
            diagnostics: Diagnostics {
                stato_operativo: train.stato_operativo.clone(),
                freni: train.freni.clone(),
                motori: train.motori.clone(),
                tensione_motori: train.tensione_motori,
                corrente_trazione: train.corrente_trazione,
                pressione: train.pressione,
                consumo_30min: train.consumo_30min,
            },
            power_timeline,
            route: train.route.clone(),
            stale: state.unreachable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::train::TrainSnapshot;

    fn service() -> DashboardService {
        let metrics = MetricKey::ALL
            .into_iter()
            .map(|key| MetricDescriptor {
                key,
                label: key.as_str().to_string(),
                unit: "u".to_string(),
                color: "#ffffff".to_string(),
            })
            .collect();
        DashboardService::new(metrics)
    }

    fn sample_state() -> SnapshotState {
        let train: TrainSnapshot = serde_json::from_value(serde_json::json!({
            "id": "ETR-1000",
            "velocita": 245,
            "potenza_kw": 5200.0,
            "energia_kwh": 1850.5,
            "massa": 432.5,
            "consumo_30min": 140.0,
            "tipo_alimentazione": "25kV AC",
            "stato_operativo": "In marcia",
            "altre_metriche": "temperatura_freni=65C",
            "timeline": [
                { "timestamp": "08:10", "velocita": 0, "potenza_kw": 0, "energia_kwh": 100.0, "massa": 415.0 },
                { "timestamp": "08:20", "velocita": 120, "potenza_kw": 3500, "energia_kwh": 320.0, "massa": 420.0, "tipo_alimentazione": "3kV DC" }
            ],
            "route": [
                { "citta": "Torino", "km": 0 },
                { "citta": "Milano", "km": 140 }
            ]
        }))
        .unwrap();
        SnapshotState {
            train: Some(train),
            unreachable: false,
        }
    }

    #[test]
    fn test_loading_before_first_snapshot() {
        let view = service().build_view(
            &SnapshotState::default(),
            &DashboardSession::default(),
            HeadlineValues::default(),
        );
        assert_eq!(view, DashboardView::Loading);
    }

    #[test]
    fn test_unavailable_when_never_reached() {
        let state = SnapshotState {
            train: None,
            unreachable: true,
        };
        let view = service().build_view(
            &state,
            &DashboardSession::default(),
            HeadlineValues::default(),
        );
        assert_eq!(
            view,
            DashboardView::Unavailable {
                message: UNREACHABLE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_ready_view_carries_charts_and_notes() {
        let view = service().build_view(
            &sample_state(),
            &DashboardSession::default(),
            HeadlineValues::default(),
        );
        let DashboardView::Ready(data) = view else {
            panic!("expected a ready view");
        };

        assert_eq!(data.train_id, "ETR-1000");
        assert_eq!(data.charts.len(), 4);
        assert_eq!(data.charts[&MetricKey::Velocita].points.len(), 2);
        assert!(data.compact_energy.is_some());
        assert_eq!(data.notes.len(), 1);
        assert_eq!(data.notes[0].label, "temperatura freni");
        assert_eq!(data.route.len(), 2);
        assert!(!data.stale);
        assert_eq!(data.speed_progress, 245.0 / 350.0 * 100.0);
    }

    #[test]
    fn test_power_timeline_falls_back_to_snapshot_supply() {
        let view = service().build_view(
            &sample_state(),
            &DashboardSession::default(),
            HeadlineValues::default(),
        );
        let DashboardView::Ready(data) = view else {
            panic!("expected a ready view");
        };

        // First point has no per-sample supply, falls back to the train's.
        assert_eq!(data.power_timeline[0].label, "25kV AC");
        assert_eq!(data.power_timeline[0].color, "#3498db");
        assert_eq!(data.power_timeline[1].label, "3kV DC");
        assert_eq!(data.power_timeline[1].color, "#ff7a18");
    }

    #[test]
    fn test_outage_with_history_marks_view_stale() {
        let mut state = sample_state();
        state.unreachable = true;
        let view = service().build_view(
            &state,
            &DashboardSession::default(),
            HeadlineValues::default(),
        );
        let DashboardView::Ready(data) = view else {
            panic!("stale data should still render");
        };
        assert!(data.stale);
        assert_eq!(data.charts.len(), 4);
    }

    #[test]
    fn test_tooltip_resolves_only_for_selected_metric() {
        let state = sample_state();
        let srv = service();
        let mut session = DashboardSession::default();

        let DashboardView::Ready(data) =
            srv.build_view(&state, &session, HeadlineValues::default())
        else {
            panic!("expected a ready view");
        };
        let point = data.charts[&MetricKey::Velocita].points[1].clone();
        session.hover_enter(MetricKey::Velocita, point);

        let DashboardView::Ready(data) =
            srv.build_view(&state, &session, HeadlineValues::default())
        else {
            panic!("expected a ready view");
        };
        let tooltip = data.tooltip.expect("hover on the selected metric");
        assert_eq!(tooltip.hover.metric, MetricKey::Velocita);

        // Switching tabs clears the hover entirely.
        session.select_metric(MetricKey::Massa);
        let DashboardView::Ready(data) =
            srv.build_view(&state, &session, HeadlineValues::default())
        else {
            panic!("expected a ready view");
        };
        assert!(data.tooltip.is_none());
    }

    #[test]
    fn test_speed_progress_caps_at_hundred() {
        let mut state = sample_state();
        if let Some(train) = state.train.as_mut() {
            train.velocita = 400.0;
        }
        let DashboardView::Ready(data) = service().build_view(
            &state,
            &DashboardSession::default(),
            HeadlineValues::default(),
        ) else {
            panic!("expected a ready view");
        };
        assert_eq!(data.speed_progress, 100.0);
    }
}
