// Main entry point - dependency injection and task wiring
use std::sync::Arc;
use std::time::Duration;

use treno_telemetry::application::animation::spawn_headline_animator;
use treno_telemetry::application::dashboard_service::{
    DashboardService, DashboardSession, DashboardView, LOADING_MESSAGE,
};
use treno_telemetry::application::poller::TelemetryPoller;
use treno_telemetry::infrastructure::config::{load_metrics_config, load_telemetry_config};
use treno_telemetry::infrastructure::http_source::HttpTelemetrySource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let telemetry_config = load_telemetry_config()?;
    let metrics_config = load_metrics_config()?;
    let descriptors = metrics_config
        .metrics
        .iter()
        .map(|entry| entry.to_descriptor())
        .collect::<anyhow::Result<Vec<_>>>()?;

    // Create the telemetry source (infrastructure layer)
    let source = Arc::new(HttpTelemetrySource::new(
        telemetry_config.telemetry.endpoint.clone(),
    ));

    // Start the recurring tasks (application layer); both handles abort
    // their task when dropped at the end of main.
    let poller = TelemetryPoller::new(
        source,
        Duration::from_millis(telemetry_config.telemetry.poll_interval_ms),
    );
    let (mut snapshots, _poll_handle) = poller.spawn();
    let (mut headline, _animation_handle) = spawn_headline_animator(snapshots.clone());

    let service = DashboardService::new(descriptors);
    let session = DashboardSession::default();

    println!(
        "Starting treno-telemetry dashboard, polling {}",
        telemetry_config.telemetry.endpoint
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = headline.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let state = snapshots.borrow().clone();
        let values = *headline.borrow();
        match service.build_view(&state, &session, values) {
            DashboardView::Loading => tracing::info!("{LOADING_MESSAGE}"),
            DashboardView::Unavailable { message } => tracing::warn!("{message}"),
            DashboardView::Ready(data) => tracing::debug!(
                train = %data.train_id,
                velocita = data.headline.velocita,
                timeline_points = data
                    .charts
                    .get(&session.selected())
                    .map(|chart| chart.points.len())
                    .unwrap_or(0),
                stale = data.stale,
                "dashboard view refreshed"
            ),
        }
    }

    Ok(())
}
