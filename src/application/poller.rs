// Polling task - periodic telemetry refresh with last-write-wins state
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::telemetry_source::TelemetrySource;
use crate::domain::train::TrainSnapshot;

/// Fixed user-facing message for any kind of fetch failure.
pub const UNREACHABLE_MESSAGE: &str = "Backend non raggiungibile. Assicurati che sia avviato.";

/// Latest known poll outcome. A failed poll flips `unreachable` but keeps
/// the last-known-good snapshot, so stale geometry can still be shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapshotState {
    pub train: Option<TrainSnapshot>,
    pub unreachable: bool,
}

pub struct TelemetryPoller {
    source: Arc<dyn TelemetrySource>,
    interval: Duration,
}

impl TelemetryPoller {
    pub fn new(source: Arc<dyn TelemetrySource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Start the polling loop. The first poll fires immediately, then one
    /// per interval; each result overwrites the watch state, so a slow
    /// poll completing late simply loses to whatever arrived after it.
    /// Dropping the handle aborts the task.
    pub fn spawn(self) -> (watch::Receiver<SnapshotState>, PollHandle) {
        let (tx, rx) = watch::channel(SnapshotState::default());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                match self.source.fetch_snapshot().await {
                    Ok(snapshot) => {
                        tracing::debug!(
                            train = %snapshot.id,
                            timeline_points = snapshot.timeline.len(),
                            "received telemetry snapshot"
                        );
                        tx.send_modify(|state| {
                            state.train = Some(snapshot);
                            state.unreachable = false;
                        });
                    }
                    Err(e) => {
                        tracing::warn!("telemetry poll failed: {e:#}");
                        tx.send_modify(|state| state.unreachable = true);
                    }
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        (rx, PollHandle { handle })
    }
}

/// Owns the polling task; aborts it on drop so no poll outlives the
/// dashboard session.
pub struct PollHandle {
    handle: JoinHandle<()>,
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
