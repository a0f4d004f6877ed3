// Source trait for train telemetry
use async_trait::async_trait;

use crate::domain::train::TrainSnapshot;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the current train snapshot, including its timeline and route.
    async fn fetch_snapshot(&self) -> anyhow::Result<TrainSnapshot>;
}
