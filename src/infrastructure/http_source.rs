// HTTP telemetry source - reqwest adapter for the train endpoint
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::application::telemetry_source::TelemetrySource;
use crate::domain::train::TrainSnapshot;

/// The two failure kinds at the fetch boundary. The poller collapses
/// both into the single unreachable status; the kind only matters for
/// the logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure while contacting the telemetry endpoint")]
    Transport(#[source] reqwest::Error),
    #[error("telemetry endpoint returned status {status}")]
    Response { status: reqwest::StatusCode },
}

#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTelemetrySource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn fetch_snapshot(&self) -> Result<TrainSnapshot> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "non-success response from telemetry endpoint");
            return Err(FetchError::Response { status }.into());
        }

        let snapshot = response
            .json::<TrainSnapshot>()
            .await
            .map_err(FetchError::Transport)?;

        Ok(snapshot)
    }
}
