use serde::Deserialize;

use crate::domain::metric::{MetricDescriptor, MetricKey};

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub endpoint: String,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricEntry {
    pub key: String,
    pub label: String,
    pub unit: String,
    pub color: String,
}

impl MetricEntry {
    pub fn to_descriptor(&self) -> anyhow::Result<MetricDescriptor> {
        let key: MetricKey = self.key.parse()?;
        Ok(MetricDescriptor {
            key,
            label: self.label.clone(),
            unit: self.unit.clone(),
            color: self.color.clone(),
        })
    }
}

pub fn load_telemetry_config() -> anyhow::Result<TelemetryConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/telemetry"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_metrics_config() -> anyhow::Result<MetricsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/metrics"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
