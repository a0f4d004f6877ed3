// Metric descriptors and power supply lookup
use std::str::FromStr;

use thiserror::Error;

/// The four numeric series charted on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Velocita,
    PotenzaKw,
    EnergiaKwh,
    Massa,
}

impl MetricKey {
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Velocita,
        MetricKey::PotenzaKw,
        MetricKey::EnergiaKwh,
        MetricKey::Massa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Velocita => "velocita",
            MetricKey::PotenzaKw => "potenza_kw",
            MetricKey::EnergiaKwh => "energia_kwh",
            MetricKey::Massa => "massa",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown metric key: {0}")]
pub struct UnknownMetric(String);

impl FromStr for MetricKey {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "velocita" => Ok(MetricKey::Velocita),
            "potenza_kw" => Ok(MetricKey::PotenzaKw),
            "energia_kwh" => Ok(MetricKey::EnergiaKwh),
            "massa" => Ok(MetricKey::Massa),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// Static display configuration for one charted metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub key: MetricKey,
    pub label: String,
    pub unit: String,
    pub color: String,
}

/// Color for a power supply type chip, matched case-insensitively.
pub fn power_supply_color(tipo: &str) -> &'static str {
    let value = tipo.to_lowercase();
    if value.contains("25kv") {
        "#3498db"
    } else if value.contains("3kv") {
        "#ff7a18"
    } else if value.contains("1.5kv") || value.contains("1,5kv") {
        "#e74c3c"
    } else {
        "#8fa0c4"
    }
}
