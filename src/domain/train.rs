// Train domain model - wire snapshot, timeline and route
use serde::{Deserialize, Deserializer};

use crate::domain::metric::MetricKey;

/// One full telemetry read for the train, replaced wholesale on each poll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub velocita: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub potenza_kw: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub energia_kwh: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub massa: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub consumo_30min: f64,
    #[serde(default)]
    pub tipo_alimentazione: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tensione_motori: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub corrente_trazione: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pressione: f64,
    #[serde(default)]
    pub stato_operativo: String,
    #[serde(default)]
    pub freni: String,
    #[serde(default)]
    pub motori: String,
    #[serde(default)]
    pub altre_metriche: String,
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
    #[serde(default)]
    pub route: Vec<RouteSegment>,
}

/// One timeline sample. Arrival order is chronological and never re-sorted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelinePoint {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub velocita: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub potenza_kw: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub energia_kwh: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub massa: f64,
    #[serde(default)]
    pub tipo_alimentazione: Option<String>,
}

impl TimelinePoint {
    pub fn value(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Velocita => self.velocita,
            MetricKey::PotenzaKw => self.potenza_kw,
            MetricKey::EnergiaKwh => self.energia_kwh,
            MetricKey::Massa => self.massa,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteSegment {
    pub citta: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub km: f64,
}

/// One parsed entry from the `altre_metriche` field.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraMetric {
    pub label: String,
    pub value: String,
}

/// Parse the `"key1=val1;key2=val2"` encoding of extra notes.
///
/// Segments split on the first `=`; a missing value becomes `-`, an empty
/// key falls back to a generic label, and underscores in keys are shown
/// as spaces.
pub fn parse_extra_metrics(raw: &str) -> Vec<ExtraMetric> {
    raw.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (segment, None),
            };
            let label = if key.is_empty() {
                "Dato".to_string()
            } else {
                key.replace('_', " ")
            };
            ExtraMetric {
                label,
                value: value.unwrap_or("-").to_string(),
            }
        })
        .collect()
}

/// Accept numbers, numeric strings or nothing at all; anything else is 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number).unwrap_or(0.0))
}

fn coerce_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
