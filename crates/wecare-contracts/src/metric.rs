//! Health metric records and their wire representation.
//!
//! Metrics are produced by an external device/ingestion pipeline and are
//! read-only to this system. A record is immutable once written; "latest"
//! queries order by `recorded_at` descending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of one recorded metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricId(pub uuid::Uuid);

impl MetricId {
    /// Create a new, unique metric ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for MetricId {
    fn default() -> Self {
        Self::new()
    }
}

/// The enumerated categories of a health reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    HeartRate,
    Steps,
    Sleep,
    Temperature,
    /// snake_case would split the acronym; the backend column says "spo2".
    #[serde(rename = "spo2")]
    SpO2,
}

impl MetricType {
    /// The measurement unit shown next to a reading of this type.
    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::HeartRate => "bpm",
            MetricType::Steps => "steps",
            MetricType::Sleep => "hrs",
            MetricType::Temperature => "°F",
            MetricType::SpO2 => "%",
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MetricType::HeartRate => "heart_rate",
            MetricType::Steps => "steps",
            MetricType::Sleep => "sleep",
            MetricType::Temperature => "temperature",
            MetricType::SpO2 => "spo2",
        };
        f.write_str(name)
    }
}

/// The wire shape of a metric value as the backend delivers it.
///
/// Historic rows store a bare number; newer ingestion writes an object
/// `{ "value": n }`. `HealthMetric` routes its value field through this
/// enum when deserializing, so the ambiguity never reaches rendering code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Plain(f64),
    Structured { value: f64 },
}

impl MetricValue {
    /// Collapse either wire shape into the contained number.
    pub fn as_f64(&self) -> f64 {
        match *self {
            MetricValue::Plain(v) => v,
            MetricValue::Structured { value } => value,
        }
    }
}

/// Deserialize a value field of either wire shape into a plain `f64`.
fn value_from_wire<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    MetricValue::deserialize(deserializer).map(|v| v.as_f64())
}

/// One immutable health reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub id: MetricId,
    pub metric_type: MetricType,
    /// Normalized numeric value. Both wire shapes deserialize into this
    /// field via `MetricValue`; serialization always emits the bare number.
    #[serde(deserialize_with = "value_from_wire")]
    pub value: f64,
    /// Wall-clock time (UTC) the reading was taken.
    pub recorded_at: DateTime<Utc>,
}

/// One point of a chart-ready time series: chronologically ascending,
/// single metric type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}
