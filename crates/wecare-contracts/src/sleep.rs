//! Sleep tracking types.
//!
//! A night of sleep arrives as staged 15-minute intervals. The aggregation
//! into a `SleepSummary` lives in wecare-store; these are the data shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of one sleep interval.
pub const SLEEP_INTERVAL_MINUTES: i64 = 15;

/// The stage recorded for one interval of the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStage {
    Awake,
    Light,
    Deep,
}

/// One 15-minute interval of a tracked night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepInterval {
    /// Start of the interval (UTC).
    pub time: DateTime<Utc>,
    pub stage: SleepStage,
}

/// Aggregated view of one night, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSummary {
    /// Minutes spent asleep (light + deep).
    pub total_asleep_minutes: i64,
    pub deep_minutes: i64,
    pub light_minutes: i64,
    /// Start of the first tracked interval.
    pub bed_time: DateTime<Utc>,
    /// End of the last tracked interval.
    pub wake_time: DateTime<Utc>,
    /// Percentage of tracked intervals spent asleep, 0–100.
    pub quality_percent: u8,
}
