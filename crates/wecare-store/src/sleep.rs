//! Sleep night aggregation.
//!
//! Turns a night of staged 15-minute intervals into the summary the sleep
//! card displays: asleep/deep/light totals, the sleep window, and a quality
//! score. Pure computation over the interval slice.

use chrono::Duration;

use wecare_contracts::sleep::{SleepInterval, SleepStage, SleepSummary, SLEEP_INTERVAL_MINUTES};

/// Aggregate one tracked night.
///
/// Returns `None` for an empty night — there is no window to summarize.
/// Intervals are expected in chronological order (the tracker emits them
/// that way); the bed time is the first interval's start and the wake time
/// is the end of the last interval.
pub fn summarize_night(intervals: &[SleepInterval]) -> Option<SleepSummary> {
    let first = intervals.first()?;
    let last = intervals.last()?;

    let mut deep = 0i64;
    let mut light = 0i64;
    for interval in intervals {
        match interval.stage {
            SleepStage::Deep => deep += SLEEP_INTERVAL_MINUTES,
            SleepStage::Light => light += SLEEP_INTERVAL_MINUTES,
            SleepStage::Awake => {}
        }
    }

    let total_asleep = deep + light;
    let tracked = intervals.len() as i64 * SLEEP_INTERVAL_MINUTES;
    // Share of the tracked window spent asleep, rounded to whole percent.
    let quality = ((total_asleep * 100 + tracked / 2) / tracked).clamp(0, 100) as u8;

    Some(SleepSummary {
        total_asleep_minutes: total_asleep,
        deep_minutes: deep,
        light_minutes: light,
        bed_time: first.time,
        wake_time: last.time + Duration::minutes(SLEEP_INTERVAL_MINUTES),
        quality_percent: quality,
    })
}
