//! Simulated household data for the demo scenarios.
//!
//! All data here is hardcoded and fictional. It stands in for the external
//! device/ingestion pipeline that writes metric records in a real
//! deployment.

use chrono::{DateTime, Duration, TimeZone, Utc};

use wecare_contracts::{
    metric::{HealthMetric, MetricId, MetricType},
    sleep::{SleepInterval, SleepStage, SLEEP_INTERVAL_MINUTES},
};

/// A day of readings: heart rate, steps, temperature, and SpO2 sampled
/// every three hours from 06:00, sleep hours recorded once.
pub fn day_of_metrics() -> Vec<HealthMetric> {
    let day = |hour: u32| Utc.with_ymd_and_hms(2026, 8, 20, hour, 0, 0).unwrap();
    let mut records = Vec::new();

    let mut push = |metric_type: MetricType, value: f64, at: DateTime<Utc>| {
        records.push(HealthMetric {
            id: MetricId::new(),
            metric_type,
            value,
            recorded_at: at,
        });
    };

    for (hour, heart_rate, steps, temperature, spo2) in [
        (6, 68.0, 0.0, 98.2, 98.0),
        (9, 72.0, 2500.0, 98.4, 97.0),
        (12, 78.0, 5200.0, 98.6, 98.0),
        (15, 75.0, 7800.0, 98.5, 99.0),
        (18, 70.0, 9200.0, 98.3, 97.0),
        (21, 65.0, 10500.0, 98.1, 98.0),
    ] {
        push(MetricType::HeartRate, heart_rate, day(hour));
        push(MetricType::Steps, steps, day(hour));
        push(MetricType::Temperature, temperature, day(hour));
        push(MetricType::SpO2, spo2, day(hour));
    }
    push(MetricType::Sleep, 8.0, day(7));

    records
}

/// Last night as staged 15-minute intervals, starting 22:30.
///
/// First and last half hour awake; in between, six-interval cycles of
/// light/deep/light sleep.
pub fn last_night() -> Vec<SleepInterval> {
    let start = Utc.with_ymd_and_hms(2026, 8, 19, 22, 30, 0).unwrap();

    (0i64..35)
        .map(|i| {
            let stage = if i < 2 || i > 32 {
                SleepStage::Awake
            } else {
                match (i - 2) % 6 {
                    0 | 1 => SleepStage::Light,
                    2 | 3 => SleepStage::Deep,
                    _ => SleepStage::Light,
                }
            };
            SleepInterval {
                time: start + Duration::minutes(i * SLEEP_INTERVAL_MINUTES),
                stage,
            }
        })
        .collect()
}

/// One fresh heart-rate reading, newer than everything in `day_of_metrics`.
pub fn fresh_heart_rate_reading() -> HealthMetric {
    HealthMetric {
        id: MetricId::new(),
        metric_type: MetricType::HeartRate,
        value: 92.0,
        recorded_at: Utc.with_ymd_and_hms(2026, 8, 20, 22, 15, 0).unwrap(),
    }
}
