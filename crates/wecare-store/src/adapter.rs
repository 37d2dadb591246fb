//! The metric store adapter: normalized queries over raw metric rows.
//!
//! Panels never talk to the `MetricStore` directly. The adapter owns the
//! ordering and truncation rules for chart data, the default for missing
//! readings, and the stale-fetch guard that keeps a slow response from
//! overwriting a fresher one.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tracing::{debug, warn};

use wecare_contracts::{
    error::WecareResult,
    metric::{HealthMetric, MetricType, SeriesPoint},
};
use wecare_core::traits::MetricStore;

/// Maximum number of points returned by `series_for`.
///
/// Charts render the most recent window only; older points are dropped.
pub const SERIES_WINDOW: usize = 10;

/// Read-side facade over a `MetricStore`.
///
/// Cheap to clone; clones share the underlying store handle.
#[derive(Clone)]
pub struct MetricAdapter {
    store: Arc<dyn MetricStore>,
}

impl MetricAdapter {
    pub fn new(store: Arc<dyn MetricStore>) -> Self {
        Self { store }
    }

    /// The most recent `limit` records across all metric types, ordered by
    /// `recorded_at` descending.
    pub fn fetch_latest(&self, limit: usize) -> WecareResult<Vec<HealthMetric>> {
        let mut records = self.store.fetch_latest(limit).map_err(|e| {
            warn!(error = %e, "latest-metrics fetch failed");
            e
        })?;
        // Descending order and the limit are this adapter's guarantees,
        // whatever the store returned.
        records.sort_by_key(|r| std::cmp::Reverse(r.recorded_at));
        records.truncate(limit);
        Ok(records)
    }

    /// Chart-ready series for one metric type: chronologically ascending,
    /// truncated to the most recent `SERIES_WINDOW` points regardless of the
    /// source ordering.
    pub fn series_for(&self, metric_type: MetricType) -> WecareResult<Vec<SeriesPoint>> {
        let mut records = self.store.fetch_of_type(metric_type).map_err(|e| {
            warn!(metric_type = %metric_type, error = %e, "series fetch failed");
            e
        })?;

        records.sort_by_key(|r| r.recorded_at);
        let start = records.len().saturating_sub(SERIES_WINDOW);

        let series = records[start..]
            .iter()
            .map(|r| SeriesPoint {
                time: r.recorded_at,
                value: r.value,
            })
            .collect::<Vec<_>>();

        debug!(
            metric_type = %metric_type,
            points = series.len(),
            "series assembled"
        );
        Ok(series)
    }

    /// The value of the most recent record of `metric_type`, or `None` when
    /// no record of that type exists.
    pub fn latest_reading_for(&self, metric_type: MetricType) -> WecareResult<Option<f64>> {
        let records = self.store.fetch_of_type(metric_type)?;
        Ok(records
            .iter()
            .max_by_key(|r| r.recorded_at)
            .map(|r| r.value))
    }

    /// The current display value for `metric_type`.
    ///
    /// Defaults to `0.0` when no record of that type exists. This default
    /// makes "no data" indistinguishable from a true zero reading — it is
    /// kept for display compatibility; callers that must tell the two apart
    /// use `latest_reading_for`.
    pub fn current_value_for(&self, metric_type: MetricType) -> WecareResult<f64> {
        Ok(self.latest_reading_for(metric_type)?.unwrap_or(0.0))
    }
}

// ── Stale-fetch guard ─────────────────────────────────────────────────────────

/// Ticket identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Guards a component's fetch results against out-of-order completion.
///
/// Fetches triggered by rapid state changes are not guaranteed to complete
/// in dispatch order. Each fetch takes a ticket from `issue()`; when its
/// result arrives, `accept()` returns true only if no newer ticket has been
/// issued since. Results whose ticket is rejected must be dropped, never
/// applied.
#[derive(Debug, Default)]
pub struct FetchSequence {
    next: AtomicU64,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a fetch that is about to be dispatched.
    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// True if `ticket` is still the most recently issued fetch.
    pub fn accept(&self, ticket: FetchTicket) -> bool {
        let latest = self.next.load(Ordering::SeqCst);
        let accepted = ticket.0 + 1 == latest;
        if !accepted {
            debug!(ticket = ticket.0, latest_issued = latest, "stale fetch result dropped");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone, Utc};

    use wecare_contracts::{
        error::{WecareError, WecareResult},
        metric::{HealthMetric, MetricId},
    };

    use super::*;

    /// A metric store backed by a plain Vec, returning rows as inserted.
    struct FixedStore {
        records: Mutex<Vec<HealthMetric>>,
        fail: bool,
    }

    impl FixedStore {
        fn new(records: Vec<HealthMetric>) -> Self {
            Self {
                records: Mutex::new(records),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                records: Mutex::new(vec![]),
                fail: true,
            }
        }
    }

    impl MetricStore for FixedStore {
        fn fetch_latest(&self, limit: usize) -> WecareResult<Vec<HealthMetric>> {
            if self.fail {
                return Err(WecareError::StoreUnavailable {
                    reason: "connection refused".to_string(),
                });
            }
            // Insertion order, not recency order.
            let mut records = self.records.lock().unwrap().clone();
            records.truncate(limit);
            Ok(records)
        }

        fn fetch_of_type(&self, metric_type: MetricType) -> WecareResult<Vec<HealthMetric>> {
            if self.fail {
                return Err(WecareError::StoreUnavailable {
                    reason: "connection refused".to_string(),
                });
            }
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.metric_type == metric_type)
                .cloned()
                .collect())
        }
    }

    fn metric(metric_type: MetricType, value: f64, minutes: i64) -> HealthMetric {
        let base = Utc.with_ymd_and_hms(2026, 8, 20, 6, 0, 0).unwrap();
        HealthMetric {
            id: MetricId::new(),
            metric_type,
            value,
            recorded_at: base + Duration::minutes(minutes),
        }
    }

    #[test]
    fn series_is_ascending_for_any_source_ordering() {
        // Deliberately shuffled input.
        let records = vec![
            metric(MetricType::HeartRate, 75.0, 30),
            metric(MetricType::HeartRate, 68.0, 0),
            metric(MetricType::HeartRate, 72.0, 60),
            metric(MetricType::HeartRate, 70.0, 15),
        ];
        let adapter = MetricAdapter::new(Arc::new(FixedStore::new(records)));

        let series = adapter.series_for(MetricType::HeartRate).unwrap();
        assert_eq!(series.len(), 4);
        assert!(series.windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(series[0].value, 68.0);
        assert_eq!(series[3].value, 72.0);
    }

    #[test]
    fn series_truncates_to_the_most_recent_window() {
        let records: Vec<HealthMetric> = (0..25)
            .map(|i| metric(MetricType::Steps, i as f64 * 100.0, i))
            .collect();
        let adapter = MetricAdapter::new(Arc::new(FixedStore::new(records)));

        let series = adapter.series_for(MetricType::Steps).unwrap();
        assert_eq!(series.len(), SERIES_WINDOW);
        // The window keeps the newest points: values 1500..=2400.
        assert_eq!(series[0].value, 1500.0);
        assert_eq!(series[SERIES_WINDOW - 1].value, 2400.0);
    }

    #[test]
    fn series_filters_to_a_single_type() {
        let records = vec![
            metric(MetricType::HeartRate, 70.0, 0),
            metric(MetricType::Steps, 4000.0, 5),
            metric(MetricType::HeartRate, 72.0, 10),
        ];
        let adapter = MetricAdapter::new(Arc::new(FixedStore::new(records)));

        let series = adapter.series_for(MetricType::Steps).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 4000.0);
    }

    #[test]
    fn current_value_is_the_most_recent_record() {
        let records = vec![
            metric(MetricType::Temperature, 98.6, 120),
            metric(MetricType::Temperature, 98.1, 300),
            metric(MetricType::Temperature, 98.4, 60),
        ];
        let adapter = MetricAdapter::new(Arc::new(FixedStore::new(records)));

        assert_eq!(adapter.current_value_for(MetricType::Temperature).unwrap(), 98.1);
    }

    #[test]
    fn current_value_defaults_to_zero_when_absent() {
        let adapter = MetricAdapter::new(Arc::new(FixedStore::new(vec![])));

        assert_eq!(adapter.current_value_for(MetricType::SpO2).unwrap(), 0.0);
        // The Option-returning query still reports the absence.
        assert_eq!(adapter.latest_reading_for(MetricType::SpO2).unwrap(), None);
    }

    #[test]
    fn fetch_latest_orders_descending_for_any_source_ordering() {
        // The mock hands rows back in insertion order; the adapter must
        // impose recency order itself.
        let records = vec![
            metric(MetricType::HeartRate, 70.0, 0),
            metric(MetricType::SpO2, 98.0, 15),
            metric(MetricType::Steps, 4000.0, 30),
        ];
        let adapter = MetricAdapter::new(Arc::new(FixedStore::new(records)));

        let latest = adapter.fetch_latest(3).unwrap();
        assert_eq!(latest.len(), 3);
        assert_eq!(latest[0].metric_type, MetricType::Steps);
        assert_eq!(latest[1].metric_type, MetricType::SpO2);
        assert_eq!(latest[2].metric_type, MetricType::HeartRate);
    }

    #[test]
    fn store_failure_surfaces_as_store_unavailable() {
        let adapter = MetricAdapter::new(Arc::new(FixedStore::failing()));

        let err = adapter.series_for(MetricType::HeartRate).unwrap_err();
        assert!(matches!(err, WecareError::StoreUnavailable { .. }));
    }

    /// A store whose session has expired; every query demands re-auth.
    struct SignedOutStore;

    impl MetricStore for SignedOutStore {
        fn fetch_latest(&self, _limit: usize) -> WecareResult<Vec<HealthMetric>> {
            Err(WecareError::AuthRequired)
        }

        fn fetch_of_type(&self, _metric_type: MetricType) -> WecareResult<Vec<HealthMetric>> {
            Err(WecareError::AuthRequired)
        }
    }

    #[test]
    fn expired_session_error_passes_through_unchanged() {
        // The UI boundary redirects to sign-in on this variant, so the
        // adapter must not remap it.
        let adapter = MetricAdapter::new(Arc::new(SignedOutStore));

        let err = adapter.fetch_latest(10).unwrap_err();
        assert!(matches!(err, WecareError::AuthRequired));
        let err = adapter.current_value_for(MetricType::HeartRate).unwrap_err();
        assert!(matches!(err, WecareError::AuthRequired));
    }

    // ── FetchSequence ────────────────────────────────────────────────────────

    #[test]
    fn newest_ticket_is_accepted() {
        let seq = FetchSequence::new();
        let ticket = seq.issue();
        assert!(seq.accept(ticket));
    }

    #[test]
    fn stale_ticket_is_rejected_after_a_newer_fetch() {
        let seq = FetchSequence::new();
        let first = seq.issue();
        let second = seq.issue();

        // The slow first response arrives after the second was dispatched.
        assert!(!seq.accept(first));
        assert!(seq.accept(second));
    }

    #[test]
    fn acceptance_is_stable_until_the_next_issue() {
        let seq = FetchSequence::new();
        let ticket = seq.issue();
        assert!(seq.accept(ticket));
        assert!(seq.accept(ticket));

        let newer = seq.issue();
        assert!(!seq.accept(ticket));
        assert!(seq.accept(newer));
    }
}
