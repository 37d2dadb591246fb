//! In-memory reference backend.
//!
//! `InMemoryBackend` implements every store trait of the service boundary
//! against plain collections behind a `Mutex`. It stands in for the real
//! backend (relational tables + file bucket + real-time channel) in the
//! demo and in tests, and publishes metric changes into a `LiveUpdateHub`
//! the way the real channel would.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use wecare_contracts::{
    emergency::{ContactStep, EmergencyEvent, EventId, EventStatus, PersonId},
    error::{WecareError, WecareResult},
    metric::{HealthMetric, MetricType},
    prescription::{Prescription, PrescriptionId},
};
use wecare_core::traits::{AttachmentBucket, EventStore, MetricStore, PrescriptionStore};

use crate::live::{ChangeKind, LiveUpdateHub};

#[derive(Default)]
struct BackendState {
    metrics: Vec<HealthMetric>,
    events: HashMap<EventId, EmergencyEvent>,
    prescriptions: Vec<Prescription>,
    attachments: HashMap<String, Vec<u8>>,
}

/// The in-memory stand-in for the whole backend collaborator.
///
/// Cheap to clone; clones share state and the live update hub.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<BackendState>>,
    hub: LiveUpdateHub,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live update channel fed by this backend's metric table.
    pub fn hub(&self) -> &LiveUpdateHub {
        &self.hub
    }

    /// Ingest one metric record, simulating the external device pipeline.
    ///
    /// This is deliberately not part of `MetricStore` — the monitoring core
    /// is read-only over metrics. Publishes an `Insert` change to the hub.
    pub fn ingest_metric(&self, metric: HealthMetric) -> WecareResult<()> {
        {
            let mut state = self.lock()?;
            state.metrics.push(metric);
        }
        self.hub.publish(ChangeKind::Insert);
        Ok(())
    }

    /// Ingest a batch without a notification per row; publishes one `Insert`
    /// at the end.
    pub fn seed_metrics(&self, metrics: Vec<HealthMetric>) -> WecareResult<()> {
        let count = metrics.len();
        {
            let mut state = self.lock()?;
            state.metrics.extend(metrics);
        }
        info!(count, "seeded metric records");
        self.hub.publish(ChangeKind::Insert);
        Ok(())
    }

    fn lock(&self) -> WecareResult<MutexGuard<'_, BackendState>> {
        self.state.lock().map_err(|e| WecareError::StoreUnavailable {
            reason: format!("backend state lock poisoned: {}", e),
        })
    }
}

// ── MetricStore ───────────────────────────────────────────────────────────────

impl MetricStore for InMemoryBackend {
    fn fetch_latest(&self, limit: usize) -> WecareResult<Vec<HealthMetric>> {
        let state = self.lock()?;
        let mut records = state.metrics.clone();
        records.sort_by_key(|r| std::cmp::Reverse(r.recorded_at));
        records.truncate(limit);
        Ok(records)
    }

    fn fetch_of_type(&self, metric_type: MetricType) -> WecareResult<Vec<HealthMetric>> {
        let state = self.lock()?;
        Ok(state
            .metrics
            .iter()
            .filter(|r| r.metric_type == metric_type)
            .cloned()
            .collect())
    }
}

// ── EventStore ────────────────────────────────────────────────────────────────

impl EventStore for InMemoryBackend {
    /// Insert a new episode, enforcing the one-Active-per-person constraint.
    fn create_event(&self, event: &EmergencyEvent) -> WecareResult<EventId> {
        let mut state = self.lock()?;

        let already_active = state.events.values().any(|e| {
            e.person_id == event.person_id && e.status == EventStatus::Active
        });
        if already_active {
            return Err(WecareError::EmergencyAlreadyActive {
                person_id: event.person_id.0.clone(),
            });
        }

        debug!(event_id = %event.id.0, person_id = %event.person_id, "emergency event created");
        state.events.insert(event.id, event.clone());
        Ok(event.id)
    }

    fn mark_contact_done(&self, id: EventId, step: ContactStep) -> WecareResult<()> {
        let mut state = self.lock()?;
        let event = state.events.get_mut(&id).ok_or_else(|| WecareError::StoreUnavailable {
            reason: format!("emergency event '{}' not found", id.0),
        })?;
        event.contact_flags.mark_done(step);
        Ok(())
    }

    fn resolve_event(&self, id: EventId, resolved_at: DateTime<Utc>) -> WecareResult<()> {
        let mut state = self.lock()?;
        let event = state.events.get_mut(&id).ok_or_else(|| WecareError::StoreUnavailable {
            reason: format!("emergency event '{}' not found", id.0),
        })?;
        event.status = EventStatus::Resolved;
        event.resolved_at = Some(resolved_at);
        info!(event_id = %id.0, "emergency event resolved");
        Ok(())
    }

    fn active_event_for(&self, person_id: &PersonId) -> WecareResult<Option<EmergencyEvent>> {
        let state = self.lock()?;
        Ok(state
            .events
            .values()
            .find(|e| &e.person_id == person_id && e.status == EventStatus::Active)
            .cloned())
    }

    fn get_event(&self, id: EventId) -> WecareResult<Option<EmergencyEvent>> {
        let state = self.lock()?;
        Ok(state.events.get(&id).cloned())
    }
}

// ── PrescriptionStore ─────────────────────────────────────────────────────────

impl PrescriptionStore for InMemoryBackend {
    fn create_prescription(&self, prescription: &Prescription) -> WecareResult<PrescriptionId> {
        let mut state = self.lock()?;
        state.prescriptions.push(prescription.clone());
        debug!(
            prescription_id = %prescription.id.0,
            medication = %prescription.medication_name,
            "prescription stored"
        );
        Ok(prescription.id)
    }

    fn prescriptions_for(&self, owner_id: &str) -> WecareResult<Vec<Prescription>> {
        let state = self.lock()?;
        let mut records: Vec<Prescription> = state
            .prescriptions
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by_key(|p| std::cmp::Reverse(p.created_at));
        Ok(records)
    }
}

// ── AttachmentBucket ──────────────────────────────────────────────────────────

impl AttachmentBucket for InMemoryBackend {
    fn store(&self, path: &str, bytes: &[u8]) -> WecareResult<String> {
        let mut state = self.lock()?;
        state.attachments.insert(path.to_string(), bytes.to_vec());
        Ok(format!("memory://prescriptions/{}", path))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use wecare_contracts::metric::MetricId;

    use super::*;

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
    fn ingest_publishes_a_change_to_the_hub() {
        let backend = InMemoryBackend::new();
        let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        let _sub = backend.hub().subscribe(move |kind| {
            assert_eq!(kind, ChangeKind::Insert);
            h.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        backend.ingest_metric(metric(MetricType::HeartRate, 72.0, 0)).unwrap();
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn fetch_latest_is_descending_and_limited() {
        let backend = InMemoryBackend::new();
        backend
            .seed_metrics(vec![
                metric(MetricType::HeartRate, 68.0, 0),
                metric(MetricType::HeartRate, 72.0, 60),
                metric(MetricType::Steps, 2500.0, 30),
            ])
            .unwrap();

        let latest = backend.fetch_latest(2).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].value, 72.0);
        assert_eq!(latest[1].value, 2500.0);
    }

    #[test]
    fn second_active_event_for_same_person_is_rejected() {
        let backend = InMemoryBackend::new();
        let person = PersonId::new("person-1");

        let first = EmergencyEvent::new_active(person.clone(), "button_press", "", Utc::now());
        backend.create_event(&first).unwrap();

        let second = EmergencyEvent::new_active(person.clone(), "button_press", "", Utc::now());
        let err = backend.create_event(&second).unwrap_err();
        assert!(matches!(err, WecareError::EmergencyAlreadyActive { .. }));

        // A different person is unaffected.
        let other =
            EmergencyEvent::new_active(PersonId::new("person-2"), "button_press", "", Utc::now());
        backend.create_event(&other).unwrap();
    }

    #[test]
    fn resolving_frees_the_person_for_a_new_episode() {
        let backend = InMemoryBackend::new();
        let person = PersonId::new("person-1");

        let event = EmergencyEvent::new_active(person.clone(), "button_press", "", Utc::now());
        let id = backend.create_event(&event).unwrap();
        backend.resolve_event(id, Utc::now()).unwrap();

        assert!(backend.active_event_for(&person).unwrap().is_none());
        let stored = backend.get_event(id).unwrap().unwrap();
        assert_eq!(stored.status, EventStatus::Resolved);
        assert!(stored.resolved_at.is_some());

        let next = EmergencyEvent::new_active(person, "fall_detected", "", Utc::now());
        backend.create_event(&next).unwrap();
    }

    #[test]
    fn contact_flags_are_persisted_per_step() {
        let backend = InMemoryBackend::new();
        let event =
            EmergencyEvent::new_active(PersonId::new("person-1"), "button_press", "", Utc::now());
        let id = backend.create_event(&event).unwrap();

        backend.mark_contact_done(id, ContactStep::Ambulance).unwrap();

        let stored = backend.get_event(id).unwrap().unwrap();
        assert!(stored.contact_flags.ambulance_contacted);
        assert!(!stored.contact_flags.hospital_contacted);
    }

    #[test]
    fn attachment_store_returns_a_scoped_url() {
        let backend = InMemoryBackend::new();
        let url = backend.store("user-1/1755900000000.pdf", b"%PDF-1.4").unwrap();
        assert_eq!(url, "memory://prescriptions/user-1/1755900000000.pdf");
    }
}
