//! Trait seams of the backend service boundary.
//!
//! The backend collaborator (relational store + object store + real-time
//! channel + notification delivery) is opaque to this system. These traits
//! are the complete surface the core consumes:
//!
//! - `MetricStore`       — read-only queries over `health_metrics`
//! - `EventStore`        — create/mutate rows of `emergency_events`
//! - `PrescriptionStore` — create rows of `prescriptions`
//! - `AttachmentBucket`  — file bucket for prescription attachments
//! - `Notifier`          — external delivery of emergency notifications
//!
//! All implementations must be `Send + Sync`; the in-memory reference
//! backend lives in wecare-store.

use chrono::{DateTime, Utc};

use wecare_contracts::{
    emergency::{ContactStep, EmergencyEvent, EventId, PersonId},
    error::WecareResult,
    metric::{HealthMetric, MetricType},
    prescription::{Prescription, PrescriptionId},
};

/// Read access to the `health_metrics` table.
///
/// Records are created by the external device/ingestion pipeline; this
/// system never writes them. Implementations may return rows in any order —
/// ordering guarantees are the adapter's job.
pub trait MetricStore: Send + Sync {
    /// Return up to `limit` of the most recent records, in no particular
    /// order.
    fn fetch_latest(&self, limit: usize) -> WecareResult<Vec<HealthMetric>>;

    /// Return every record of `metric_type`, in no particular order.
    fn fetch_of_type(&self, metric_type: MetricType) -> WecareResult<Vec<HealthMetric>>;
}

/// Create and mutate rows of the `emergency_events` table.
///
/// Events are append-plus-mutate: created once, updated by flag changes and
/// resolution, never deleted.
pub trait EventStore: Send + Sync {
    /// Persist a new Active episode.
    ///
    /// Implementations MUST reject the insert with
    /// `WecareError::EmergencyAlreadyActive` when another episode for the
    /// same person is still Active. This is the server-side uniqueness
    /// constraint that keeps "one Active episode per monitored person" true
    /// regardless of client state.
    fn create_event(&self, event: &EmergencyEvent) -> WecareResult<EventId>;

    /// Flip the contact flag driven by `step` on the stored event.
    fn mark_contact_done(&self, id: EventId, step: ContactStep) -> WecareResult<()>;

    /// Set `status = Resolved` and `resolved_at` on the stored event.
    fn resolve_event(&self, id: EventId, resolved_at: DateTime<Utc>) -> WecareResult<()>;

    /// The currently Active episode for `person_id`, if any.
    fn active_event_for(&self, person_id: &PersonId) -> WecareResult<Option<EmergencyEvent>>;

    /// Fetch one event by ID.
    fn get_event(&self, id: EventId) -> WecareResult<Option<EmergencyEvent>>;
}

/// Create rows of the `prescriptions` table.
///
/// No update or delete operations — corrections are re-submissions.
pub trait PrescriptionStore: Send + Sync {
    /// Persist a newly submitted prescription.
    fn create_prescription(&self, prescription: &Prescription) -> WecareResult<PrescriptionId>;

    /// All prescriptions owned by `owner_id`, newest first.
    fn prescriptions_for(&self, owner_id: &str) -> WecareResult<Vec<Prescription>>;
}

/// The file bucket holding prescription attachments.
pub trait AttachmentBucket: Send + Sync {
    /// Store `bytes` under `path` and return a retrievable URL.
    ///
    /// Callers build `path` as `{owner_id}/{upload_millis}.{ext}` so uploads
    /// are scoped per user and keyed by upload timestamp.
    fn store(&self, path: &str, bytes: &[u8]) -> WecareResult<String>;
}

/// External delivery of emergency notifications.
///
/// The monitoring core only tracks the contact-flag checklist; actually
/// reaching contacts, dispatch, hospital, and insurance is this
/// collaborator's job.
pub trait Notifier: Send + Sync {
    /// Deliver the notification for one plan step.
    ///
    /// A returned error means delivery failed; the corresponding contact
    /// flag stays false and the episode remains Active.
    fn notify(&self, event: &EmergencyEvent, step: ContactStep) -> WecareResult<()>;
}
