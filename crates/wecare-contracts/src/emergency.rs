//! Emergency episode records.
//!
//! An `EmergencyEvent` is created when the emergency button is pressed and
//! is mutated only by contact-flag updates and resolution. Events are never
//! deleted — resolved episodes remain on record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of one emergency episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub uuid::Uuid);

impl EventId {
    /// Create a new, unique event ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable identifier of the monitored person an episode belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a stored emergency event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Active,
    Resolved,
}

/// One step of the notification workflow, identified by the contact flag
/// it drives.
///
/// Expressed in kebab-case in notification plan TOML:
/// ```toml
/// contact = "emergency-contacts"
/// contact = "ambulance"
/// contact = "hospital"
/// contact = "insurance"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStep {
    EmergencyContacts,
    Ambulance,
    Hospital,
    Insurance,
}

impl std::fmt::Display for ContactStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContactStep::EmergencyContacts => "emergency-contacts",
            ContactStep::Ambulance => "ambulance",
            ContactStep::Hospital => "hospital",
            ContactStep::Insurance => "insurance",
        };
        f.write_str(name)
    }
}

/// Per-episode checklist of notification steps that have succeeded.
///
/// All flags start false on trigger. This system only tracks the flags;
/// actual delivery is performed by the external notifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFlags {
    pub emergency_contacts_notified: bool,
    pub ambulance_contacted: bool,
    pub hospital_contacted: bool,
    pub insurance_contacted: bool,
}

impl ContactFlags {
    /// Flip the flag driven by `step`.
    pub fn mark_done(&mut self, step: ContactStep) {
        match step {
            ContactStep::EmergencyContacts => self.emergency_contacts_notified = true,
            ContactStep::Ambulance => self.ambulance_contacted = true,
            ContactStep::Hospital => self.hospital_contacted = true,
            ContactStep::Insurance => self.insurance_contacted = true,
        }
    }

    /// True when every notification step has succeeded.
    pub fn all_done(&self) -> bool {
        self.emergency_contacts_notified
            && self.ambulance_contacted
            && self.hospital_contacted
            && self.insurance_contacted
    }
}

/// One emergency episode as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyEvent {
    pub id: EventId,
    pub person_id: PersonId,
    /// Free-form trigger kind (e.g. "button_press", "fall_detected").
    pub event_type: String,
    pub status: EventStatus,
    pub contact_flags: ContactFlags,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    /// Set exactly once, when the episode is resolved.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl EmergencyEvent {
    /// Build a fresh Active episode with all contact flags false.
    pub fn new_active(
        person_id: PersonId,
        event_type: impl Into<String>,
        notes: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            person_id,
            event_type: event_type.into(),
            status: EventStatus::Active,
            contact_flags: ContactFlags::default(),
            notes: notes.into(),
            created_at,
            resolved_at: None,
        }
    }
}
