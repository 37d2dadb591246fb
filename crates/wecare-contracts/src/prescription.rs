//! Prescription records created through form intake.
//!
//! A prescription is owned by the user who submitted it. There are no
//! partial-update semantics — corrections are made by re-submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of one submitted prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrescriptionId(pub uuid::Uuid);

impl PrescriptionId {
    /// Create a new, unique prescription ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PrescriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One prescription as stored by the backend.
///
/// `medication_name` is the only required field; every other string field
/// may be empty. `attachment_url` points at the uploaded document in the
/// file bucket when one was provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    /// The user who submitted (and owns) this record.
    pub owner_id: String,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescribing_doctor: String,
    pub start_date: String,
    pub end_date: String,
    pub notes: String,
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
