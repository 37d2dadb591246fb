//! # wecare-contracts
//!
//! Shared types and contracts for the WeCareWell monitoring core.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod emergency;
pub mod error;
pub mod identity;
pub mod metric;
pub mod notice;
pub mod prescription;
pub mod sleep;

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::emergency::{
        ContactFlags, ContactStep, EmergencyEvent, EventId, EventStatus, PersonId,
    };
    use super::error::WecareError;
    use super::metric::{HealthMetric, MetricValue};

    // ── ContactFlags ─────────────────────────────────────────────────────────

    #[test]
    fn contact_flags_start_all_false() {
        let flags = ContactFlags::default();
        assert!(!flags.emergency_contacts_notified);
        assert!(!flags.ambulance_contacted);
        assert!(!flags.hospital_contacted);
        assert!(!flags.insurance_contacted);
        assert!(!flags.all_done());
    }

    #[test]
    fn contact_flags_mark_done_flips_only_the_matching_flag() {
        let mut flags = ContactFlags::default();
        flags.mark_done(ContactStep::Hospital);

        assert!(flags.hospital_contacted);
        assert!(!flags.emergency_contacts_notified);
        assert!(!flags.ambulance_contacted);
        assert!(!flags.insurance_contacted);
    }

    #[test]
    fn contact_flags_all_done_requires_every_step() {
        let mut flags = ContactFlags::default();
        flags.mark_done(ContactStep::EmergencyContacts);
        flags.mark_done(ContactStep::Ambulance);
        flags.mark_done(ContactStep::Hospital);
        assert!(!flags.all_done());

        flags.mark_done(ContactStep::Insurance);
        assert!(flags.all_done());
    }

    // ── EmergencyEvent ───────────────────────────────────────────────────────

    #[test]
    fn new_active_event_has_clean_checklist() {
        let event = EmergencyEvent::new_active(
            PersonId::new("person-1"),
            "button_press",
            "pressed from dashboard",
            Utc::now(),
        );

        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.contact_flags, ContactFlags::default());
        assert!(event.resolved_at.is_none());
    }

    #[test]
    fn event_id_new_produces_unique_values() {
        let ids: Vec<EventId> = (0..100).map(|_| EventId::new()).collect();
        let unique: std::collections::HashSet<String> =
            ids.iter().map(|id| id.0.to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    // ── MetricValue wire shapes ──────────────────────────────────────────────

    #[test]
    fn metric_value_plain_number_deserializes() {
        let v: MetricValue = serde_json::from_str("72.5").unwrap();
        assert_eq!(v.as_f64(), 72.5);
    }

    #[test]
    fn metric_value_structured_object_deserializes() {
        let v: MetricValue = serde_json::from_str(r#"{ "value": 98 }"#).unwrap();
        assert_eq!(v.as_f64(), 98.0);
    }

    #[test]
    fn health_metric_value_normalizes_both_wire_shapes() {
        let plain: HealthMetric = serde_json::from_value(serde_json::json!({
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "metric_type": "heart_rate",
            "value": 72.5,
            "recorded_at": "2026-08-20T06:00:00Z",
        }))
        .unwrap();
        assert_eq!(plain.value, 72.5);

        let structured: HealthMetric = serde_json::from_value(serde_json::json!({
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "metric_type": "spo2",
            "value": { "value": 98.0 },
            "recorded_at": "2026-08-20T06:00:00Z",
        }))
        .unwrap();
        assert_eq!(structured.value, 98.0);

        // Re-serialization always emits the bare-number shape.
        let wire = serde_json::to_value(&structured).unwrap();
        assert_eq!(wire["value"], serde_json::json!(98.0));
    }

    // ── ContactStep TOML spelling ────────────────────────────────────────────

    #[test]
    fn contact_step_serializes_kebab_case() {
        let json = serde_json::to_string(&ContactStep::EmergencyContacts).unwrap();
        assert_eq!(json, r#""emergency-contacts""#);

        let decoded: ContactStep = serde_json::from_str(r#""ambulance""#).unwrap();
        assert_eq!(decoded, ContactStep::Ambulance);
    }

    // ── WecareError display messages ─────────────────────────────────────────

    #[test]
    fn error_validation_failed_display() {
        let err = WecareError::ValidationFailed {
            field: "medication_name".to_string(),
            reason: "must not be empty".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("medication_name"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn error_already_active_display() {
        let err = WecareError::EmergencyAlreadyActive {
            person_id: "person-7".to_string(),
        };
        assert!(err.to_string().contains("person-7"));
    }

    #[test]
    fn error_invalid_transition_display() {
        let err = WecareError::InvalidTransition {
            from: "resolving".to_string(),
            action: "trigger".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("trigger"));
        assert!(msg.contains("resolving"));
    }

    #[test]
    fn error_attachment_rejected_display() {
        let err = WecareError::AttachmentRejected {
            filename: "scan.exe".to_string(),
            reason: "extension not allowed".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("scan.exe"));
        assert!(msg.contains("extension not allowed"));
    }

    #[test]
    fn error_auth_required_display() {
        assert_eq!(WecareError::AuthRequired.to_string(), "authentication required");
    }
}
