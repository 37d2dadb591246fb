//! Prescription form intake.
//!
//! Collects the structured fields, validates them, uploads the optional
//! attachment, and submits to the backend. On success the form resets to
//! empty strings; on a backend failure the fields stay intact so the user
//! can retry by re-submitting. Validation errors block submission entirely
//! and are surfaced inline.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use wecare_contracts::{
    error::{WecareError, WecareResult},
    notice::Notice,
    prescription::{Prescription, PrescriptionId},
};
use wecare_core::traits::{AttachmentBucket, PrescriptionStore};

/// File extensions accepted for a prescription attachment.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// A file the user picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The prescription entry form.
///
/// Field semantics mirror the entry UI: every field is a string and the
/// empty string means "not filled in". Only `medication_name` is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescriptionForm {
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescribing_doctor: String,
    pub start_date: String,
    pub end_date: String,
    pub notes: String,
    pub attachment: Option<AttachmentUpload>,
}

impl PrescriptionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the form without side effects.
    ///
    /// `medication_name` must be non-blank; an attachment, if present, must
    /// carry an allow-listed extension (case-insensitive).
    pub fn validate(&self) -> WecareResult<()> {
        if self.medication_name.trim().is_empty() {
            return Err(WecareError::ValidationFailed {
                field: "medication_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(attachment) = &self.attachment {
            let ext = attachment
                .filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase());
            let allowed = ext
                .as_deref()
                .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e));
            if !allowed {
                return Err(WecareError::AttachmentRejected {
                    filename: attachment.filename.clone(),
                    reason: format!(
                        "extension not allowed (accepted: {})",
                        ALLOWED_EXTENSIONS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    /// Submit the form on behalf of `owner_id`.
    ///
    /// Returns `Err` only for validation failures (which block submission
    /// and leave everything untouched). Backend failures are caught here
    /// and reported as an error `Notice` with the form intact — the user
    /// retries by re-submitting. On success the form resets and a success
    /// notice is returned.
    pub fn submit(
        &mut self,
        owner_id: &str,
        store: &dyn PrescriptionStore,
        bucket: &dyn AttachmentBucket,
        now: DateTime<Utc>,
    ) -> WecareResult<Notice> {
        self.validate()?;

        let attachment_url = match &self.attachment {
            Some(attachment) => {
                // Per-user path keyed by upload timestamp, extension kept.
                let ext = attachment
                    .filename
                    .rsplit_once('.')
                    .map(|(_, e)| e.to_lowercase())
                    .unwrap_or_default();
                let path = format!("{}/{}.{}", owner_id, now.timestamp_millis(), ext);

                match bucket.store(&path, &attachment.bytes) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(filename = %attachment.filename, error = %e, "attachment upload failed");
                        return Ok(Notice::error("Failed to upload prescription file"));
                    }
                }
            }
            None => None,
        };

        let prescription = Prescription {
            id: PrescriptionId::new(),
            owner_id: owner_id.to_string(),
            medication_name: self.medication_name.clone(),
            dosage: self.dosage.clone(),
            frequency: self.frequency.clone(),
            prescribing_doctor: self.prescribing_doctor.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            notes: self.notes.clone(),
            attachment_url,
            created_at: now,
        };

        match store.create_prescription(&prescription) {
            Ok(id) => {
                info!(prescription_id = %id.0, medication = %prescription.medication_name, "prescription added");
                *self = Self::default();
                Ok(Notice::success("Prescription added successfully"))
            }
            Err(e) => {
                warn!(error = %e, "prescription submission failed");
                Ok(Notice::error("Failed to add prescription"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;

    use super::*;

    // ── Mock backend ─────────────────────────────────────────────────────────

    #[derive(Default)]
    struct MockBackend {
        prescriptions: Mutex<Vec<Prescription>>,
        uploads: Mutex<Vec<String>>,
        fail_store: bool,
    }

    impl PrescriptionStore for MockBackend {
        fn create_prescription(&self, prescription: &Prescription) -> WecareResult<PrescriptionId> {
            if self.fail_store {
                return Err(WecareError::StoreUnavailable {
                    reason: "insert failed".to_string(),
                });
            }
            self.prescriptions.lock().unwrap().push(prescription.clone());
            Ok(prescription.id)
        }

        fn prescriptions_for(&self, owner_id: &str) -> WecareResult<Vec<Prescription>> {
            Ok(self
                .prescriptions
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.owner_id == owner_id)
                .cloned()
                .collect())
        }
    }

    impl AttachmentBucket for MockBackend {
        fn store(&self, path: &str, _bytes: &[u8]) -> WecareResult<String> {
            self.uploads.lock().unwrap().push(path.to_string());
            Ok(format!("mock://{}", path))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 20, 9, 30, 0).unwrap()
    }

    fn filled_form() -> PrescriptionForm {
        PrescriptionForm {
            medication_name: "Lisinopril".to_string(),
            dosage: "10mg".to_string(),
            frequency: "Once daily".to_string(),
            ..Default::default()
        }
    }

    // ── Test cases ───────────────────────────────────────────────────────────

    #[test]
    fn successful_submit_resets_the_form_and_reports_success() {
        let backend = MockBackend::default();
        let mut form = filled_form();

        let notice = form.submit("user-1", &backend, &backend, now()).unwrap();

        assert!(notice.is_success());
        // All fields reset to empty strings.
        assert_eq!(form, PrescriptionForm::default());

        let stored = backend.prescriptions_for("user-1").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].medication_name, "Lisinopril");
        assert_eq!(stored[0].dosage, "10mg");
        assert_eq!(stored[0].frequency, "Once daily");
        assert_eq!(stored[0].attachment_url, None);
    }

    #[test]
    fn empty_medication_name_blocks_submission() {
        let backend = MockBackend::default();
        let mut form = PrescriptionForm {
            dosage: "10mg".to_string(),
            ..Default::default()
        };

        let err = form.submit("user-1", &backend, &backend, now()).unwrap_err();
        assert!(matches!(err, WecareError::ValidationFailed { ref field, .. } if field == "medication_name"));

        // Nothing was stored and the form kept its contents.
        assert!(backend.prescriptions_for("user-1").unwrap().is_empty());
        assert_eq!(form.dosage, "10mg");
    }

    #[test]
    fn whitespace_only_medication_name_is_rejected() {
        let form = PrescriptionForm {
            medication_name: "   ".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn attachment_goes_to_a_per_user_timestamped_path() {
        let backend = MockBackend::default();
        let mut form = filled_form();
        form.attachment = Some(AttachmentUpload {
            filename: "Scan.PDF".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        });

        let notice = form.submit("user-1", &backend, &backend, now()).unwrap();
        assert!(notice.is_success());

        let uploads = backend.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        let expected = format!("user-1/{}.pdf", now().timestamp_millis());
        assert_eq!(uploads[0], expected);

        let stored = backend.prescriptions_for("user-1").unwrap();
        assert_eq!(stored[0].attachment_url.as_deref(), Some(format!("mock://{}", expected).as_str()));
    }

    #[test]
    fn disallowed_extension_is_rejected_before_any_upload() {
        let backend = MockBackend::default();
        let mut form = filled_form();
        form.attachment = Some(AttachmentUpload {
            filename: "prescription.exe".to_string(),
            bytes: vec![0u8; 4],
        });

        let err = form.submit("user-1", &backend, &backend, now()).unwrap_err();
        assert!(matches!(err, WecareError::AttachmentRejected { .. }));
        assert!(backend.uploads.lock().unwrap().is_empty());
    }

    #[test]
    fn filename_without_extension_is_rejected() {
        let form = PrescriptionForm {
            medication_name: "Lisinopril".to_string(),
            attachment: Some(AttachmentUpload {
                filename: "scan".to_string(),
                bytes: vec![],
            }),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(),
            Err(WecareError::AttachmentRejected { .. })
        ));
    }

    #[test]
    fn backend_failure_keeps_the_form_and_reports_an_error_notice() {
        let backend = MockBackend {
            fail_store: true,
            ..Default::default()
        };
        let mut form = filled_form();

        let notice = form.submit("user-1", &backend, &backend, now()).unwrap();

        assert!(!notice.is_success());
        // Form intact for a user-initiated retry.
        assert_eq!(form.medication_name, "Lisinopril");
    }
}
