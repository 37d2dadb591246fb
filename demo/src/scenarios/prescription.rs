//! Scenario 3: Prescription Intake.
//!
//! Shows the validation path (missing medication name blocks submission),
//! then a successful submission with an attachment: upload to a per-user
//! timestamped path, store, form reset, success notice.

use chrono::Utc;

use wecare_contracts::error::{WecareError, WecareResult};
use wecare_core::traits::PrescriptionStore;
use wecare_intake::{AttachmentUpload, PrescriptionForm};
use wecare_store::memory::InMemoryBackend;

/// Run Scenario 3: prescription form intake.
pub fn run_scenario() -> WecareResult<()> {
    println!("=== Scenario 3: Prescription Intake ===");
    println!();

    let backend = InMemoryBackend::new();
    let owner = "grandma";

    // ── Validation failure ────────────────────────────────────────────────────

    let mut form = PrescriptionForm {
        dosage: "10mg".to_string(),
        ..Default::default()
    };

    println!("  Submitting with an empty medication name...");
    match form.submit(owner, &backend, &backend, Utc::now()) {
        Err(WecareError::ValidationFailed { field, reason }) => {
            println!("  Blocked inline: '{}' {}", field, reason);
        }
        other => println!("  Unexpected outcome: {:?}", other),
    }
    println!();

    // ── Successful submission ─────────────────────────────────────────────────

    form.medication_name = "Lisinopril".to_string();
    form.frequency = "Once daily".to_string();
    form.prescribing_doctor = "Dr. A. Rivera".to_string();
    form.attachment = Some(AttachmentUpload {
        filename: "prescription-scan.pdf".to_string(),
        bytes: b"%PDF-1.4 (demo)".to_vec(),
    });

    println!("  Submitting Lisinopril 10mg, once daily, with a PDF scan...");
    let notice = form.submit(owner, &backend, &backend, Utc::now())?;
    println!("  Notice: {}", notice.message);
    println!(
        "  Form reset: medication_name is now {:?}",
        form.medication_name
    );
    println!();

    let stored = backend.prescriptions_for(owner)?;
    println!("  Prescriptions on record for '{}': {}", owner, stored.len());
    for prescription in &stored {
        println!(
            "    {} {} — attachment: {}",
            prescription.medication_name,
            prescription.dosage,
            prescription.attachment_url.as_deref().unwrap_or("none")
        );
    }
    println!();

    println!("  Scenario 3 complete.");
    println!();
    Ok(())
}
