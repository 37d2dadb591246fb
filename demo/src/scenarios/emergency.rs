//! Scenario 2: Emergency Lifecycle.
//!
//! Walks one episode through the full state machine: trigger from Clear
//! (notification plan runs, checklist fills), a rejected duplicate trigger,
//! a failed resolution attempt that reverts to Active, and the successful
//! resolution that ends Clear with `resolved_at` set.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use wecare_contracts::{
    emergency::{ContactStep, EmergencyEvent, PersonId},
    error::{WecareError, WecareResult},
};
use wecare_core::traits::{EventStore, Notifier};
use wecare_emergency::{EmergencyMonitor, NotificationPlan};
use wecare_store::memory::InMemoryBackend;

/// Notification plan for the demo household.
const NOTIFICATION_PLAN: &str = include_str!("../../plans/notification.toml");

/// A notifier that "delivers" by logging. Real deployments put the
/// telephony/dispatch integration behind this trait.
struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, event: &EmergencyEvent, step: ContactStep) -> WecareResult<()> {
        info!(event_id = %event.id.0, contact = %step, "notification delivered");
        Ok(())
    }
}

fn checklist_line(done: bool, label: &str) -> String {
    format!("    [{}] {}", if done { "x" } else { " " }, label)
}

/// Run Scenario 2: the full emergency lifecycle.
pub fn run_scenario() -> WecareResult<()> {
    println!("=== Scenario 2: Emergency Lifecycle ===");
    println!();

    let backend = InMemoryBackend::new();
    let plan = NotificationPlan::from_toml_str(NOTIFICATION_PLAN)?;
    let mut monitor = EmergencyMonitor::new(
        PersonId::new("grandma"),
        Arc::new(backend.clone()),
        Arc::new(LoggingNotifier),
        plan,
    )?;

    println!("  State: Clear — no active emergencies.");
    println!("  Emergency button pressed...");
    let event = monitor.trigger("button_press", "Pressed from the dashboard", Utc::now())?;

    println!("  State: Active (event {})", event.id.0);
    println!("  Notification checklist:");
    println!("{}", checklist_line(event.contact_flags.emergency_contacts_notified, "Emergency contacts"));
    println!("{}", checklist_line(event.contact_flags.ambulance_contacted, "Ambulance"));
    println!("{}", checklist_line(event.contact_flags.hospital_contacted, "Hospital"));
    println!("{}", checklist_line(event.contact_flags.insurance_contacted, "Insurance"));
    println!();

    // A second press while the episode is active must be rejected.
    match monitor.trigger("button_press", "", Utc::now()) {
        Err(WecareError::InvalidTransition { .. }) => {
            println!("  Second button press rejected: episode already active.");
        }
        other => println!("  Unexpected outcome for duplicate trigger: {:?}", other.map(|e| e.id)),
    }
    println!();

    // First resolution attempt fails; the episode must not be lost.
    println!("  Mark Resolved pressed (resolve control disabled while pending)...");
    monitor.begin_resolve()?;
    let notice = monitor.fail_resolution("backend timeout")?;
    println!("  Notice: {}", notice.message);
    println!("  State: Active again — resolve control re-enabled.");
    println!();

    // Second attempt succeeds.
    println!("  Mark Resolved pressed again...");
    monitor.begin_resolve()?;
    let notice = monitor.confirm_resolved(Utc::now())?;
    println!("  Notice: {}", notice.message);

    if let Some(resolved) = EventStore::get_event(&backend, event.id)? {
        println!(
            "  State: Clear — event {} resolved at {}.",
            resolved.id.0,
            resolved
                .resolved_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default()
        );
    }
    println!();

    println!("  Scenario 2 complete.");
    println!();
    Ok(())
}
