//! Notification plan configuration.
//!
//! The checklist of notification steps run when an emergency triggers is
//! loaded from a TOML document. Steps execute in declaration order; each
//! step drives exactly one contact flag on the stored event.

use std::path::Path;

use serde::{Deserialize, Serialize};

use wecare_contracts::{
    emergency::ContactStep,
    error::{WecareError, WecareResult},
};

/// One configured notification step.
///
/// Example:
/// ```toml
/// [[steps]]
/// contact = "emergency-contacts"
/// description = "Call the listed family contacts"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    /// Which contact flag this step drives.
    pub contact: ContactStep,
    /// Human-readable explanation, shown in the checklist UI.
    pub description: String,
}

/// The ordered notification plan deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPlan {
    /// Steps in execution order.
    pub steps: Vec<PlanStep>,
}

impl NotificationPlan {
    /// Parse `s` as TOML and validate the plan.
    ///
    /// Returns `WecareError::ConfigError` if the TOML is malformed, the
    /// plan is empty, or a contact appears more than once.
    pub fn from_toml_str(s: &str) -> WecareResult<Self> {
        let plan: NotificationPlan = toml::from_str(s).map_err(|e| WecareError::ConfigError {
            reason: format!("failed to parse notification plan TOML: {}", e),
        })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Read the file at `path` and parse it as a notification plan.
    pub fn from_file(path: &Path) -> WecareResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WecareError::ConfigError {
            reason: format!("failed to read plan file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The built-in plan: contacts first, then ambulance, hospital,
    /// insurance — the order the original checklist displays them.
    pub fn standard() -> Self {
        let step = |contact: ContactStep, description: &str| PlanStep {
            contact,
            description: description.to_string(),
        };
        Self {
            steps: vec![
                step(ContactStep::EmergencyContacts, "Call the listed family contacts"),
                step(ContactStep::Ambulance, "Dispatch an ambulance to the home address"),
                step(ContactStep::Hospital, "Alert the preferred hospital's emergency desk"),
                step(ContactStep::Insurance, "Open a claim with the insurance provider"),
            ],
        }
    }

    fn validate(&self) -> WecareResult<()> {
        if self.steps.is_empty() {
            return Err(WecareError::ConfigError {
                reason: "notification plan has no steps".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.contact) {
                return Err(WecareError::ConfigError {
                    reason: format!("contact '{}' appears more than once in the plan", step.contact),
                });
            }
        }
        Ok(())
    }
}
