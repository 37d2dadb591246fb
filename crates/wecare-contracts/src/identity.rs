//! Dashboard roles and tab identifiers.
//!
//! A role is a coarse access category derived from the email domain of the
//! authenticated identity. It is never persisted — the resolver recomputes
//! it on every load from the email string alone.

use serde::{Deserialize, Serialize};

/// The dashboard role of a signed-in user.
///
/// Exhaustive matching over this enum is how panels are selected; adding a
/// role without handling it everywhere is a compile-time error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Marketing,
    Finance,
    Support,
    /// Regular customers. The only role with sub-tabs.
    Customer,
}

/// The tabs available to the `Customer` role.
///
/// Ephemeral UI selection state; not persisted across sessions. Non-customer
/// roles have a single implicit panel and no tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    Dashboard,
    Emergency,
    Prescriptions,
    Insurance,
    Diagnosis,
    Settings,
}

impl DashboardTab {
    /// The fixed, exhaustive tab set for the customer role.
    pub const ALL: [DashboardTab; 6] = [
        DashboardTab::Dashboard,
        DashboardTab::Emergency,
        DashboardTab::Prescriptions,
        DashboardTab::Insurance,
        DashboardTab::Diagnosis,
        DashboardTab::Settings,
    ];
}

impl std::fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DashboardTab::Dashboard => "dashboard",
            DashboardTab::Emergency => "emergency",
            DashboardTab::Prescriptions => "prescriptions",
            DashboardTab::Insurance => "insurance",
            DashboardTab::Diagnosis => "diagnosis",
            DashboardTab::Settings => "settings",
        };
        f.write_str(name)
    }
}
