//! The dashboard composer: role-partitioned panel selection.
//!
//! Given a role and the active tab, the composer decides which panel is on
//! screen and owns the tab transition rules. It is a small state machine:
//! the states are tab identifiers, partitioned by role, with no terminal
//! state — it lives for the session.

use tracing::{debug, warn};

use wecare_contracts::identity::{DashboardTab, Role};

/// The panel currently on screen.
///
/// Non-customer roles each map to a single fixed panel with no tab bar.
/// The customer role carries its active tab. Matching is exhaustive by
/// construction — a new role or tab cannot be silently unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Marketing,
    Finance,
    Support,
    Customer(DashboardTab),
}

/// Owns the `(role, active_tab)` pair for one session.
#[derive(Debug, Clone)]
pub struct DashboardComposer {
    role: Role,
    /// Only meaningful while `role == Customer`; kept at the initial tab
    /// otherwise so the struct stays trivially copyable across renders.
    active_tab: DashboardTab,
}

impl DashboardComposer {
    /// Build a composer for a freshly resolved role.
    ///
    /// The initial state is the Dashboard tab for customers and the role's
    /// single panel otherwise.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            active_tab: DashboardTab::Dashboard,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The tab a customer currently has selected.
    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    /// Select a tab.
    ///
    /// Valid only for the customer role; every customer tab is in the
    /// allowed set, so for customers this always succeeds. For any other
    /// role the selection is a no-op — there is no tab bar to drive — and
    /// the method returns `false`.
    pub fn set_active_tab(&mut self, tab: DashboardTab) -> bool {
        match self.role {
            Role::Customer => {
                debug!(tab = %tab, "tab selected");
                self.active_tab = tab;
                true
            }
            Role::Marketing | Role::Finance | Role::Support => {
                warn!(role = ?self.role, tab = %tab, "tab selection ignored for tabless role");
                false
            }
        }
    }

    /// The panel to render for the current `(role, active_tab)` state.
    pub fn active_panel(&self) -> Panel {
        match self.role {
            Role::Marketing => Panel::Marketing,
            Role::Finance => Panel::Finance,
            Role::Support => Panel::Support,
            Role::Customer => Panel::Customer(self.active_tab),
        }
    }
}
