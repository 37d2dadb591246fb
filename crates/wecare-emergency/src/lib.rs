//! # wecare-emergency
//!
//! The emergency side of the WeCareWell monitoring core: the episode
//! lifecycle state machine (`monitor`) and the TOML-configured notification
//! plan (`plan`) that drives the contact-flag checklist.

pub mod monitor;
pub mod plan;

pub use monitor::{EmergencyMonitor, EpisodeState};
pub use plan::{NotificationPlan, PlanStep};
