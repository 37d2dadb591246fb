//! Toast-style user notices.
//!
//! Operations that complete (or fail) asynchronously from the user's point
//! of view report their outcome as a `Notice` rather than an error — the
//! panel stays alive and the user decides whether to retry.

use serde::{Deserialize, Serialize};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Success,
    Error,
}

/// A transient, user-facing notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == NoticeSeverity::Success
    }
}
