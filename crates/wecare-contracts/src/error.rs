//! Error types for the WeCareWell monitoring core.
//!
//! All fallible operations across the workspace return `WecareResult<T>`.
//! Nothing in this taxonomy is fatal to the process — every variant degrades
//! to an error state inside the affected panel or a user-facing notice.

use thiserror::Error;

/// The unified error type for the monitoring core.
#[derive(Debug, Error)]
pub enum WecareError {
    /// A required form field is missing or malformed.
    ///
    /// Surfaced inline next to the field; blocks submission.
    #[error("validation failed for '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// The backend store could not serve a read or write.
    ///
    /// Treated as failed-but-retryable: the caller surfaces a transient
    /// notice and the user retries by re-issuing the action.
    #[error("backend store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// An emergency was triggered while another episode is still active
    /// for the same monitored person.
    #[error("an emergency is already active for person '{person_id}'")]
    EmergencyAlreadyActive { person_id: String },

    /// An emergency lifecycle action was requested from a state that does
    /// not permit it.
    #[error("invalid emergency transition: cannot {action} while {from}")]
    InvalidTransition { from: String, action: String },

    /// A notification plan or other configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An uploaded attachment was refused before submission.
    #[error("attachment '{filename}' rejected: {reason}")]
    AttachmentRejected { filename: String, reason: String },

    /// The session is missing or expired.
    ///
    /// The UI boundary maps this to a redirect to the sign-in entry point.
    #[error("authentication required")]
    AuthRequired,
}

/// Convenience alias used throughout the WeCareWell crates.
pub type WecareResult<T> = Result<T, WecareError>;
