//! # wecare-intake
//!
//! Form intake for the WeCareWell dashboard. Currently one form: the
//! prescription entry panel, with required-field validation, an
//! extension-allow-listed attachment upload, and reset-on-success
//! submission semantics.

pub mod prescription;

pub use prescription::{AttachmentUpload, PrescriptionForm, ALLOWED_EXTENSIONS};
