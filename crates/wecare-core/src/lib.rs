//! # wecare-core
//!
//! The seams and session logic of the WeCareWell monitoring core:
//!
//! - `traits`   — the opaque backend service boundary
//! - `role`     — role derivation from the authenticated identity
//! - `composer` — role-partitioned panel selection and tab state
//!
//! Panels pull data through the traits; wecare-store provides the metric
//! adapter, live update channel, and the in-memory reference backend.

pub mod composer;
pub mod role;
pub mod traits;
