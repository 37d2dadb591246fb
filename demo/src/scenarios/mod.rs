//! Demo scenarios exercising the monitoring core end to end over the
//! in-memory backend.

pub mod emergency;
pub mod prescription;
pub mod vitals;
