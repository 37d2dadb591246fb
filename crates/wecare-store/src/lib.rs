//! # wecare-store
//!
//! The data plane of the WeCareWell monitoring core:
//!
//! - `adapter` — normalized metric queries (latest, series, current value)
//!   plus the stale-fetch guard
//! - `live`    — the push channel signaling metric table changes
//! - `memory`  — in-memory reference implementation of the backend traits
//! - `sleep`   — night aggregation for the sleep card

pub mod adapter;
pub mod live;
pub mod memory;
pub mod sleep;

pub use adapter::{FetchSequence, FetchTicket, MetricAdapter, SERIES_WINDOW};
pub use live::{ChangeKind, LiveUpdateHub, Subscription};
pub use memory::InMemoryBackend;
