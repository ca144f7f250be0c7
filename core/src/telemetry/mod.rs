//! telemetry/mod.rs
//! Per-direction counters, stage timers and immutable snapshots.
//!
//! Notes:
//! - Counters are owned by the pipeline direction that updates them; no
//!   atomics or locks are involved.
//! - Snapshots are plain values that can be logged or serialized.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
