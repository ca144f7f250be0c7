//! compression/mod.rs
//! Per-packet compression and decompression.
//!
//! Notes:
//! - Every packet is compressed as one self-contained unit, so packets never
//!   depend on each other's compression state.
//! - Decompression is strict and fails fast on malformed input.

pub mod types;
pub mod registry;
pub mod codecs;

pub use types::*;
pub use registry::*;
