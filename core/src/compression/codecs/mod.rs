//! compression/codecs/mod.rs
//! Per-packet codecs.

pub mod deflate;
pub mod stored;

pub use deflate::*;
pub use stored::*;
