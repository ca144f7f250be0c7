//! crypto/mod.rs
//! Cipher and checksum primitives of the framing layer.

pub mod types;
pub mod checksum;
pub mod portable;
#[cfg(feature = "native-cipher")]
pub mod native;
pub mod stream_cipher;

pub use types::*;
pub use checksum::*;
pub use stream_cipher::*;
