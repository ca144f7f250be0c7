//! framing-core
//!
//! Secure packet framing for a stateful client/server connection.
//! Turns application payloads into compressed, checksummed, encrypted wire
//! packets and back. Handshake, transport and payload parsing live elsewhere.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;

pub mod compression;
pub mod crypto;
pub mod telemetry;

// Encode/decode orchestration
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::CompressionMode;
    pub use crate::config::FramingConfig;
    pub use crate::crypto::{CipherBackend, SecretKey};
    pub use crate::pipeline::{
        new_decoder, new_encoder, ConnectionCryptoState, DecodePipeline, DecodedPacket, Decoder,
        EncodePipeline, EncodedPacket, Encoder,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::FramingError;
}
