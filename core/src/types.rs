use thiserror::Error;

use crate::compression::CompressionError;
use crate::crypto::CipherError;

/// Unified framing error.
///
/// Every variant except `PayloadTooLarge` is fatal for the direction that
/// raised it: the pipeline closes and the connection owner is expected to
/// tear down and re-establish the secure channel.
#[derive(Debug, Error)]
pub enum FramingError {
    /// Invalid key/IV/backend/level at construction; nothing was created.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Received tag does not match the tag computed for this counter.
    #[error("checksum mismatch at counter {counter}: expected {expected}, received {received}")]
    ChecksumMismatch {
        counter: u64,
        expected: String,
        received: String,
    },

    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// Decrypted packet cannot even hold the checksum.
    #[error("packet too short: {len} bytes, checksum alone needs {min}")]
    PacketTooShort { len: usize, min: usize },

    /// Encode input above the configured bound; no state was touched.
    #[error("payload too large: {len} bytes (max {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("sequence counter exhausted")]
    CounterExhausted,

    /// The direction already failed fatally.
    #[error("pipeline closed after a fatal error")]
    PipelineClosed,
}

impl FramingError {
    /// Whether this error terminates the pipeline direction.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FramingError::PayloadTooLarge { .. })
    }
}
