//! Framing configuration shared by both directions of a connection.

use serde::{Deserialize, Serialize};

use crate::compression::CompressionMode;
use crate::constants::MAX_DEFLATE_LEVEL;
use crate::crypto::CipherBackend;
use crate::types::FramingError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Cipher implementation; output is identical for every choice.
    pub cipher_backend: CipherBackend,

    /// Per-packet compression; must match the peer.
    pub compression: CompressionMode,

    /// Upper bound on one application payload (encode input and decoded
    /// output). `None` = unbounded.
    pub max_payload_len: Option<usize>,
}

impl FramingConfig {
    pub fn with_backend(mut self, backend: CipherBackend) -> Self {
        self.cipher_backend = backend;
        self
    }

    pub fn with_compression(mut self, compression: CompressionMode) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_max_payload_len(mut self, max: usize) -> Self {
        self.max_payload_len = Some(max);
        self
    }

    pub fn validate(&self) -> Result<(), FramingError> {
        if let CompressionMode::Deflate { level } = self.compression {
            if level > MAX_DEFLATE_LEVEL {
                return Err(FramingError::Configuration(format!(
                    "invalid deflate level: {level}, must be 0..={MAX_DEFLATE_LEVEL}"
                )));
            }
        }

        self.cipher_backend
            .resolve()
            .map_err(|e| FramingError::Configuration(e.to_string()))?;

        Ok(())
    }
}
