//! compression/types.rs
//! Codec traits, selection enum and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_DEFLATE_LEVEL;

/// Per-packet compression mode. Both peers must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "codec", rename_all = "snake_case")]
pub enum CompressionMode {
    /// Raw deflate (no zlib/gzip container) at a fixed level.
    Deflate { level: u32 },
    /// Payload passes through unchanged.
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        CompressionMode::Deflate { level: DEFAULT_DEFLATE_LEVEL }
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("invalid compression level {level} (max {max})")]
    InvalidLevel { level: u32, max: u32 },

    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: &'static str, msg: String },

    /// Input ended before the end-of-stream marker.
    #[error("codec {codec}: stream truncated after {consumed} input bytes")]
    Truncated { codec: &'static str, consumed: usize },

    #[error("codec {codec}: {trailing} trailing bytes after end of stream")]
    TrailingData { codec: &'static str, trailing: usize },

    #[error("decompressed payload exceeds {max} bytes")]
    OutputTooLarge { max: usize },
}

impl From<std::io::Error> for CompressionError {
    fn from(e: std::io::Error) -> Self {
        CompressionError::CodecProcessFailed {
            codec: "io",
            msg: e.to_string(),
        }
    }
}

// Require Send so codecs can move into a worker thread with their pipeline.
pub trait Compressor: Send {
    /// Compress one complete packet payload, appending to `out`.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

pub trait Decompressor: Send {
    /// Decompress one complete packet payload, appending to `out`.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}
