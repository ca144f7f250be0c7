//! compression/registry.rs
//! Codec factory functions.

use crate::compression::codecs::{DeflateCompressor, DeflateDecompressor, StoredCompressor, StoredDecompressor};
use crate::compression::types::{CompressionError, CompressionMode, Compressor, Decompressor};
use crate::constants::codec_ids;

pub fn codec_name(mode: CompressionMode) -> &'static str {
    match mode {
        CompressionMode::Deflate { .. } => codec_ids::DEFLATE_RAW,
        CompressionMode::None => codec_ids::STORED,
    }
}

pub fn create_compressor(mode: CompressionMode) -> Result<Box<dyn Compressor + Send>, CompressionError> {
    match mode {
        CompressionMode::Deflate { level } => Ok(Box::new(DeflateCompressor::new(level)?)),
        CompressionMode::None => Ok(Box::new(StoredCompressor)),
    }
}

/// `max_output` bounds the size of one decompressed packet.
pub fn create_decompressor(
    mode: CompressionMode,
    max_output: Option<usize>,
) -> Result<Box<dyn Decompressor + Send>, CompressionError> {
    match mode {
        CompressionMode::Deflate { .. } => Ok(Box::new(DeflateDecompressor::new(max_output))),
        CompressionMode::None => Ok(Box::new(StoredDecompressor::new(max_output))),
    }
}
