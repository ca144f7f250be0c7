//! Stored (no-op) codec for connections that negotiated no compression.

use crate::compression::types::{CompressionError, Compressor, Decompressor};

pub struct StoredCompressor;

impl Compressor for StoredCompressor {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        out.extend_from_slice(input);
        Ok(())
    }
}

pub struct StoredDecompressor {
    max_output: Option<usize>,
}

impl StoredDecompressor {
    pub fn new(max_output: Option<usize>) -> Self {
        Self { max_output }
    }
}

impl Decompressor for StoredDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if let Some(max) = self.max_output {
            if input.len() > max {
                return Err(CompressionError::OutputTooLarge { max });
            }
        }
        out.extend_from_slice(input);
        Ok(())
    }
}
