//! Raw deflate via flate2.
//!
//! Each packet is its own deflate stream (no header, no trailer, no
//! cross-packet dictionary). The decoder is strict: a stream must reach its
//! end-of-block marker, consume all input, and stay under the output bound.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::compression::types::{CompressionError, Compressor, Decompressor};
use crate::constants::{codec_ids::DEFLATE_RAW, MAX_DEFLATE_LEVEL};

pub struct DeflateCompressor {
    level: Compression,
}

impl DeflateCompressor {
    pub fn new(level: u32) -> Result<Self, CompressionError> {
        if level > MAX_DEFLATE_LEVEL {
            return Err(CompressionError::InvalidLevel {
                level,
                max: MAX_DEFLATE_LEVEL,
            });
        }
        Ok(Self {
            level: Compression::new(level),
        })
    }
}

impl Compressor for DeflateCompressor {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let mut enc = DeflateEncoder::new(out, self.level);
        enc.write_all(input).map_err(|e| CompressionError::CodecProcessFailed {
            codec: DEFLATE_RAW,
            msg: e.to_string(),
        })?;
        enc.finish().map_err(|e| CompressionError::CodecProcessFailed {
            codec: DEFLATE_RAW,
            msg: e.to_string(),
        })?;
        Ok(())
    }
}

pub struct DeflateDecompressor {
    inflater: Decompress,
    max_output: Option<usize>,
}

impl DeflateDecompressor {
    pub fn new(max_output: Option<usize>) -> Self {
        Self {
            inflater: Decompress::new(false),
            max_output,
        }
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // one stream per packet
        self.inflater.reset(false);
        let start = out.len();
        out.reserve(input.len().saturating_mul(2).max(64));

        loop {
            let in_before = self.inflater.total_in();
            let out_before = self.inflater.total_out();
            let consumed = in_before as usize;

            let status = self
                .inflater
                .decompress_vec(&input[consumed..], out, FlushDecompress::None)
                .map_err(|e| CompressionError::CodecProcessFailed {
                    codec: DEFLATE_RAW,
                    msg: e.to_string(),
                })?;

            let consumed = self.inflater.total_in() as usize;
            if let Some(max) = self.max_output {
                if out.len() - start > max {
                    return Err(CompressionError::OutputTooLarge { max });
                }
            }

            if status == Status::StreamEnd {
                if consumed != input.len() {
                    return Err(CompressionError::TrailingData {
                        codec: DEFLATE_RAW,
                        trailing: input.len() - consumed,
                    });
                }
                return Ok(());
            }

            let progressed = self.inflater.total_in() != in_before || self.inflater.total_out() != out_before;
            if !progressed {
                return Err(CompressionError::Truncated {
                    codec: DEFLATE_RAW,
                    consumed,
                });
            }

            if out.len() == out.capacity() {
                out.reserve(out.capacity().max(64));
            }
        }
    }
}
