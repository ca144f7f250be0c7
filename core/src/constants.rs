//! Wire-level constants shared by both peers.
//!
//! Changing any of these breaks interoperability with an unchanged peer.

/// AES-256 key length (bytes). The same secret keys the cipher and the checksum.
pub const KEY_LEN: usize = 32;

/// CFB8 initialization vector length (one AES block).
pub const IV_LEN: usize = 16;

/// Truncated SHA-256 tag appended to every packet before encryption.
pub const CHECKSUM_LEN: usize = 8;

/// Counter encoding inside the checksum input: little-endian u64.
pub const COUNTER_LEN: usize = 8;

/// Cipher suite identifiers (informational, used in logs and telemetry).
pub mod cipher_ids {
    pub const AES256_CFB8: &str = "aes-256-cfb8";
}

/// Codec identifiers (informational, used in logs and errors).
pub mod codec_ids {
    pub const DEFLATE_RAW: &str = "deflate-raw";
    pub const STORED: &str = "stored";
}

/// Default raw-deflate level: balanced ratio/speed.
pub const DEFAULT_DEFLATE_LEVEL: u32 = 7;

/// Highest level accepted by the deflate encoder.
pub const MAX_DEFLATE_LEVEL: u32 = 9;
