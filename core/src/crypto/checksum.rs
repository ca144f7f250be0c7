//! Sequence checksum.
//!
//! ```text
//! tag = SHA-256( counter (u64 LE) || compressed payload || secret )[0..8]
//! ```
//!
//! The counter binds the tag to the packet's position in its direction, so a
//! replayed, dropped or reordered packet fails verification on the receiver.
//! Pure function: the caller owns and advances the counter.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::constants::{CHECKSUM_LEN, COUNTER_LEN};

pub type Checksum = [u8; CHECKSUM_LEN];

#[inline]
pub fn compute_checksum(payload: &[u8], counter: u64, secret: &[u8]) -> Checksum {
    let mut hasher = Sha256::new();
    let counter: [u8; COUNTER_LEN] = counter.to_le_bytes();
    hasher.update(counter);
    hasher.update(payload);
    hasher.update(secret);
    let digest = hasher.finalize();

    let mut tag = [0u8; CHECKSUM_LEN];
    tag.copy_from_slice(&digest[..CHECKSUM_LEN]);
    tag
}

/// Constant-time comparison of a received tag against the expected one.
#[inline]
pub fn checksums_match(expected: &Checksum, received: &[u8]) -> bool {
    received.len() == CHECKSUM_LEN && bool::from(expected[..].ct_eq(received))
}
