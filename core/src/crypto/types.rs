use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{IV_LEN, KEY_LEN};

/// Which way a cipher handle transforms bytes.
///
/// CFB8 feeds back the *ciphertext* byte in both directions, so an encrypt
/// handle and a decrypt handle diverge as soon as they process one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("encrypt"),
            Direction::Decrypt => f.write_str("decrypt"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CipherError {
    /// Key length does not match AES-256.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// IV length does not match the AES block size.
    #[error("invalid iv length: expected={expected}, actual={actual}")]
    InvalidIvLen { expected: usize, actual: usize },

    /// The requested backend is not compiled into this build.
    #[error("cipher backend {0} is not available in this build")]
    BackendUnavailable(&'static str),

    /// A chunk was handed to a handle created for the other direction.
    #[error("{attempted} called on a {handle} handle")]
    WrongDirection {
        handle: Direction,
        attempted: Direction,
    },
}

/// Shared secret negotiated by the handshake.
///
/// Keys both the cipher and the sequence checksum. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| CipherError::InvalidKeyLen {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// IV convention of the originating protocol: the first block of the secret.
    pub fn derived_iv(&self) -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&self.0[..IV_LEN]);
        iv
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl From<[u8; KEY_LEN]> for SecretKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

/// Validate an IV slice and copy it into a fixed array.
pub fn iv_from_slice(iv: &[u8]) -> Result<[u8; IV_LEN], CipherError> {
    iv.try_into().map_err(|_| CipherError::InvalidIvLen {
        expected: IV_LEN,
        actual: iv.len(),
    })
}
