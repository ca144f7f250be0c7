//! AES-256-CFB8 running stream cipher.
//!
//! Design notes:
//! - One handle per direction. The handle keeps its shift register across
//!   calls, so a packet may be transformed in any number of chunks and the
//!   result is identical to transforming it in one call.
//! - Output length always equals input length; there is no padding.
//! - Two backends implement the same transform. Selection is explicit
//!   (`CipherBackend`) and happens once, at construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::cipher_ids;
use crate::crypto::portable::PortableCfb8;
use crate::crypto::types::{iv_from_slice, CipherError, Direction, SecretKey};

#[cfg(feature = "native-cipher")]
use crate::crypto::native::NativeCfb8;

/// Common interface of both backends.
pub trait StreamCipher: Send {
    /// Direction fixed at construction.
    fn direction(&self) -> Direction;

    /// Transform in place and advance the keystream by `buf.len()` bytes.
    fn apply_keystream(&mut self, buf: &mut [u8]);

    fn encrypt_chunk(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        self.check_direction(Direction::Encrypt)?;
        self.apply_keystream(buf);
        Ok(())
    }

    fn decrypt_chunk(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        self.check_direction(Direction::Decrypt)?;
        self.apply_keystream(buf);
        Ok(())
    }

    fn check_direction(&self, attempted: Direction) -> Result<(), CipherError> {
        let handle = self.direction();
        if handle != attempted {
            return Err(CipherError::WrongDirection { handle, attempted });
        }
        Ok(())
    }
}

/// Backend selection.
///
/// `Auto` resolves to `Native` when the `native-cipher` feature is compiled
/// in and to `Portable` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherBackend {
    #[default]
    Auto,
    Native,
    Portable,
}

impl CipherBackend {
    pub fn native_available() -> bool {
        cfg!(feature = "native-cipher")
    }

    /// Resolve `Auto` and reject backends missing from this build.
    pub fn resolve(self) -> Result<CipherBackend, CipherError> {
        match self {
            CipherBackend::Auto if Self::native_available() => Ok(CipherBackend::Native),
            CipherBackend::Auto => Ok(CipherBackend::Portable),
            CipherBackend::Native if !Self::native_available() => {
                Err(CipherError::BackendUnavailable("native"))
            }
            other => Ok(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CipherBackend::Auto => "auto",
            CipherBackend::Native => "native",
            CipherBackend::Portable => "portable",
        }
    }
}

/// Concrete cipher handle owned by one pipeline direction.
pub enum CipherHandle {
    #[cfg(feature = "native-cipher")]
    Native(NativeCfb8),
    Portable(PortableCfb8),
}

impl CipherHandle {
    pub fn backend(&self) -> CipherBackend {
        match self {
            #[cfg(feature = "native-cipher")]
            CipherHandle::Native(_) => CipherBackend::Native,
            CipherHandle::Portable(_) => CipherBackend::Portable,
        }
    }
}

impl StreamCipher for CipherHandle {
    fn direction(&self) -> Direction {
        match self {
            #[cfg(feature = "native-cipher")]
            CipherHandle::Native(c) => c.direction(),
            CipherHandle::Portable(c) => c.direction(),
        }
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) {
        match self {
            #[cfg(feature = "native-cipher")]
            CipherHandle::Native(c) => c.apply(buf),
            CipherHandle::Portable(c) => c.apply(buf),
        }
    }
}

impl std::fmt::Debug for CipherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherHandle")
            .field("suite", &cipher_ids::AES256_CFB8)
            .field("backend", &self.backend())
            .field("direction", &self.direction())
            .finish()
    }
}

/// Build a cipher handle for one direction.
pub fn create_cipher(
    secret: &SecretKey,
    iv: &[u8],
    direction: Direction,
    backend: CipherBackend,
) -> Result<CipherHandle, CipherError> {
    let iv = iv_from_slice(iv)?;
    let resolved = backend.resolve()?;
    let key = secret.as_bytes();

    let handle = match resolved {
        #[cfg(feature = "native-cipher")]
        CipherBackend::Native => CipherHandle::Native(NativeCfb8::new(key, &iv, direction)?),
        _ => CipherHandle::Portable(PortableCfb8::new(key, &iv, direction)?),
    };

    debug!(
        suite = cipher_ids::AES256_CFB8,
        backend = resolved.name(),
        %direction,
        "cipher handle created"
    );
    Ok(handle)
}

/// Encrypt-direction handle.
pub fn create_encryptor(secret: &SecretKey, iv: &[u8], backend: CipherBackend) -> Result<CipherHandle, CipherError> {
    create_cipher(secret, iv, Direction::Encrypt, backend)
}

/// Decrypt-direction handle.
pub fn create_decryptor(secret: &SecretKey, iv: &[u8], backend: CipherBackend) -> Result<CipherHandle, CipherError> {
    create_cipher(secret, iv, Direction::Decrypt, backend)
}
