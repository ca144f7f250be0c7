//! Native AES-256-CFB8 via the RustCrypto `cfb8` mode.
//!
//! The `aes` crate picks AES-NI / ARMv8 crypto extensions at runtime when the
//! CPU has them, so this is the accelerated path.

use aes::Aes256;
use cfb8::cipher::generic_array::GenericArray;
use cfb8::cipher::{BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyIvInit};

use crate::constants::{IV_LEN, KEY_LEN};
use crate::crypto::types::{CipherError, Direction};

pub enum NativeCfb8 {
    Encrypt(cfb8::Encryptor<Aes256>),
    Decrypt(cfb8::Decryptor<Aes256>),
}

impl NativeCfb8 {
    pub fn new(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], direction: Direction) -> Result<Self, CipherError> {
        let invalid = |_: InvalidLength| CipherError::InvalidKeyLen {
            expected: KEY_LEN,
            actual: key.len(),
        };
        match direction {
            Direction::Encrypt => Ok(Self::Encrypt(
                cfb8::Encryptor::<Aes256>::new_from_slices(key, iv).map_err(invalid)?,
            )),
            Direction::Decrypt => Ok(Self::Decrypt(
                cfb8::Decryptor::<Aes256>::new_from_slices(key, iv).map_err(invalid)?,
            )),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            NativeCfb8::Encrypt(_) => Direction::Encrypt,
            NativeCfb8::Decrypt(_) => Direction::Decrypt,
        }
    }

    /// Transform `buf` in place. CFB8 blocks are one byte wide.
    pub fn apply(&mut self, buf: &mut [u8]) {
        match self {
            NativeCfb8::Encrypt(enc) => {
                for byte in buf.iter_mut() {
                    enc.encrypt_block_mut(GenericArray::from_mut_slice(std::slice::from_mut(byte)));
                }
            }
            NativeCfb8::Decrypt(dec) => {
                for byte in buf.iter_mut() {
                    dec.decrypt_block_mut(GenericArray::from_mut_slice(std::slice::from_mut(byte)));
                }
            }
        }
    }
}
