//! Portable AES-256-CFB8.
//!
//! Shift-register implementation over the raw AES block function. Used when
//! the native mode backend is not compiled in, and as the reference the native
//! backend is checked against.
//!
//! Per byte:
//! - keystream = AES(register)[0]
//! - out = in ^ keystream
//! - register = register[1..] || ciphertext byte
//!
//! The ciphertext byte is `out` when encrypting and `in` when decrypting.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256, Block};
use zeroize::Zeroize;

use crate::constants::{IV_LEN, KEY_LEN};
use crate::crypto::types::{CipherError, Direction};

pub struct PortableCfb8 {
    block: Aes256,
    register: [u8; IV_LEN],
    direction: Direction,
}

impl PortableCfb8 {
    pub fn new(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], direction: Direction) -> Result<Self, CipherError> {
        let block = Aes256::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLen {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
        Ok(Self {
            block,
            register: *iv,
            direction,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Transform `buf` in place, advancing the running register.
    pub fn apply(&mut self, buf: &mut [u8]) {
        let mut keystream = Block::default();
        for byte in buf.iter_mut() {
            keystream.copy_from_slice(&self.register);
            self.block.encrypt_block(&mut keystream);

            let input = *byte;
            let output = input ^ keystream[0];
            let feedback = match self.direction {
                Direction::Encrypt => output,
                Direction::Decrypt => input,
            };

            self.register.copy_within(1.., 0);
            self.register[IV_LEN - 1] = feedback;
            *byte = output;
        }
        keystream.zeroize();
    }
}

impl Drop for PortableCfb8 {
    fn drop(&mut self) {
        self.register.zeroize();
    }
}
