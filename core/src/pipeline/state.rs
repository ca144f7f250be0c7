//! Per-connection crypto state and the public constructors.

use std::sync::Arc;

use crate::config::FramingConfig;
use crate::crypto::SecretKey;
use crate::pipeline::decode::Decoder;
use crate::pipeline::encode::Encoder;
use crate::pipeline::types::{DecodedPacket, EncodedPacket};
use crate::types::FramingError;

/// Everything one connection needs to frame packets in both directions.
///
/// Created once the handshake has produced the shared secret and IV; dropped
/// with the connection (the secret is wiped when the last half goes away).
/// `split` hands the two directions to independent owners so sending and
/// receiving can run concurrently.
#[derive(Debug)]
pub struct ConnectionCryptoState {
    encoder: Encoder,
    decoder: Decoder,
}

impl ConnectionCryptoState {
    /// Same IV for both directions.
    pub fn new(secret: &[u8], iv: &[u8], config: FramingConfig) -> Result<Self, FramingError> {
        Self::with_direction_ivs(secret, iv, iv, config)
    }

    /// Separate send and receive IVs, for handshakes that derive one per direction.
    pub fn with_direction_ivs(
        secret: &[u8],
        send_iv: &[u8],
        receive_iv: &[u8],
        config: FramingConfig,
    ) -> Result<Self, FramingError> {
        let secret = Arc::new(
            SecretKey::from_slice(secret).map_err(|e| FramingError::Configuration(e.to_string()))?,
        );
        let encoder = Encoder::new(Arc::clone(&secret), send_iv, &config)?;
        let decoder = Decoder::new(secret, receive_iv, &config)?;
        Ok(Self { encoder, decoder })
    }

    /// IV taken from the first 16 bytes of the secret.
    pub fn from_secret(secret: &[u8], config: FramingConfig) -> Result<Self, FramingError> {
        let key = SecretKey::from_slice(secret).map_err(|e| FramingError::Configuration(e.to_string()))?;
        let iv = key.derived_iv();
        Self::new(secret, &iv, config)
    }

    pub fn encode(&mut self, payload: &[u8]) -> Result<EncodedPacket, FramingError> {
        self.encoder.encode(payload)
    }

    pub fn decode(&mut self, wire: &[u8]) -> Result<DecodedPacket, FramingError> {
        self.decoder.decode(wire)
    }

    pub fn send_counter(&self) -> u64 {
        self.encoder.send_counter()
    }

    pub fn receive_counter(&self) -> u64 {
        self.decoder.receive_counter()
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn split(self) -> (Encoder, Decoder) {
        (self.encoder, self.decoder)
    }
}

/// Encoder with the default configuration (auto backend, deflate level 7).
pub fn new_encoder(secret: &[u8], iv: &[u8]) -> Result<Encoder, FramingError> {
    Encoder::from_slices(secret, iv, &FramingConfig::default())
}

/// Decoder with the default configuration (auto backend, deflate level 7).
pub fn new_decoder(secret: &[u8], iv: &[u8]) -> Result<Decoder, FramingError> {
    Decoder::from_slices(secret, iv, &FramingConfig::default())
}
