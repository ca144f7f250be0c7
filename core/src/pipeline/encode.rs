//! Encoder pipeline: compress -> checksum -> append -> count -> encrypt.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::compression::{codec_name, create_compressor, Compressor};
use crate::config::FramingConfig;
use crate::constants::CHECKSUM_LEN;
use crate::crypto::{compute_checksum, create_encryptor, CipherBackend, CipherHandle, SecretKey, StreamCipher};
use crate::pipeline::types::EncodedPacket;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::FramingError;

/// Send half of a connection's crypto state.
///
/// Owns the send counter and the encrypt-direction cipher. `encode` takes
/// `&mut self`, so packets are encoded and counted strictly in call order.
pub struct Encoder {
    secret: Arc<SecretKey>,
    cipher: CipherHandle,
    compressor: Box<dyn Compressor + Send>,
    send_counter: u64,
    max_payload_len: Option<usize>,
    closed: bool,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl Encoder {
    pub fn new(secret: Arc<SecretKey>, iv: &[u8], config: &FramingConfig) -> Result<Self, FramingError> {
        config.validate()?;
        let cipher = create_encryptor(&secret, iv, config.cipher_backend)
            .map_err(|e| FramingError::Configuration(e.to_string()))?;
        let compressor = create_compressor(config.compression)
            .map_err(|e| FramingError::Configuration(e.to_string()))?;

        debug!(
            backend = cipher.backend().name(),
            codec = codec_name(config.compression),
            "encoder ready"
        );

        Ok(Self {
            secret,
            cipher,
            compressor,
            send_counter: 0,
            max_payload_len: config.max_payload_len,
            closed: false,
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        })
    }

    /// Build from raw key/IV bytes as handed over by the handshake.
    pub fn from_slices(secret: &[u8], iv: &[u8], config: &FramingConfig) -> Result<Self, FramingError> {
        let secret = SecretKey::from_slice(secret).map_err(|e| FramingError::Configuration(e.to_string()))?;
        Self::new(Arc::new(secret), iv, config)
    }

    /// Encode one application payload into one wire packet.
    ///
    /// Any error other than `PayloadTooLarge` closes the encoder.
    pub fn encode(&mut self, payload: &[u8]) -> Result<EncodedPacket, FramingError> {
        if self.closed {
            return Err(FramingError::PipelineClosed);
        }
        if let Some(max) = self.max_payload_len {
            if payload.len() > max {
                return Err(FramingError::PayloadTooLarge { len: payload.len(), max });
            }
        }

        let result = self.encode_packet(payload);
        if let Err(e) = &result {
            if e.is_fatal() {
                self.closed = true;
                warn!(counter = self.send_counter, error = %e, "encoder closed");
            }
        }
        result
    }

    fn encode_packet(&mut self, payload: &[u8]) -> Result<EncodedPacket, FramingError> {
        let mut packet = Vec::with_capacity(payload.len() / 2 + CHECKSUM_LEN + 16);

        // 1. compress the whole payload as one unit
        let compressor = &mut self.compressor;
        self.timer
            .time(Stage::Compress, || compressor.compress_chunk(payload, &mut packet))?;
        let compressed_len = packet.len();

        // 2. checksum over the compressed bytes at the current counter
        let counter = self.send_counter;
        let secret = self.secret.as_bytes();
        let tag = self
            .timer
            .time(Stage::Checksum, || compute_checksum(&packet, counter, secret));

        // 3. packet = compressed || tag
        packet.extend_from_slice(&tag);

        // 4. one increment per packet
        self.send_counter = counter.checked_add(1).ok_or(FramingError::CounterExhausted)?;

        // 5. encrypt on the running keystream
        let cipher = &mut self.cipher;
        self.timer
            .time(Stage::Encrypt, || cipher.encrypt_chunk(&mut packet))?;

        self.counters.add_encoded(payload.len(), compressed_len, packet.len());
        trace!(
            counter,
            plaintext = payload.len(),
            compressed = compressed_len,
            wire = packet.len(),
            "packet encoded"
        );

        Ok(EncodedPacket {
            counter,
            plaintext_len: payload.len(),
            compressed_len,
            wire: Bytes::from(packet),
        })
    }

    /// Number of packets encoded so far; the counter of the next packet.
    pub fn send_counter(&self) -> u64 {
        self.send_counter
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn backend(&self) -> CipherBackend {
        self.cipher.backend()
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(self.send_counter, &self.counters, &self.timer)
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("cipher", &self.cipher)
            .field("send_counter", &self.send_counter)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
