//! Decoder pipeline: decrypt -> split -> checksum -> count -> verify -> decompress.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::compression::{codec_name, create_decompressor, Decompressor};
use crate::config::FramingConfig;
use crate::constants::CHECKSUM_LEN;
use crate::crypto::{
    checksums_match, compute_checksum, create_decryptor, CipherBackend, CipherHandle, SecretKey, StreamCipher,
};
use crate::pipeline::types::DecodedPacket;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::FramingError;

/// Receive half of a connection's crypto state.
///
/// The receive counter advances exactly once per `decode` call, whether or
/// not the packet verifies, so it always equals the number of packets the
/// peer has sent that this side has seen. The first failure closes the decoder.
pub struct Decoder {
    secret: Arc<SecretKey>,
    cipher: CipherHandle,
    decompressor: Box<dyn Decompressor + Send>,
    receive_counter: u64,
    closed: bool,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl Decoder {
    pub fn new(secret: Arc<SecretKey>, iv: &[u8], config: &FramingConfig) -> Result<Self, FramingError> {
        config.validate()?;
        let cipher = create_decryptor(&secret, iv, config.cipher_backend)
            .map_err(|e| FramingError::Configuration(e.to_string()))?;
        let decompressor = create_decompressor(config.compression, config.max_payload_len)
            .map_err(|e| FramingError::Configuration(e.to_string()))?;

        debug!(
            backend = cipher.backend().name(),
            codec = codec_name(config.compression),
            "decoder ready"
        );

        Ok(Self {
            secret,
            cipher,
            decompressor,
            receive_counter: 0,
            closed: false,
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        })
    }

    pub fn from_slices(secret: &[u8], iv: &[u8], config: &FramingConfig) -> Result<Self, FramingError> {
        let secret = SecretKey::from_slice(secret).map_err(|e| FramingError::Configuration(e.to_string()))?;
        Self::new(Arc::new(secret), iv, config)
    }

    /// Decode one framed wire unit back into the application payload.
    pub fn decode(&mut self, wire: &[u8]) -> Result<DecodedPacket, FramingError> {
        if self.closed {
            return Err(FramingError::PipelineClosed);
        }

        let result = self.decode_packet(wire);
        if let Err(e) = &result {
            self.closed = true;
            warn!(receive_counter = self.receive_counter, error = %e, "decoder closed");
        }
        result
    }

    fn decode_packet(&mut self, wire: &[u8]) -> Result<DecodedPacket, FramingError> {
        // 1. decrypt on the running keystream
        let mut packet = wire.to_vec();
        let cipher = &mut self.cipher;
        self.timer
            .time(Stage::Decrypt, || cipher.decrypt_chunk(&mut packet))?;

        let counter = self.receive_counter;
        if packet.len() < CHECKSUM_LEN {
            self.advance_counter()?;
            return Err(FramingError::PacketTooShort {
                len: packet.len(),
                min: CHECKSUM_LEN,
            });
        }

        // 2. split compressed || tag
        let (compressed, received) = packet.split_at(packet.len() - CHECKSUM_LEN);

        // 3. expected tag for this counter
        let secret = self.secret.as_bytes();
        let expected = self
            .timer
            .time(Stage::Verify, || compute_checksum(compressed, counter, secret));

        // 4. advance before acting on the comparison
        self.advance_counter()?;

        // 5. mismatch is fatal; nothing is delivered
        if !checksums_match(&expected, received) {
            self.counters.add_checksum_failure();
            return Err(FramingError::ChecksumMismatch {
                counter,
                expected: hex::encode(expected),
                received: hex::encode(received),
            });
        }

        // 6. decompress the verified payload
        let mut payload = Vec::new();
        let decompressor = &mut self.decompressor;
        self.timer
            .time(Stage::Decompress, || decompressor.decompress_chunk(compressed, &mut payload))?;

        self.counters.add_decoded(payload.len(), compressed.len(), wire.len());
        trace!(
            counter,
            wire = wire.len(),
            compressed = compressed.len(),
            plaintext = payload.len(),
            "packet decoded"
        );

        Ok(DecodedPacket {
            counter,
            compressed_len: compressed.len(),
            wire_len: wire.len(),
            payload: Bytes::from(payload),
        })
    }

    fn advance_counter(&mut self) -> Result<(), FramingError> {
        self.receive_counter = self
            .receive_counter
            .checked_add(1)
            .ok_or(FramingError::CounterExhausted)?;
        Ok(())
    }

    /// Number of packets consumed so far; the counter of the next packet.
    pub fn receive_counter(&self) -> u64 {
        self.receive_counter
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
        TelemetrySnapshot::from(self.receive_counter, &self.counters, &self.timer)
    }
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("cipher", &self.cipher)
            .field("receive_counter", &self.receive_counter)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
