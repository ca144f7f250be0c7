//! telemetry/counters.rs
//! Mutable counters collected while packets flow through one direction.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Packets that completed the pipeline.
    pub packets: u64,
    /// Packets rejected by checksum verification.
    pub checksum_failures: u64,
    /// Application payload bytes (before compression / after decompression).
    pub bytes_plaintext: u64,
    /// Compressed payload bytes (without the checksum).
    pub bytes_compressed: u64,
    /// Wire bytes (compressed payload + checksum, encrypted).
    pub bytes_ciphertext: u64,
}

impl TelemetryCounters {
    /// Record one encoded packet.
    ///
    /// - `pt_len`: payload length handed in by the application
    /// - `comp_len`: compressed length
    /// - `wire_len`: encrypted length including the checksum
    pub fn add_encoded(&mut self, pt_len: usize, comp_len: usize, wire_len: usize) {
        self.packets += 1;
        self.bytes_plaintext += pt_len as u64;
        self.bytes_compressed += comp_len as u64;
        self.bytes_ciphertext += wire_len as u64;
    }

    /// Record one verified and decompressed packet.
    pub fn add_decoded(&mut self, pt_len: usize, comp_len: usize, wire_len: usize) {
        self.packets += 1;
        self.bytes_plaintext += pt_len as u64;
        self.bytes_compressed += comp_len as u64;
        self.bytes_ciphertext += wire_len as u64;
    }

    pub fn add_checksum_failure(&mut self) {
        self.checksum_failures += 1;
    }

    /// Bytes added on the wire by framing (checksums).
    pub fn overhead_bytes(&self) -> u64 {
        self.bytes_ciphertext.saturating_sub(self.bytes_compressed)
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.packets += other.packets;
        self.checksum_failures += other.checksum_failures;
        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_compressed += other.bytes_compressed;
        self.bytes_ciphertext += other.bytes_ciphertext;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
