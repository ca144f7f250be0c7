use bytes::Bytes;

/// Output of one `Encoder::encode` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPacket {
    /// Send counter the checksum was bound to.
    pub counter: u64,
    pub plaintext_len: usize,
    pub compressed_len: usize,
    /// Ciphertext of `compressed || checksum`, ready for the transport.
    pub wire: Bytes,
}

/// Output of one successful `Decoder::decode` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    /// Receive counter the checksum was verified against.
    pub counter: u64,
    pub compressed_len: usize,
    pub wire_len: usize,
    pub payload: Bytes,
}
