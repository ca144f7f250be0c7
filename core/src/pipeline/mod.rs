//! pipeline — encode/decode orchestration over the crypto and compression layers.
//!
//! ```text
//! encode: payload -> deflate -> || SHA-256(ctr, c, secret)[..8] -> AES-256-CFB8 -> wire
//! decode: wire -> AES-256-CFB8 -> split tag -> verify(ctr) -> inflate -> payload
//! ```

pub mod types;
pub mod encode;
pub mod decode;
pub mod state;
pub mod callbacks;
pub mod worker;

pub use types::{DecodedPacket, EncodedPacket};
pub use encode::Encoder;
pub use decode::Decoder;
pub use state::{new_decoder, new_encoder, ConnectionCryptoState};
pub use callbacks::{DecodePipeline, EncodePipeline};
pub use worker::{spawn_decode_worker, spawn_encode_worker};
