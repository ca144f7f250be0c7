//! One thread per direction.
//!
//! A worker drains its request channel in FIFO order, so counters and
//! keystream advance exactly in submission order even though the caller does
//! not block. It stops after forwarding the first fatal error, or when the
//! request channel closes, and returns its pipeline half through the
//! `JoinHandle`.

use std::thread::JoinHandle;

use bytes::Bytes;
use crossbeam::channel::{Receiver, Sender};
use tracing::debug;

use crate::pipeline::decode::Decoder;
use crate::pipeline::encode::Encoder;
use crate::pipeline::types::{DecodedPacket, EncodedPacket};
use crate::types::FramingError;

pub fn spawn_encode_worker(
    mut encoder: Encoder,
    rx: Receiver<Bytes>,
    tx: Sender<Result<EncodedPacket, FramingError>>,
) -> JoinHandle<Encoder> {
    std::thread::spawn(move || {
        while let Ok(payload) = rx.recv() {
            let result = encoder.encode(&payload);
            let fatal = matches!(&result, Err(e) if e.is_fatal());
            if tx.send(result).is_err() || fatal {
                break;
            }
        }
        debug!(send_counter = encoder.send_counter(), "encode worker finished");
        encoder
    })
}

pub fn spawn_decode_worker(
    mut decoder: Decoder,
    rx: Receiver<Bytes>,
    tx: Sender<Result<DecodedPacket, FramingError>>,
) -> JoinHandle<Decoder> {
    std::thread::spawn(move || {
        while let Ok(wire) = rx.recv() {
            let result = decoder.decode(&wire);
            let fatal = result.is_err();
            if tx.send(result).is_err() || fatal {
                break;
            }
        }
        debug!(receive_counter = decoder.receive_counter(), "decode worker finished");
        decoder
    })
}
