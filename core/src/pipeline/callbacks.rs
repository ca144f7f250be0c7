//! Callback-driven pipelines.
//!
//! Results go to `on_encoded` / `on_decoded`; fatal errors go to `on_error`,
//! once, after which the pipeline rejects input with `PipelineClosed`.

use bytes::Bytes;
use tracing::error;

use crate::pipeline::decode::Decoder;
use crate::pipeline::encode::Encoder;
use crate::types::FramingError;

pub struct EncodePipeline<F, E>
where
    F: FnMut(Bytes),
    E: FnMut(&FramingError),
{
    encoder: Encoder,
    on_encoded: F,
    on_error: E,
}

impl<F, E> EncodePipeline<F, E>
where
    F: FnMut(Bytes),
    E: FnMut(&FramingError),
{
    pub fn new(encoder: Encoder, on_encoded: F, on_error: E) -> Self {
        Self {
            encoder,
            on_encoded,
            on_error,
        }
    }

    /// Encode one payload and hand the wire bytes to `on_encoded`.
    pub fn write(&mut self, payload: &[u8]) -> Result<(), FramingError> {
        match self.encoder.encode(payload) {
            Ok(packet) => {
                (self.on_encoded)(packet.wire);
                Ok(())
            }
            Err(e) => {
                report(&mut self.on_error, &e, "encode");
                Err(e)
            }
        }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn into_inner(self) -> Encoder {
        self.encoder
    }
}

pub struct DecodePipeline<F, E>
where
    F: FnMut(Bytes),
    E: FnMut(&FramingError),
{
    decoder: Decoder,
    on_decoded: F,
    on_error: E,
}

impl<F, E> DecodePipeline<F, E>
where
    F: FnMut(Bytes),
    E: FnMut(&FramingError),
{
    pub fn new(decoder: Decoder, on_decoded: F, on_error: E) -> Self {
        Self {
            decoder,
            on_decoded,
            on_error,
        }
    }

    /// Decode one framed unit and hand the payload to `on_decoded`.
    pub fn write(&mut self, wire: &[u8]) -> Result<(), FramingError> {
        match self.decoder.decode(wire) {
            Ok(packet) => {
                (self.on_decoded)(packet.payload);
                Ok(())
            }
            Err(e) => {
                report(&mut self.on_error, &e, "decode");
                Err(e)
            }
        }
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn into_inner(self) -> Decoder {
        self.decoder
    }
}

fn report<E: FnMut(&FramingError)>(on_error: &mut E, err: &FramingError, direction: &'static str) {
    // already reported when the pipeline closed
    if matches!(err, FramingError::PipelineClosed) || !err.is_fatal() {
        return;
    }
    error!(direction, error = %err, "framing pipeline closed");
    on_error(err);
}
