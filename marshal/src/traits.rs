use crate::{bb::BufferSpan, error::MarshalError};

/// Implemented by every generated message struct.
///
/// The inherent `MSG_HASH`/`PAYLOAD_SIZE` constants and `encode`/`decode`
/// methods on a generated type are forwarded here so that transports can be
/// written once for any message.
pub trait Payload: Sized + Default {
    /// FNV-1a hash of the schema's canonical text.
    const MSG_HASH: u32;
    /// Exact number of bytes `encode` produces.
    const PAYLOAD_SIZE: usize;

    fn encode(&self, payload: &mut BufferSpan<'_>) -> Result<(), MarshalError>;
    fn decode(&mut self, payload: &[u8]) -> Result<(), MarshalError>;
}

/// Encode `message` into a freshly allocated buffer of exactly `PAYLOAD_SIZE` bytes.
pub fn encode_to_vec<P: Payload>(message: &P) -> Result<Vec<u8>, MarshalError> {
    let mut storage = vec![0u8; P::PAYLOAD_SIZE];
    let mut span = BufferSpan::new(&mut storage);
    message.encode(&mut span)?;
    let written = span.len();
    storage.truncate(written);
    Ok(storage)
}

/// Decode a fresh message from `payload`, starting from `P::default()`.
pub fn decode_from_slice<P: Payload>(payload: &[u8]) -> Result<P, MarshalError> {
    let mut message = P::default();
    message.decode(payload)?;
    Ok(message)
}
