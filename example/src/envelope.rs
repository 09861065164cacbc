use thiserror::Error;
use umsg_marshal::{decode_from_slice, encode_to_vec, MarshalError, Payload};

/// Bytes taken by the hash prefix.
pub const HASH_LEN: usize = 4;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("frame shorter than the 4 byte hash prefix")]
    Truncated,

    #[error("schema hash mismatch: expected 0x{expected:08X}, found 0x{found:08X}")]
    HashMismatch {
        expected: u32,
        found:    u32,
    },

    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// `msg_hash (u32, big-endian) | payload`
pub fn seal<P: Payload>(message: &P) -> Result<Vec<u8>, MarshalError> {
    let payload = encode_to_vec(message)?;
    let mut frame = Vec::with_capacity(HASH_LEN + payload.len());
    frame.extend_from_slice(&P::MSG_HASH.to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Reverse of [`seal`]. Frames produced from a different schema are refused
/// before any payload byte is interpreted.
pub fn open<P: Payload>(frame: &[u8]) -> Result<P, EnvelopeError> {
    if frame.len() < HASH_LEN {
        return Err(EnvelopeError::Truncated);
    }
    let (prefix, payload) = frame.split_at(HASH_LEN);
    let found = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
    if found != P::MSG_HASH {
        return Err(EnvelopeError::HashMismatch {
            expected: P::MSG_HASH,
            found,
        });
    }
    Ok(decode_from_slice(payload)?)
}
