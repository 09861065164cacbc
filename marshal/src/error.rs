use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarshalError {
    #[error("buffer overflow: {needed} bytes needed, capacity is {capacity}")]
    Overflow {
        needed:   usize,
        capacity: usize,
    },

    #[error("buffer underflow: {needed} bytes needed, {remaining} remaining")]
    Underflow {
        needed:    usize,
        remaining: usize,
    },

    #[error("invalid bool encoding 0x{0:02X}")]
    InvalidBool(u8),

    #[error("{remaining} trailing bytes left after decode")]
    TrailingBytes {
        remaining: usize,
    },
}
