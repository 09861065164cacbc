//! Runtime support for code generated by `umsg-gen`.
//!
//! Generated message structs call into [`Writer`] and [`Reader`] to move their
//! fields in and out of a caller-provided byte region. The encoding is the
//! canonical umsg payload encoding:
//!
//! - multi-byte scalars are big-endian,
//! - `bool` is `0x00` or `0x01`; any other byte is rejected on decode,
//! - `f32`/`f64` travel as their IEEE-754 bit pattern,
//! - arrays are written element by element with no length prefix.
//!
//! ```
//! use umsg_marshal::*;
//!
//! let mut storage = [0u8; 8];
//! let mut w = Writer::new(&mut storage);
//! w.write(0x0102_0304u32).unwrap();
//! w.write_array(&[true, false]).unwrap();
//! assert_eq!(w.bytes_written(), 6);
//! assert_eq!(&storage[..6], &[1, 2, 3, 4, 1, 0]);
//!
//! let mut r = Reader::new(&storage[..6]);
//! assert_eq!(r.read::<u32>(), Ok(0x0102_0304));
//! let mut flags = [false; 2];
//! r.read_array(&mut flags).unwrap();
//! assert_eq!(flags, [true, false]);
//! assert!(r.fully_consumed());
//! ```

pub mod bb;
pub mod error;
pub mod scalar;
pub mod traits;

pub use bb::*;
pub use error::MarshalError;
pub use scalar::Scalar;
pub use traits::{decode_from_slice, encode_to_vec, Payload};
