use crate::{error::MarshalError, scalar::Scalar};

/// A writable byte region paired with a length.
///
/// On the way into `encode` the length is the capacity the message may use;
/// on the way out it is the number of bytes actually written.
///
/// ```
/// let mut storage = [0u8; 16];
/// let mut span = umsg_marshal::BufferSpan::with_len(&mut storage, 4);
/// assert_eq!(span.len(), 4);
/// assert_eq!(span.as_mut_slice().len(), 4);
/// ```
#[derive(Debug)]
pub struct BufferSpan<'a> {
    data:   &'a mut [u8],
    length: usize,
}

impl<'a> BufferSpan<'a> {
    /// Wraps `data`, using its whole length as the capacity.
    pub fn new(data: &'a mut [u8]) -> BufferSpan<'a> {
        let length = data.len();
        BufferSpan { data, length }
    }

    /// Wraps `data` but only exposes the first `length` bytes. `length` is
    /// clamped to the size of `data`.
    pub fn with_len(data: &'a mut [u8], length: usize) -> BufferSpan<'a> {
        let length = length.min(data.len());
        BufferSpan { data, length }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Sets the reported length. Values past the end of the backing storage
    /// are clamped.
    pub fn set_len(&mut self, length: usize) {
        self.length = length.min(self.data.len());
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.length]
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.length]
    }
}

/// Cursor-based writer for the canonical encoding.
///
/// The writer never allocates and never touches bytes past the end of its
/// slice; a write that does not fit fails with [`MarshalError::Overflow`] and
/// leaves the cursor where it was.
pub struct Writer<'a> {
    out:   &'a mut [u8],
    index: usize,
}

impl<'a> Writer<'a> {
    pub fn new(out: &'a mut [u8]) -> Writer<'a> {
        Writer { out, index: 0 }
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.out.len()
    }

    /// Write a single scalar at the current index.
    pub fn write<T: Scalar>(&mut self, value: T) -> Result<(), MarshalError> {
        let end = self.ensure(T::SIZE)?;
        value.put(&mut self.out[self.index..end]);
        self.index = end;
        Ok(())
    }

    /// Write every element of `values` in increasing index order.
    pub fn write_array<T: Scalar>(&mut self, values: &[T]) -> Result<(), MarshalError> {
        for value in values {
            self.write(*value)?;
        }
        Ok(())
    }

    fn ensure(&self, n: usize) -> Result<usize, MarshalError> {
        match self.index.checked_add(n) {
            Some(end) if end <= self.out.len() => Ok(end),
            _ => Err(MarshalError::Overflow {
                needed:   self.index.saturating_add(n),
                capacity: self.out.len(),
            }),
        }
    }
}

/// Cursor-based reader for the canonical encoding.
///
/// Reads fail on underflow or on invalid values such as a `bool` byte other
/// than 0 or 1. A failed read does not advance the cursor.
pub struct Reader<'a> {
    data:  &'a [u8],
    index: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Reader<'a> {
        Reader { data, index: 0 }
    }

    /// Retrieves the current index into the underlying byte slice.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.index
    }

    /// True once every byte of the input has been read.
    pub fn fully_consumed(&self) -> bool {
        self.index == self.data.len()
    }

    /// Try to read a scalar starting at the current index.
    pub fn read<T: Scalar>(&mut self) -> Result<T, MarshalError> {
        let end = self.ensure(T::SIZE)?;
        let value = T::get(&self.data[self.index..end])?;
        self.index = end;
        Ok(value)
    }

    /// Fill `out` with consecutive scalars.
    pub fn read_array<T: Scalar>(&mut self, out: &mut [T]) -> Result<(), MarshalError> {
        for slot in out.iter_mut() {
            *slot = self.read()?;
        }
        Ok(())
    }

    /// Fails with [`MarshalError::TrailingBytes`] unless everything was read.
    pub fn finish(&self) -> Result<(), MarshalError> {
        if self.fully_consumed() {
            Ok(())
        } else {
            Err(MarshalError::TrailingBytes {
                remaining: self.remaining(),
            })
        }
    }

    fn ensure(&self, n: usize) -> Result<usize, MarshalError> {
        if n > self.remaining() {
            Err(MarshalError::Underflow {
                needed:    n,
                remaining: self.remaining(),
            })
        } else {
            Ok(self.index + n)
        }
    }
}

#[cfg(test)]
fn write_once(capacity: usize, cb: fn(&mut Writer) -> Result<(), MarshalError>) -> Result<Vec<u8>, MarshalError> {
    let mut storage = vec![0u8; capacity];
    let mut w = Writer::new(&mut storage);
    cb(&mut w)?;
    let written = w.bytes_written();
    storage.truncate(written);
    Ok(storage)
}

#[test]
fn write_big_endian() {
    assert_eq!(write_once(2, |w| w.write(0x0102u16)), Ok(vec![1, 2]));
    assert_eq!(write_once(4, |w| w.write(0x0102_0304u32)), Ok(vec![1, 2, 3, 4]));
    assert_eq!(
        write_once(8, |w| w.write(0x0102_0304_0506_0708u64)),
        Ok(vec![1, 2, 3, 4, 5, 6, 7, 8])
    );
    assert_eq!(write_once(1, |w| w.write(-1i8)), Ok(vec![255]));
}

#[test]
fn write_bool() {
    assert_eq!(write_once(1, |w| w.write(false)), Ok(vec![0]));
    assert_eq!(write_once(1, |w| w.write(true)), Ok(vec![1]));
}

#[test]
fn write_array() {
    assert_eq!(
        write_once(6, |w| w.write_array(&[1u16, 2, 3])),
        Ok(vec![0, 1, 0, 2, 0, 3])
    );
    assert_eq!(write_once(0, |w| w.write_array::<u32>(&[])), Ok(vec![]));
}

#[test]
fn write_overflow() {
    assert_eq!(
        write_once(3, |w| w.write(7u32)),
        Err(MarshalError::Overflow { needed: 4, capacity: 3 })
    );

    let mut storage = [0u8; 5];
    let mut w = Writer::new(&mut storage);
    assert_eq!(w.write(1u32), Ok(()));
    assert!(w.write(2u16).is_err());
    assert_eq!(w.bytes_written(), 4);
    assert_eq!(w.write(3u8), Ok(()));
    assert_eq!(w.bytes_written(), 5);
}

#[test]
fn write_array_stops_at_first_failure() {
    let mut storage = [0u8; 5];
    let mut w = Writer::new(&mut storage);
    assert!(w.write_array(&[1u16, 2, 3]).is_err());
    assert_eq!(w.bytes_written(), 4);
}

#[test]
fn read_big_endian() {
    let mut r = Reader::new(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(r.read::<u8>(), Ok(1));
    assert_eq!(r.read::<u16>(), Ok(0x0203));
    assert_eq!(r.read::<u32>(), Ok(0x0405_0607));
    assert!(r.fully_consumed());
}

#[test]
fn read_bool() {
    let read = |bytes: &[u8]| Reader::new(bytes).read::<bool>();
    assert_eq!(read(&[]), Err(MarshalError::Underflow { needed: 1, remaining: 0 }));
    assert_eq!(read(&[0]), Ok(false));
    assert_eq!(read(&[1]), Ok(true));
    assert_eq!(read(&[2]), Err(MarshalError::InvalidBool(2)));
}

#[test]
fn read_underflow_keeps_cursor() {
    let mut r = Reader::new(&[0, 0, 0]);
    assert_eq!(
        r.read::<u32>(),
        Err(MarshalError::Underflow { needed: 4, remaining: 3 })
    );
    assert_eq!(r.index(), 0);
    assert_eq!(r.read::<u16>(), Ok(0));
    assert_eq!(r.remaining(), 1);
}

#[test]
fn read_array() {
    let mut r = Reader::new(&[0, 1, 0, 2]);
    let mut out = [0u16; 2];
    assert_eq!(r.read_array(&mut out), Ok(()));
    assert_eq!(out, [1, 2]);
    assert_eq!(r.finish(), Ok(()));
}

#[test]
fn finish_reports_trailing_bytes() {
    let mut r = Reader::new(&[0, 0, 9]);
    assert_eq!(r.read::<u16>(), Ok(0));
    assert!(!r.fully_consumed());
    assert_eq!(r.finish(), Err(MarshalError::TrailingBytes { remaining: 1 }));
}

#[test]
fn span_reports_written_length() {
    let mut storage = [0u8; 8];
    let mut span = BufferSpan::new(&mut storage);
    assert_eq!(span.len(), 8);
    let written = {
        let mut w = Writer::new(span.as_mut_slice());
        w.write(0xABu8).unwrap();
        w.write(0xCDu8).unwrap();
        w.bytes_written()
    };
    span.set_len(written);
    assert_eq!(span.as_slice(), &[0xAB, 0xCD]);
    span.set_len(100);
    assert_eq!(span.len(), 8);
}
