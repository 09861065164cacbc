use crate::error::MarshalError;

/// A fixed-width primitive that can be moved through a [`Writer`](crate::Writer)
/// or [`Reader`](crate::Reader).
///
/// `SIZE` is the number of bytes the value occupies on the wire, which always
/// equals `size_of::<Self>()` for the types implemented here.
pub trait Scalar: Copy {
    const SIZE: usize;

    /// Writes the canonical encoding into `out`, which is exactly `SIZE` bytes.
    fn put(self, out: &mut [u8]);

    /// Reads a value back from exactly `SIZE` bytes.
    fn get(bytes: &[u8]) -> Result<Self, MarshalError>;
}

macro_rules! impl_scalar_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const SIZE: usize = ::core::mem::size_of::<$ty>();

                fn put(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_be_bytes());
                }

                fn get(bytes: &[u8]) -> Result<Self, MarshalError> {
                    let mut raw = [0u8; ::core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    Ok(<$ty>::from_be_bytes(raw))
                }
            }
        )*
    };
}

impl_scalar_int!(u8, i8, u16, i16, u32, i32, u64, i64);

impl Scalar for bool {
    const SIZE: usize = 1;

    fn put(self, out: &mut [u8]) {
        out[0] = if self { 1 } else { 0 };
    }

    fn get(bytes: &[u8]) -> Result<Self, MarshalError> {
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(MarshalError::InvalidBool(other)),
        }
    }
}

impl Scalar for f32 {
    const SIZE: usize = 4;

    fn put(self, out: &mut [u8]) {
        self.to_bits().put(out);
    }

    fn get(bytes: &[u8]) -> Result<Self, MarshalError> {
        u32::get(bytes).map(f32::from_bits)
    }
}

impl Scalar for f64 {
    const SIZE: usize = 8;

    fn put(self, out: &mut [u8]) {
        self.to_bits().put(out);
    }

    fn get(bytes: &[u8]) -> Result<Self, MarshalError> {
        u64::get(bytes).map(f64::from_bits)
    }
}
