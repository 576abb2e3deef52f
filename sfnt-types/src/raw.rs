//! types for working with raw big-endian bytes

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes.
///
/// You do not need to implement this trait directly; it is an implemention
/// detail of the [`BigEndian`] wrapper.
pub trait Scalar: Copy {
    /// The raw byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]> + 'static;

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;
    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;
}

/// A trait for types of known, fixed size.
pub trait FixedSize: Sized {
    /// The raw size of this type, in bytes.
    ///
    /// This is the size required to represent this type in a font file, which
    /// may differ from the size of the native type:
    /// [`Uint24`](crate::Uint24) is 3 bytes, but is represented by a `u32`.
    const RAW_BYTE_LEN: usize;
}

/// A trait for types that can be read from raw big-endian bytes.
pub trait ReadScalar: FixedSize {
    /// Interpret the provided bytes as `Self`, if they are the right length.
    ///
    /// This should check the length of the slice and return `None` if it is
    /// shorter than `RAW_BYTE_LEN`. Extra bytes are ignored.
    fn read(bytes: &[u8]) -> Option<Self>;
}

impl<T: Scalar + FixedSize> ReadScalar for T {
    #[inline]
    fn read(bytes: &[u8]) -> Option<Self> {
        bytes
            .get(..Self::RAW_BYTE_LEN)
            .and_then(|bytes| T::Raw::try_from(bytes).ok())
            .map(Self::from_raw)
    }
}

/// A wrapper around raw big-endian bytes for some type.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct BigEndian<T: Scalar>(pub(crate) T::Raw);

impl<T: Scalar> BigEndian<T> {
    /// Construct a new `BigEndian<T>` from raw values.
    pub fn new(value: T) -> Self {
        BigEndian(value.to_raw())
    }

    /// Read a copy of this type from raw bytes.
    pub fn get(self) -> T {
        T::from_raw(self.0)
    }

    /// Set the value, overwriting the bytes.
    pub fn set(&mut self, value: T) {
        self.0 = value.to_raw();
    }

    /// The raw big-endian bytes.
    pub fn be_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: Scalar> FixedSize for BigEndian<T> {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

impl<T: Scalar> From<T> for BigEndian<T> {
    fn from(value: T) -> Self {
        BigEndian::new(value)
    }
}

// SAFETY: `BigEndian<T>` is a transparent wrapper around a fixed-size byte
// array, so it has size > 0, align == 1, no padding, and any bit pattern
// is valid.
#[allow(unsafe_code)]
unsafe impl<T: Scalar + 'static> bytemuck::Zeroable for BigEndian<T> {}
#[allow(unsafe_code)]
unsafe impl<T: Scalar + 'static> bytemuck::AnyBitPattern for BigEndian<T> {}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }

        impl crate::raw::FixedSize for $ty {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$raw>();
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
int_scalar!(u64, [u8; 8]);
int_scalar!(i64, [u8; 8]);

/// An internal macro for implementing `Scalar` for newtypes over scalars.
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl crate::raw::Scalar for $name {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.0.to_raw()
            }

            fn from_raw(raw: $raw) -> Self {
                Self(crate::raw::Scalar::from_raw(raw))
            }
        }

        impl crate::raw::FixedSize for $name {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$raw>();
        }
    };
}

pub(crate) use newtype_scalar;

impl<T: std::fmt::Debug + Scalar> std::fmt::Debug for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: std::fmt::Display + Scalar> std::fmt::Display for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        assert_eq!(u16::read(&[0x02, 0x1F]), Some(0x021F));
        assert_eq!(i16::read(&[0xFF, 0xFF]), Some(-1));
        assert_eq!(u32::read(&[0, 0, 0]), None);
        assert_eq!(0xdeadbeef_u32.to_raw(), [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn get_set() {
        let mut be = BigEndian::new(16u16);
        assert_eq!(be.be_bytes(), &[0, 16]);
        be.set(0xFF00);
        assert_eq!(be.be_bytes(), &[0xFF, 0]);
        assert_eq!(be.get(), 0xFF00);
    }

    #[test]
    fn cast_slice() {
        let bytes = [0u8, 1, 0, 2, 0, 3];
        let array: &[BigEndian<u16>] = bytemuck::cast_slice(&bytes);
        let values: Vec<u16> = array.iter().map(|be| be.get()).collect();
        assert_eq!(values, [1, 2, 3]);
    }
}
