//! A convenience buffer for writing big-endian data.

use sfnt_types::Scalar;

/// A big-endian byte buffer with a chainable push API.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current length of the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a scalar into the buffer in big-endian order.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer.
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Write raw bytes, verbatim.
    pub fn push_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend(bytes);
        self
    }

    /// Pad with zero bytes.
    pub fn pad(mut self, n_bytes: usize) -> Self {
        self.data.extend(std::iter::repeat(0u8).take(n_bytes));
        self
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }
}

impl From<BeBuffer> for Vec<u8> {
    fn from(buf: BeBuffer) -> Self {
        buf.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_types::Tag;

    #[test]
    fn push_scalars() {
        let buf = BeBuffer::new()
            .push(1u16)
            .push(-2i16)
            .push(Tag::new(b"abcd"));
        let bytes: Vec<u8> = buf.into();
        assert_eq!(bytes, [0, 1, 0xFF, 0xFE, b'a', b'b', b'c', b'd']);
    }
}
