//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use types::{FixedSize, ReadScalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
///
/// The view remembers its absolute position in the backing file
/// (`total_pos`), so that bounds errors report the offset of the failed read
/// within the file and not within some interior slice.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

/// A cursor for sequential reads during parsing.
///
/// Reads advance the position; [`seek`](Cursor::seek) provides the
/// random-access motion the container headers need.
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// You generally don't need to do this? It is handled for you when
    /// loading data from disk, but may be useful in tests.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The absolute position of the start of this view in the backing file.
    pub fn base_offset(&self) -> usize {
        self.total_pos as usize
    }

    /// Return a new view of everything from `pos` onwards.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    /// Return a new view of the given subrange of this data.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    /// Read a scalar at the provided location in the data.
    pub fn read_at<T: ReadScalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or_else(|| self.out_of_bounds(offset, T::RAW_BYTE_LEN))
    }

    /// Interpret the bytes in the provided range as a slice of raw
    /// big-endian values.
    pub fn read_array<T>(&self, range: Range<usize>) -> Result<&'a [T], ReadError>
    where
        T: bytemuck::AnyBitPattern + FixedSize,
    {
        let bytes = self
            .bytes
            .get(range.clone())
            .ok_or_else(|| self.out_of_bounds(range.start, range.end.saturating_sub(range.start)))?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    fn out_of_bounds(&self, offset: usize, len: usize) -> ReadError {
        ReadError::OutOfBounds {
            offset: self.total_pos as usize + offset,
            len,
        }
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    /// Advance past `n_bytes` without reading them.
    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos += n_bytes;
    }

    pub(crate) fn read<T: ReadScalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos += T::RAW_BYTE_LEN;
        temp
    }

    /// Read `n_bytes` raw bytes, advancing past them.
    pub(crate) fn read_bytes(&mut self, n_bytes: usize) -> Result<&'a [u8], ReadError> {
        let temp = self
            .data
            .slice(self.pos..self.pos + n_bytes)
            .map(|data| data.bytes)
            .ok_or_else(|| self.data.out_of_bounds(self.pos, n_bytes));
        self.pos += n_bytes;
        temp
    }

    /// Move to an absolute position within the underlying data.
    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    // used when handling fields with an implicit length, which must be at the
    // end of a table.
    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::BigEndian;

    #[test]
    fn read_at_reports_absolute_offset() {
        let data = FontData::new(&[0u8; 8]);
        let inner = data.split_off(4).unwrap();
        let err = inner.read_at::<u32>(2).unwrap_err();
        assert!(matches!(err, ReadError::OutOfBounds { offset: 6, len: 4 }));
    }

    #[test]
    fn cursor_reads() {
        let data = FontData::new(&[0, 1, 0xFF, 0xFE, b'w', b'x', b'y', b'z']);
        let mut cursor = data.cursor();
        assert_eq!(cursor.read::<u16>().unwrap(), 1);
        assert_eq!(cursor.read::<i16>().unwrap(), -2);
        assert_eq!(cursor.read::<types::Tag>().unwrap(), "wxyz");
        assert!(cursor.read::<u8>().is_err());
    }

    #[test]
    fn arrays() {
        let data = FontData::new(&[0, 1, 0, 2, 0, 3]);
        let array = data.read_array::<BigEndian<u16>>(0..6).unwrap();
        assert_eq!(array.iter().map(|be| be.get()).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(matches!(
            data.read_array::<BigEndian<u16>>(0..5),
            Err(ReadError::InvalidArrayLen)
        ));
        assert!(matches!(
            data.read_array::<BigEndian<u16>>(2..8),
            Err(ReadError::OutOfBounds { .. })
        ));
    }
}
