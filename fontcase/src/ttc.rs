//! The ttc header of a TrueType collection

use types::{Tag, TTC_HEADER_TAG};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The [TTC header][header] at the start of a font collection file.
///
/// [header]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header
#[derive(Debug, Clone)]
pub struct TtcHeader {
    version: u32,
    offsets: Vec<u32>,
    dsig: Option<TtcDsig>,
}

/// The digital signature record carried by a version 2 TTC header.
///
/// Parsed when present; it does not affect directory enumeration.
#[derive(Debug, Clone, Copy)]
pub struct TtcDsig {
    pub tag: Tag,
    pub length: u32,
    pub offset: u32,
}

impl TtcHeader {
    /// `true` if the data begins with the `ttcf` signature.
    pub fn is_ttc(data: FontData) -> bool {
        data.read_at::<Tag>(0)
            .map(|tag| tag == TTC_HEADER_TAG)
            .unwrap_or(false)
    }

    /// The header version (major in the high word: 1 or 2).
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The number of table directories in the collection.
    pub fn directory_count(&self) -> u32 {
        self.offsets.len() as u32
    }

    /// The absolute file offset of the table directory at `index`.
    pub fn directory_offset(&self, index: u32) -> Option<u32> {
        self.offsets.get(index as usize).copied()
    }

    /// Absolute file offsets of all table directories, in collection order.
    pub fn directory_offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The version 2 DSIG record, if the collection carries one.
    pub fn dsig(&self) -> Option<&TtcDsig> {
        self.dsig.as_ref()
    }
}

impl FontRead for TtcHeader {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let tag: Tag = cursor.read()?;
        if tag != TTC_HEADER_TAG {
            return Err(ReadError::InvalidTtc(tag));
        }
        let version: u32 = cursor.read()?;
        let num_fonts: u32 = cursor.read()?;
        // cap the reserve at what the header can actually hold
        let mut offsets =
            Vec::with_capacity((num_fonts as usize).min(cursor.remaining_bytes() / 4));
        for _ in 0..num_fonts {
            offsets.push(cursor.read::<u32>()?);
        }
        // Version 2 may append (dsigTag, dsigLength, dsigOffset); a zero tag
        // means no signature.
        let dsig = if version >= 0x00020000 && cursor.remaining_bytes() >= 12 {
            let tag: Tag = cursor.read()?;
            let length: u32 = cursor.read()?;
            let offset: u32 = cursor.read()?;
            (tag.to_u32() != 0).then_some(TtcDsig {
                tag,
                length,
                offset,
            })
        } else {
            None
        };
        Ok(TtcHeader {
            version,
            offsets,
            dsig,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1() {
        let mut buf = b"ttcf".to_vec();
        buf.extend(0x00010000u32.to_be_bytes());
        buf.extend(2u32.to_be_bytes());
        buf.extend(0x20u32.to_be_bytes());
        buf.extend(0x120u32.to_be_bytes());

        let header = TtcHeader::read(FontData::new(&buf)).unwrap();
        assert_eq!(header.version(), 0x00010000);
        assert_eq!(header.directory_count(), 2);
        assert_eq!(header.directory_offsets(), [0x20, 0x120]);
        assert!(header.dsig().is_none());
    }

    #[test]
    fn v2_with_dsig() {
        let mut buf = b"ttcf".to_vec();
        buf.extend(0x00020000u32.to_be_bytes());
        buf.extend(1u32.to_be_bytes());
        buf.extend(0x20u32.to_be_bytes());
        buf.extend(b"DSIG");
        buf.extend(0x40u32.to_be_bytes());
        buf.extend(0x800u32.to_be_bytes());

        let header = TtcHeader::read(FontData::new(&buf)).unwrap();
        let dsig = header.dsig().unwrap();
        assert_eq!(dsig.tag, "DSIG");
        assert_eq!(dsig.length, 0x40);
        assert_eq!(dsig.offset, 0x800);
    }

    #[test]
    fn oversized_font_count() {
        let mut buf = b"ttcf".to_vec();
        buf.extend(0x00010000u32.to_be_bytes());
        buf.extend(u32::MAX.to_be_bytes());
        assert!(matches!(
            TtcHeader::read(FontData::new(&buf)),
            Err(ReadError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn not_a_ttc() {
        let buf = [0u8, 1, 0, 0, 0, 0, 0, 0];
        assert!(!TtcHeader::is_ttc(FontData::new(&buf)));
        assert!(matches!(
            TtcHeader::read(FontData::new(&buf)),
            Err(ReadError::InvalidTtc(_))
        ));
    }
}
