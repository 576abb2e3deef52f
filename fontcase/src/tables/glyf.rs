//! The [glyf](https://learn.microsoft.com/en-us/typography/opentype/spec/glyf) table

use types::Tag;

use super::Loca;
use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The glyph data table.
///
/// Held as a byte-accurate copy of the table's slice; per-glyph decoding
/// (simple vs composite outlines, flag run-lengths) belongs to a glyph
/// parser, not the container layer. Glyph boundaries come from `loca`.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyf {
    data: Vec<u8>,
}

impl Glyf {
    pub const TAG: Tag = Tag::new(b"glyf");

    /// The raw table bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The bytes of one glyph, located via `loca`.
    ///
    /// Returns an empty slice for glyphs without an outline, `None` when
    /// `glyph_id` is out of range or `loca` points outside the table.
    pub fn glyph_bytes(&self, loca: &Loca, glyph_id: u16) -> Option<&[u8]> {
        let range = loca.glyph_range(glyph_id)?;
        self.data.get(range)
    }
}

impl FontRead for Glyf {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Glyf {
            data: data.as_bytes().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::loca::Loca;
    use fontcase_test_data::payload;

    #[test]
    fn glyph_bytes() {
        let glyf_bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let glyf = Glyf::read(FontData::new(&glyf_bytes)).unwrap();
        let loca_data = payload::loca_long(&[0, 4, 4, 8]);
        let loca = Loca::read(FontData::new(&loca_data), false, 3, false).unwrap();
        assert_eq!(glyf.glyph_bytes(&loca, 0), Some(&[1, 2, 3, 4][..]));
        assert_eq!(glyf.glyph_bytes(&loca, 1), Some(&[][..]));
        assert_eq!(glyf.glyph_bytes(&loca, 2), Some(&[5, 6, 7, 8][..]));
        assert_eq!(glyf.glyph_bytes(&loca, 3), None);
    }

    #[test]
    fn out_of_table_offsets() {
        let glyf = Glyf::read(FontData::new(&[0u8; 4])).unwrap();
        let loca_data = payload::loca_long(&[0, 16]);
        let loca = Loca::read(FontData::new(&loca_data), false, 1, false).unwrap();
        assert_eq!(glyf.glyph_bytes(&loca, 0), None);
    }
}
