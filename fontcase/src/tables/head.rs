//! The [head](https://learn.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{Fixed, LongDateTime, Tag};

use crate::font_data::FontData;
use crate::read::ReadError;

/// The font header table.
#[derive(Debug, Clone, PartialEq)]
pub struct Head {
    pub version: Fixed,
    pub font_revision: Fixed,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
}

impl Head {
    pub const TAG: Tag = Tag::new(b"head");

    pub const MAGIC: u32 = 0x5F0F3CF5;

    pub fn read(data: FontData, strict: bool) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let head = Head {
            version: cursor.read()?,
            font_revision: cursor.read()?,
            checksum_adjustment: cursor.read()?,
            magic_number: cursor.read()?,
            flags: cursor.read()?,
            units_per_em: cursor.read()?,
            created: cursor.read()?,
            modified: cursor.read()?,
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
            mac_style: cursor.read()?,
            lowest_rec_ppem: cursor.read()?,
            font_direction_hint: cursor.read()?,
            index_to_loc_format: cursor.read()?,
            glyph_data_format: cursor.read()?,
        };
        if head.magic_number != Self::MAGIC {
            return Err(ReadError::decode(
                Self::TAG,
                format!("magic number 0x{:08X}", head.magic_number),
            ));
        }
        if !matches!(head.index_to_loc_format, 0 | 1) {
            return Err(ReadError::decode(
                Self::TAG,
                format!("indexToLocFormat {}", head.index_to_loc_format),
            ));
        }
        if !(16..=16384).contains(&head.units_per_em) {
            if strict {
                return Err(ReadError::decode(
                    Self::TAG,
                    format!("unitsPerEm {} out of range", head.units_per_em),
                ));
            }
            log::warn!("head: unitsPerEm {} out of range [16, 16384]", head.units_per_em);
        }
        Ok(head)
    }

    /// `true` if `loca` offsets are stored in the short (16-bit) form.
    pub fn use_short_entries(&self) -> bool {
        self.index_to_loc_format == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn read_head() {
        let data = payload::head(1000, 0);
        let head = Head::read(FontData::new(&data), true).unwrap();
        assert_eq!(head.magic_number, Head::MAGIC);
        assert_eq!(head.units_per_em, 1000);
        assert!(head.use_short_entries());
    }

    #[test]
    fn bad_magic() {
        let mut data = payload::head(1000, 0);
        data[12] = 0;
        assert!(matches!(
            Head::read(FontData::new(&data), false),
            Err(ReadError::Decode { tag, .. }) if tag == Head::TAG
        ));
    }

    #[test]
    fn units_per_em_out_of_range() {
        let data = payload::head(15, 1);
        // lenient: warn and keep
        let head = Head::read(FontData::new(&data), false).unwrap();
        assert_eq!(head.units_per_em, 15);
        assert!(!head.use_short_entries());
        // strict: error
        assert!(Head::read(FontData::new(&data), true).is_err());
    }
}
