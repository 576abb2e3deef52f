//! The [maxp](https://learn.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::{Fixed, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The maximum profile table.
///
/// Version 0.5 (CFF flavored fonts) carries only `num_glyphs`; version 1.0
/// appends the TrueType rasterizer limits, kept here in [`MaxpV1`].
#[derive(Debug, Clone, PartialEq)]
pub struct Maxp {
    pub version: Fixed,
    pub num_glyphs: u16,
    pub v1: Option<MaxpV1>,
}

/// The version 1.0 extensions of `maxp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxpV1 {
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}

impl Maxp {
    pub const TAG: Tag = Tag::new(b"maxp");
}

impl FontRead for Maxp {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: Fixed = cursor.read()?;
        let num_glyphs: u16 = cursor.read()?;
        let v1 = if version >= Fixed::from_major_minor(1, 0) {
            Some(MaxpV1 {
                max_points: cursor.read()?,
                max_contours: cursor.read()?,
                max_composite_points: cursor.read()?,
                max_composite_contours: cursor.read()?,
                max_zones: cursor.read()?,
                max_twilight_points: cursor.read()?,
                max_storage: cursor.read()?,
                max_function_defs: cursor.read()?,
                max_instruction_defs: cursor.read()?,
                max_stack_elements: cursor.read()?,
                max_size_of_instructions: cursor.read()?,
                max_component_elements: cursor.read()?,
                max_component_depth: cursor.read()?,
            })
        } else {
            None
        };
        Ok(Maxp {
            version,
            num_glyphs,
            v1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn v0_5() {
        let mut data = Fixed::from_bits(0x00005000).to_bits().to_be_bytes().to_vec();
        data.extend(7u16.to_be_bytes());
        let maxp = Maxp::read(FontData::new(&data)).unwrap();
        assert_eq!(maxp.num_glyphs, 7);
        assert!(maxp.v1.is_none());
    }

    #[test]
    fn v1_0() {
        let data = payload::maxp(4);
        let maxp = Maxp::read(FontData::new(&data)).unwrap();
        assert_eq!(maxp.version, Fixed::from_major_minor(1, 0));
        assert_eq!(maxp.num_glyphs, 4);
        assert!(maxp.v1.is_some());
    }
}
