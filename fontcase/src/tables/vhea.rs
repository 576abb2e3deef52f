//! The [vhea](https://learn.microsoft.com/en-us/typography/opentype/spec/vhea) table

use types::{Fixed, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The vertical header table.
///
/// Same shape as [`Hhea`](super::Hhea) with the axes swapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Vhea {
    pub version: Fixed,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_height_max: u16,
    pub min_top_side_bearing: i16,
    pub min_bottom_side_bearing: i16,
    pub y_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub metric_data_format: i16,
    pub number_of_v_metrics: u16,
}

impl Vhea {
    pub const TAG: Tag = Tag::new(b"vhea");

    /// The number of long metrics in `vmtx`.
    pub fn number_of_long_metrics(&self) -> u16 {
        self.number_of_v_metrics
    }
}

impl FontRead for Vhea {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let ascender = cursor.read()?;
        let descender = cursor.read()?;
        let line_gap = cursor.read()?;
        let advance_height_max = cursor.read()?;
        let min_top_side_bearing = cursor.read()?;
        let min_bottom_side_bearing = cursor.read()?;
        let y_max_extent = cursor.read()?;
        let caret_slope_rise = cursor.read()?;
        let caret_slope_run = cursor.read()?;
        let caret_offset = cursor.read()?;
        cursor.advance_by(8);
        let metric_data_format = cursor.read()?;
        let number_of_v_metrics = cursor.read()?;
        Ok(Vhea {
            version,
            ascender,
            descender,
            line_gap,
            advance_height_max,
            min_top_side_bearing,
            min_bottom_side_bearing,
            y_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            metric_data_format,
            number_of_v_metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn read_vhea() {
        let data = payload::vhea(2);
        let vhea = Vhea::read(FontData::new(&data)).unwrap();
        assert_eq!(vhea.version, Fixed::from_major_minor(1, 0));
        assert_eq!(vhea.number_of_long_metrics(), 2);
    }
}
