//! The [hhea](https://learn.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::{Fixed, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The horizontal header table.
#[derive(Debug, Clone, PartialEq)]
pub struct Hhea {
    pub version: Fixed,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub metric_data_format: i16,
    pub number_of_h_metrics: u16,
}

impl Hhea {
    pub const TAG: Tag = Tag::new(b"hhea");

    /// The number of long metrics in `hmtx`.
    pub fn number_of_long_metrics(&self) -> u16 {
        self.number_of_h_metrics
    }
}

impl FontRead for Hhea {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let ascender = cursor.read()?;
        let descender = cursor.read()?;
        let line_gap = cursor.read()?;
        let advance_width_max = cursor.read()?;
        let min_left_side_bearing = cursor.read()?;
        let min_right_side_bearing = cursor.read()?;
        let x_max_extent = cursor.read()?;
        let caret_slope_rise = cursor.read()?;
        let caret_slope_run = cursor.read()?;
        let caret_offset = cursor.read()?;
        // four reserved shorts
        cursor.advance_by(8);
        let metric_data_format = cursor.read()?;
        let number_of_h_metrics = cursor.read()?;
        Ok(Hhea {
            version,
            ascender,
            descender,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            metric_data_format,
            number_of_h_metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn read_hhea() {
        let data = payload::hhea(3);
        let hhea = Hhea::read(FontData::new(&data)).unwrap();
        assert_eq!(hhea.version, Fixed::from_major_minor(1, 0));
        assert_eq!(hhea.ascender, 800);
        assert_eq!(hhea.descender, -200);
        assert_eq!(hhea.number_of_long_metrics(), 3);
    }
}
