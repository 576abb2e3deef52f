//! The [vmtx](https://learn.microsoft.com/en-us/typography/opentype/spec/vmtx) table

use types::Tag;

use super::hmtx::{glyph_metric, read_metrics, LongMetric};
use crate::font_data::FontData;
use crate::read::ReadError;

/// The vertical metrics table.
///
/// Shape and fallback behavior match [`Hmtx`](super::Hmtx): advances for
/// glyphs past the long-metrics array repeat the last long metric's advance
/// height.
#[derive(Debug, Clone, PartialEq)]
pub struct Vmtx {
    long_metrics: Vec<LongMetric>,
    trailing_bearings: Vec<i16>,
}

impl Vmtx {
    pub const TAG: Tag = Tag::new(b"vmtx");

    /// `num_long_metrics` comes from `vhea.numOfLongVerMetrics`, `num_glyphs`
    /// from `maxp`.
    pub fn read(
        data: FontData,
        num_long_metrics: u16,
        num_glyphs: u16,
    ) -> Result<Self, ReadError> {
        let (long_metrics, trailing_bearings) =
            read_metrics(data, Self::TAG, num_long_metrics, num_glyphs)?;
        Ok(Vmtx {
            long_metrics,
            trailing_bearings,
        })
    }

    pub fn long_metrics(&self) -> &[LongMetric] {
        &self.long_metrics
    }

    pub fn trailing_bearings(&self) -> &[i16] {
        &self.trailing_bearings
    }

    /// The (advance height, top side bearing) pair for a glyph.
    pub fn metric(&self, glyph_id: u16) -> LongMetric {
        glyph_metric(&self.long_metrics, &self.trailing_bearings, glyph_id)
    }

    /// The advance height of a glyph.
    pub fn advance(&self, glyph_id: u16) -> u16 {
        self.metric(glyph_id).advance
    }

    /// The top side bearing of a glyph.
    pub fn side_bearing(&self, glyph_id: u16) -> i16 {
        self.metric(glyph_id).side_bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn signed_bearings() {
        let data = payload::metrics(&[(1000, -50)], &[-60]);
        let vmtx = Vmtx::read(FontData::new(&data), 1, 2).unwrap();
        assert_eq!(vmtx.metric(0), LongMetric { advance: 1000, side_bearing: -50 });
        assert_eq!(vmtx.metric(1), LongMetric { advance: 1000, side_bearing: -60 });
    }
}
