//! The [hmtx](https://learn.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use types::Tag;

use crate::font_data::FontData;
use crate::read::ReadError;

/// A single entry in the long-metrics array: an advance and a side bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongMetric {
    pub advance: u16,
    pub side_bearing: i16,
}

/// The horizontal metrics table.
#[derive(Debug, Clone, PartialEq)]
pub struct Hmtx {
    long_metrics: Vec<LongMetric>,
    trailing_bearings: Vec<i16>,
}

impl Hmtx {
    pub const TAG: Tag = Tag::new(b"hmtx");

    /// `num_long_metrics` comes from `hhea.numberOfHMetrics`, `num_glyphs`
    /// from `maxp`.
    pub fn read(
        data: FontData,
        num_long_metrics: u16,
        num_glyphs: u16,
    ) -> Result<Self, ReadError> {
        let (long_metrics, trailing_bearings) =
            read_metrics(data, Self::TAG, num_long_metrics, num_glyphs)?;
        Ok(Hmtx {
            long_metrics,
            trailing_bearings,
        })
    }

    /// The initial array of (advance, side bearing) pairs.
    pub fn long_metrics(&self) -> &[LongMetric] {
        &self.long_metrics
    }

    /// The trailing array of side bearings for glyphs whose advance repeats
    /// the last long metric.
    pub fn trailing_bearings(&self) -> &[i16] {
        &self.trailing_bearings
    }

    /// The metric for a glyph.
    ///
    /// A glyph id past the long-metrics array reuses the last long metric's
    /// advance; one past the end of the table entirely reuses its side
    /// bearing as well.
    pub fn metric(&self, glyph_id: u16) -> LongMetric {
        glyph_metric(&self.long_metrics, &self.trailing_bearings, glyph_id)
    }

    /// The advance width of a glyph.
    pub fn advance(&self, glyph_id: u16) -> u16 {
        self.metric(glyph_id).advance
    }

    /// The left side bearing of a glyph.
    pub fn side_bearing(&self, glyph_id: u16) -> i16 {
        self.metric(glyph_id).side_bearing
    }
}

pub(super) fn read_metrics(
    data: FontData,
    tag: Tag,
    num_long_metrics: u16,
    num_glyphs: u16,
) -> Result<(Vec<LongMetric>, Vec<i16>), ReadError> {
    if num_long_metrics == 0 {
        return Err(ReadError::decode(tag, "zero long metrics"));
    }
    if num_long_metrics > num_glyphs {
        return Err(ReadError::decode(
            tag,
            format!("{num_long_metrics} long metrics for {num_glyphs} glyphs"),
        ));
    }
    let mut cursor = data.cursor();
    let mut long_metrics = Vec::with_capacity(num_long_metrics as usize);
    for _ in 0..num_long_metrics {
        long_metrics.push(LongMetric {
            advance: cursor.read()?,
            side_bearing: cursor.read()?,
        });
    }
    let trailing = (num_glyphs - num_long_metrics) as usize;
    let mut trailing_bearings = Vec::with_capacity(trailing);
    for _ in 0..trailing {
        trailing_bearings.push(cursor.read()?);
    }
    Ok((long_metrics, trailing_bearings))
}

pub(super) fn glyph_metric(
    long_metrics: &[LongMetric],
    trailing_bearings: &[i16],
    glyph_id: u16,
) -> LongMetric {
    let ix = glyph_id as usize;
    if let Some(metric) = long_metrics.get(ix) {
        return *metric;
    }
    // read_metrics guarantees the array is non-empty
    let last = long_metrics[long_metrics.len() - 1];
    let side_bearing = trailing_bearings
        .get(ix - long_metrics.len())
        .copied()
        .unwrap_or(last.side_bearing);
    LongMetric {
        advance: last.advance,
        side_bearing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn metrics_and_trailing_bearings() {
        // 2 long metrics, 4 glyphs
        let data = payload::metrics(&[(500, 10), (600, 20)], &[30, 40]);
        let hmtx = Hmtx::read(FontData::new(&data), 2, 4).unwrap();
        assert_eq!(hmtx.long_metrics().len(), 2);
        assert_eq!(hmtx.metric(1), LongMetric { advance: 600, side_bearing: 20 });
        // beyond the long metrics: last advance, own bearing
        assert_eq!(hmtx.metric(2), LongMetric { advance: 600, side_bearing: 30 });
        assert_eq!(hmtx.metric(3), LongMetric { advance: 600, side_bearing: 40 });
        // past the end of the table entirely
        assert_eq!(hmtx.metric(9), LongMetric { advance: 600, side_bearing: 40 });
    }

    #[test]
    fn invalid_counts() {
        let data = payload::metrics(&[(500, 10)], &[]);
        assert!(Hmtx::read(FontData::new(&data), 0, 1).is_err());
        assert!(Hmtx::read(FontData::new(&data), 2, 1).is_err());
    }
}
