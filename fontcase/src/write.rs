//! Serialization for the two tables the write path may alter
//!
//! Everything decoded by this crate is immutable except `loca` and `head`:
//! writing a font back re-selects the `loca` storage format, which in turn
//! rewrites `head.indexToLocFormat`. Mutation is confined to this module so
//! the read path never observes a half-updated pair.

use crate::tables::{Head, Loca, LocaFormat};

/// Serialize a `loca` table, re-selecting its storage format first.
///
/// `head.indexToLocFormat` is updated to match the selected format, and
/// must be re-serialized alongside with [`head_bytes`].
pub fn loca_bytes(loca: &mut Loca, head: &mut Head) -> Vec<u8> {
    let format = loca.update_format();
    head.index_to_loc_format = format as i16;
    match format {
        LocaFormat::Short => loca
            .offsets()
            .iter()
            .flat_map(|&offset| ((offset / 2) as u16).to_be_bytes())
            .collect(),
        LocaFormat::Long => loca
            .offsets()
            .iter()
            .flat_map(|&offset| offset.to_be_bytes())
            .collect(),
    }
}

/// Serialize a `head` table.
///
/// `checksumAdjustment` is written verbatim; recomputing it is the whole
/// file writer's job, since it sums over every table.
pub fn head_bytes(head: &Head) -> Vec<u8> {
    let mut buf = Vec::with_capacity(54);
    buf.extend(head.version.to_bits().to_be_bytes());
    buf.extend(head.font_revision.to_bits().to_be_bytes());
    buf.extend(head.checksum_adjustment.to_be_bytes());
    buf.extend(head.magic_number.to_be_bytes());
    buf.extend(head.flags.to_be_bytes());
    buf.extend(head.units_per_em.to_be_bytes());
    buf.extend(head.created.as_secs().to_be_bytes());
    buf.extend(head.modified.as_secs().to_be_bytes());
    buf.extend(head.x_min.to_be_bytes());
    buf.extend(head.y_min.to_be_bytes());
    buf.extend(head.x_max.to_be_bytes());
    buf.extend(head.y_max.to_be_bytes());
    buf.extend(head.mac_style.to_be_bytes());
    buf.extend(head.lowest_rec_ppem.to_be_bytes());
    buf.extend(head.font_direction_hint.to_be_bytes());
    buf.extend(head.index_to_loc_format.to_be_bytes());
    buf.extend(head.glyph_data_format.to_be_bytes());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_data::FontData;
    use fontcase_test_data::payload;

    fn read_head() -> Head {
        Head::read(FontData::new(&payload::head(1000, 1)), true).unwrap()
    }

    #[test]
    fn loca_round_trip_reselects_short() {
        let data = payload::loca_long(&[0, 8, 8, 20]);
        let mut loca = Loca::read(FontData::new(&data), false, 3, true).unwrap();
        let mut head = read_head();

        let bytes = loca_bytes(&mut loca, &mut head);
        assert_eq!(loca.format(), LocaFormat::Short);
        assert_eq!(head.index_to_loc_format, 0);

        let reread = Loca::read(FontData::new(&bytes), true, 3, true).unwrap();
        assert_eq!(reread.offsets(), loca.offsets());
    }

    #[test]
    fn loca_round_trip_keeps_long() {
        let data = payload::loca_long(&[0, 3, 0x20000]);
        let mut loca = Loca::read(FontData::new(&data), false, 2, false).unwrap();
        let mut head = read_head();

        let bytes = loca_bytes(&mut loca, &mut head);
        assert_eq!(loca.format(), LocaFormat::Long);
        assert_eq!(head.index_to_loc_format, 1);

        let reread = Loca::read(FontData::new(&bytes), false, 2, false).unwrap();
        assert_eq!(reread.offsets(), [0, 3, 0x20000]);
    }

    #[test]
    fn head_round_trip() {
        let head = read_head();
        let bytes = head_bytes(&head);
        let reread = Head::read(FontData::new(&bytes), true).unwrap();
        assert_eq!(reread, head);
    }
}
