//! The [OS/2](https://learn.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The OS/2 and Windows metrics table.
///
/// Versions 1 through 5 append fields to the version 0 layout; fields past
/// the table's declared version are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Os2 {
    pub version: u16,
    pub x_avg_char_width: i16,
    pub us_weight_class: u16,
    pub us_width_class: u16,
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    pub y_strikeout_size: i16,
    pub y_strikeout_position: i16,
    pub s_family_class: i16,
    pub panose: [u8; 10],
    pub ul_unicode_range_1: u32,
    pub ul_unicode_range_2: u32,
    pub ul_unicode_range_3: u32,
    pub ul_unicode_range_4: u32,
    pub ach_vend_id: Tag,
    pub fs_selection: u16,
    pub us_first_char_index: u16,
    pub us_last_char_index: u16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub s_typo_line_gap: i16,
    pub us_win_ascent: u16,
    pub us_win_descent: u16,
    pub ul_code_page_range_1: Option<u32>,
    pub ul_code_page_range_2: Option<u32>,
    pub sx_height: Option<i16>,
    pub s_cap_height: Option<i16>,
    pub us_default_char: Option<u16>,
    pub us_break_char: Option<u16>,
    pub us_max_context: Option<u16>,
    pub us_lower_optical_point_size: Option<u16>,
    pub us_upper_optical_point_size: Option<u16>,
}

impl Os2 {
    pub const TAG: Tag = Tag::new(b"OS/2");
}

impl FontRead for Os2 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        let x_avg_char_width = cursor.read()?;
        let us_weight_class = cursor.read()?;
        let us_width_class = cursor.read()?;
        let fs_type = cursor.read()?;
        let y_subscript_x_size = cursor.read()?;
        let y_subscript_y_size = cursor.read()?;
        let y_subscript_x_offset = cursor.read()?;
        let y_subscript_y_offset = cursor.read()?;
        let y_superscript_x_size = cursor.read()?;
        let y_superscript_y_size = cursor.read()?;
        let y_superscript_x_offset = cursor.read()?;
        let y_superscript_y_offset = cursor.read()?;
        let y_strikeout_size = cursor.read()?;
        let y_strikeout_position = cursor.read()?;
        let s_family_class = cursor.read()?;
        let panose_bytes = cursor.read_bytes(10)?;
        let mut panose = [0u8; 10];
        panose.copy_from_slice(panose_bytes);
        let ul_unicode_range_1 = cursor.read()?;
        let ul_unicode_range_2 = cursor.read()?;
        let ul_unicode_range_3 = cursor.read()?;
        let ul_unicode_range_4 = cursor.read()?;
        let ach_vend_id = cursor.read()?;
        let fs_selection = cursor.read()?;
        let us_first_char_index = cursor.read()?;
        let us_last_char_index = cursor.read()?;
        let s_typo_ascender = cursor.read()?;
        let s_typo_descender = cursor.read()?;
        let s_typo_line_gap = cursor.read()?;
        let us_win_ascent = cursor.read()?;
        let us_win_descent = cursor.read()?;

        let mut os2 = Os2 {
            version,
            x_avg_char_width,
            us_weight_class,
            us_width_class,
            fs_type,
            y_subscript_x_size,
            y_subscript_y_size,
            y_subscript_x_offset,
            y_subscript_y_offset,
            y_superscript_x_size,
            y_superscript_y_size,
            y_superscript_x_offset,
            y_superscript_y_offset,
            y_strikeout_size,
            y_strikeout_position,
            s_family_class,
            panose,
            ul_unicode_range_1,
            ul_unicode_range_2,
            ul_unicode_range_3,
            ul_unicode_range_4,
            ach_vend_id,
            fs_selection,
            us_first_char_index,
            us_last_char_index,
            s_typo_ascender,
            s_typo_descender,
            s_typo_line_gap,
            us_win_ascent,
            us_win_descent,
            ul_code_page_range_1: None,
            ul_code_page_range_2: None,
            sx_height: None,
            s_cap_height: None,
            us_default_char: None,
            us_break_char: None,
            us_max_context: None,
            us_lower_optical_point_size: None,
            us_upper_optical_point_size: None,
        };
        if version >= 1 {
            os2.ul_code_page_range_1 = Some(cursor.read()?);
            os2.ul_code_page_range_2 = Some(cursor.read()?);
        }
        if version >= 2 {
            os2.sx_height = Some(cursor.read()?);
            os2.s_cap_height = Some(cursor.read()?);
            os2.us_default_char = Some(cursor.read()?);
            os2.us_break_char = Some(cursor.read()?);
            os2.us_max_context = Some(cursor.read()?);
        }
        if version >= 5 {
            os2.us_lower_optical_point_size = Some(cursor.read()?);
            os2.us_upper_optical_point_size = Some(cursor.read()?);
        }
        Ok(os2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn version_gating() {
        let data = payload::os2(0);
        let os2 = Os2::read(FontData::new(&data)).unwrap();
        assert_eq!(os2.us_weight_class, 400);
        assert!(os2.ul_code_page_range_1.is_none());
        assert!(os2.sx_height.is_none());

        let data = payload::os2(4);
        let os2 = Os2::read(FontData::new(&data)).unwrap();
        assert!(os2.ul_code_page_range_1.is_some());
        assert!(os2.us_max_context.is_some());
        assert!(os2.us_lower_optical_point_size.is_none());
    }
}
