//! The [post](https://learn.microsoft.com/en-us/typography/opentype/spec/post) table

use types::{Fixed, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The PostScript table.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub version: Fixed,
    pub italic_angle: Fixed,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    /// Version 2.0 glyph name data.
    v2: Option<PostV2>,
}

#[derive(Debug, Clone, PartialEq)]
struct PostV2 {
    glyph_name_index: Vec<u16>,
    names: Vec<String>,
}

impl Post {
    pub const TAG: Tag = Tag::new(b"post");

    /// The name of a glyph, for version 2.0 tables.
    ///
    /// Indices below 258 resolve to the standard Macintosh glyph order,
    /// which we report by index rather than carrying the full name list.
    pub fn glyph_name(&self, glyph_id: u16) -> Option<&str> {
        let v2 = self.v2.as_ref()?;
        let ix = *v2.glyph_name_index.get(glyph_id as usize)? as usize;
        if ix < 258 {
            return None;
        }
        v2.names.get(ix - 258).map(String::as_str)
    }

    /// `true` if the table carries version 2.0 glyph names.
    pub fn has_glyph_names(&self) -> bool {
        self.v2.is_some()
    }
}

impl FontRead for Post {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: Fixed = cursor.read()?;
        let italic_angle = cursor.read()?;
        let underline_position = cursor.read()?;
        let underline_thickness = cursor.read()?;
        let is_fixed_pitch = cursor.read()?;
        let min_mem_type42 = cursor.read()?;
        let max_mem_type42 = cursor.read()?;
        let min_mem_type1 = cursor.read()?;
        let max_mem_type1 = cursor.read()?;

        let v2 = if version == Fixed::from_major_minor(2, 0) {
            let num_glyphs: u16 = cursor.read()?;
            let mut glyph_name_index = Vec::with_capacity(num_glyphs as usize);
            for _ in 0..num_glyphs {
                glyph_name_index.push(cursor.read::<u16>()?);
            }
            // Pascal strings fill the rest of the table; several glyphs may
            // share one name, so the index array says nothing about how many
            // there are.
            let mut names = Vec::new();
            while cursor.remaining_bytes() > 0 {
                let len: u8 = cursor.read()?;
                let bytes = cursor.read_bytes(len as usize)?;
                names.push(bytes.iter().map(|&b| b as char).collect());
            }
            Some(PostV2 {
                glyph_name_index,
                names,
            })
        } else {
            None
        };

        Ok(Post {
            version,
            italic_angle,
            underline_position,
            underline_thickness,
            is_fixed_pitch,
            min_mem_type42,
            max_mem_type42,
            min_mem_type1,
            max_mem_type1,
            v2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn v3_no_names() {
        let data = payload::post_v3();
        let post = Post::read(FontData::new(&data)).unwrap();
        assert_eq!(post.version, Fixed::from_major_minor(3, 0));
        assert!(!post.has_glyph_names());
        assert!(post.glyph_name(0).is_none());
    }

    #[test]
    fn v2_shared_name_index() {
        // two glyphs pointing at the same custom name
        let data = payload::post_v2(&[0, 258, 258], &["alpha"]);
        let post = Post::read(FontData::new(&data)).unwrap();
        assert_eq!(post.glyph_name(1), Some("alpha"));
        assert_eq!(post.glyph_name(2), Some("alpha"));
    }

    #[test]
    fn v2_names() {
        // glyph 0 = standard index 0 (.notdef), glyph 1 = custom name
        let data = payload::post_v2(&[0, 258], &["alpha"]);
        let post = Post::read(FontData::new(&data)).unwrap();
        assert!(post.has_glyph_names());
        assert!(post.glyph_name(0).is_none());
        assert_eq!(post.glyph_name(1), Some("alpha"));
        assert!(post.glyph_name(2).is_none());
    }
}
