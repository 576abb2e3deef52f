//! Building Macintosh resource fork / `.dfont` images.

use sfnt_types::Tag;

use crate::bebuffer::BeBuffer;

/// One resource to be placed in the fork.
#[derive(Debug, Clone)]
pub struct Resource {
    pub tag: Tag,
    pub id: u16,
    pub name: Option<String>,
    pub data: Vec<u8>,
}

impl Resource {
    pub fn new(tag: Tag, id: u16, data: &[u8]) -> Self {
        Resource {
            tag,
            id,
            name: None,
            data: data.to_vec(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

const HEADER_LEN: usize = 16;
// 28 reserved bytes, attributes, type list offset, name list offset
const MAP_PROLOGUE_LEN: usize = 28 + 2 + 2 + 2;
const TYPE_LIST_OFFSET: u16 = MAP_PROLOGUE_LEN as u16;

/// Build a resource fork containing the given resources.
///
/// Resources are grouped by type in first-appearance order; each payload is
/// stored with its u32 length prefix in the data area.
pub fn build(resources: &[Resource]) -> Vec<u8> {
    // data area, recording each resource's offset within it
    let mut data_area = BeBuffer::new();
    let mut data_offsets = Vec::with_capacity(resources.len());
    for res in resources {
        data_offsets.push(data_area.len() as u32);
        data_area = data_area
            .push(res.data.len() as u32)
            .push_bytes(&res.data);
    }

    // group by type, keeping first-appearance order
    let mut types: Vec<(Tag, Vec<usize>)> = Vec::new();
    for (ix, res) in resources.iter().enumerate() {
        match types.iter_mut().find(|(tag, _)| *tag == res.tag) {
            Some((_, members)) => members.push(ix),
            None => types.push((res.tag, vec![ix])),
        }
    }

    // name list, recording each named resource's offset within it
    let mut name_list = BeBuffer::new();
    let mut name_offsets = vec![0xFFFFu16; resources.len()];
    for (ix, res) in resources.iter().enumerate() {
        if let Some(name) = &res.name {
            name_offsets[ix] = name_list.len() as u16;
            name_list = name_list
                .push(name.len() as u8)
                .push_bytes(name.as_bytes());
        }
    }

    let type_list_len = 2 + 8 * types.len();
    let refs_total: usize = types.iter().map(|(_, members)| members.len()).sum();
    let name_list_offset = MAP_PROLOGUE_LEN + type_list_len + 12 * refs_total;

    let mut map = BeBuffer::new()
        .pad(28)
        .push(0u16) // attributes
        .push(TYPE_LIST_OFFSET)
        .push(name_list_offset as u16)
        .push((types.len() as u16).wrapping_sub(1));
    // type entries; reference list offsets are relative to the type list
    let mut ref_list_offset = type_list_len;
    for (tag, members) in &types {
        map = map
            .push(*tag)
            .push((members.len() as u16).wrapping_sub(1))
            .push(ref_list_offset as u16);
        ref_list_offset += 12 * members.len();
    }
    // reference lists
    for (_, members) in &types {
        for &ix in members {
            let res = &resources[ix];
            map = map
                .push(res.id)
                .push(name_offsets[ix])
                .push(0u8) // attributes
                .push(sfnt_types::Uint24::new(data_offsets[ix]))
                .push(0u32); // handle placeholder
        }
    }
    let map: Vec<u8> = map.push_bytes(&name_list.to_vec()).into();

    let data_area: Vec<u8> = data_area.into();
    let map_offset = HEADER_LEN + data_area.len();
    let mut image: Vec<u8> = BeBuffer::new()
        .push(HEADER_LEN as u32)
        .push(map_offset as u32)
        .push(data_area.len() as u32)
        .push(map.len() as u32)
        .into();
    image.extend(data_area);
    image.extend(map);
    image
}

/// A `.dfont` image holding one `FOND` and two complete `sfnt` fonts.
pub fn two_font_dfont() -> (Vec<u8>, [u32; 2]) {
    let font = crate::sfnt::simple_font();
    let image = build(&[
        Resource::new(Tag::new(b"FOND"), 1000, &[0; 8]).name("Test Family"),
        Resource::new(Tag::new(b"sfnt"), 1000, &font),
        Resource::new(Tag::new(b"sfnt"), 1001, &font),
    ]);
    // data offsets of the two sfnt resources within the data area
    let first = 4 + 8;
    let second = first + 4 + font.len() as u32;
    (image, [first, second])
}
