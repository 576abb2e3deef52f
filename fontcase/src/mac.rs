//! Macintosh resource forks and font suitcases
//!
//! A suitcase stores each font as an `sfnt` resource inside a resource map,
//! either in a true resource fork or packaged into the data fork of a
//! `.dfont` file. The map layout is: a 16-byte header locating the data and
//! map areas, then at the map a reserved prologue, two offsets (type list
//! and name list, both map-relative), the type list, and per-type reference
//! lists.

use types::{Tag, Uint24};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The resource type holding sfnt font data.
pub const SFNT_RESOURCE: Tag = Tag::new(b"sfnt");
/// The resource type holding Macintosh font family descriptors.
pub const FOND_RESOURCE: Tag = Tag::new(b"FOND");

const MAP_RESERVED_LEN: usize = 28;

/// The 16-byte header at the start of a resource fork.
#[derive(Debug, Clone, Copy)]
pub struct ResourceHeader {
    pub data_offset: u32,
    pub map_offset: u32,
    pub data_len: u32,
    pub map_len: u32,
}

impl FontRead for ResourceHeader {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        Ok(ResourceHeader {
            data_offset: cursor.read()?,
            map_offset: cursor.read()?,
            data_len: cursor.read()?,
            map_len: cursor.read()?,
        })
    }
}

/// One reference from a resource map's reference list.
#[derive(Debug, Clone)]
pub struct ResourceRef {
    pub id: u16,
    /// The resource name, resolved from the map's name list.
    pub name: Option<String>,
    pub attributes: u8,
    /// Offset of this resource's data, relative to the fork's data area.
    pub data_offset: u32,
}

/// All references of a single resource type.
#[derive(Debug, Clone)]
pub struct ResourceType {
    pub tag: Tag,
    pub refs: Vec<ResourceRef>,
}

impl ResourceType {
    pub fn count(&self) -> usize {
        self.refs.len()
    }
}

/// A parsed resource fork: header plus map.
#[derive(Debug, Clone)]
pub struct ResourceFork {
    header: ResourceHeader,
    types: Vec<ResourceType>,
}

impl ResourceFork {
    /// The fork header.
    pub fn header(&self) -> &ResourceHeader {
        &self.header
    }

    /// All resource types declared by the map.
    pub fn types(&self) -> &[ResourceType] {
        &self.types
    }

    /// The type entry with this 4-byte tag, if the map declares one.
    pub fn resource_type(&self, tag: Tag) -> Option<&ResourceType> {
        self.types.iter().find(|ty| ty.tag == tag)
    }

    /// Locate a resource's data within the fork.
    ///
    /// Returns the absolute offset of the payload and its length; the length
    /// is stored as a big-endian u32 in the 4 bytes preceding the payload.
    pub fn data_slice(
        &self,
        data: FontData,
        reference: &ResourceRef,
    ) -> Result<(usize, usize), ReadError> {
        let len_offset = self.header.data_offset as usize + reference.data_offset as usize;
        let len: u32 = data.read_at(len_offset)?;
        let payload = len_offset + 4;
        if payload + len as usize > data.len() {
            return Err(ReadError::MalformedContainer(
                "resource data extends past end of fork",
            ));
        }
        Ok((payload, len as usize))
    }
}

impl FontRead for ResourceFork {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let header = ResourceHeader::read(data)?;
        let map_offset = header.map_offset as usize;

        let mut cursor = data.cursor();
        cursor.seek(map_offset + MAP_RESERVED_LEN);
        let _attributes: u16 = cursor.read()?;
        let type_list_offset: u16 = cursor.read()?;
        let name_list_offset: u16 = cursor.read()?;

        let type_list_base = map_offset + type_list_offset as usize;
        let name_list_base = map_offset + name_list_offset as usize;

        cursor.seek(type_list_base);
        // stored as count - 1; 0xFFFF means an empty map
        let type_count = cursor.read::<u16>()?.wrapping_add(1) as usize;

        let mut type_entries = Vec::with_capacity(type_count);
        for _ in 0..type_count {
            let tag: Tag = cursor.read()?;
            let ref_count = cursor.read::<u16>()?.wrapping_add(1) as usize;
            let ref_list_offset: u16 = cursor.read()?;
            type_entries.push((tag, ref_count, ref_list_offset));
        }

        let mut types = Vec::with_capacity(type_count);
        for (tag, ref_count, ref_list_offset) in type_entries {
            let mut cursor = data.cursor();
            cursor.seek(type_list_base + ref_list_offset as usize);
            let mut refs = Vec::with_capacity(ref_count);
            for _ in 0..ref_count {
                let id: u16 = cursor.read()?;
                let name_offset: u16 = cursor.read()?;
                let attributes: u8 = cursor.read()?;
                let data_offset: Uint24 = cursor.read()?;
                let _handle: u32 = cursor.read()?;
                let name = (name_offset != 0xFFFF)
                    .then(|| read_name(data, name_list_base + name_offset as usize))
                    .transpose()?;
                refs.push(ResourceRef {
                    id,
                    name,
                    attributes,
                    data_offset: data_offset.to_u32(),
                });
            }
            types.push(ResourceType { tag, refs });
        }

        Ok(ResourceFork { header, types })
    }
}

/// Read a Pascal string from the map's name list.
///
/// Resource names are MacRoman; we decode the ASCII-compatible range and map
/// the rest through Latin-1 as an approximation, which is how these dumps
/// have historically been logged.
fn read_name(data: FontData, offset: usize) -> Result<String, ReadError> {
    let len: u8 = data.read_at(offset)?;
    let bytes = data
        .slice(offset + 1..offset + 1 + len as usize)
        .ok_or(ReadError::MalformedContainer("resource name out of bounds"))?;
    Ok(bytes.as_bytes().iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::suitcase;

    #[test]
    fn enumerate_types() {
        let data = suitcase::build(&[
            suitcase::Resource::new(FOND_RESOURCE, 1000, &[1, 2, 3]).name("Test Family"),
            suitcase::Resource::new(SFNT_RESOURCE, 1000, &[4, 5, 6, 7]),
            suitcase::Resource::new(SFNT_RESOURCE, 1001, &[8, 9]),
        ]);
        let fork = ResourceFork::read(FontData::new(&data)).unwrap();
        assert_eq!(fork.types().len(), 2);

        let fond = fork.resource_type(FOND_RESOURCE).unwrap();
        assert_eq!(fond.count(), 1);
        assert_eq!(fond.refs[0].name.as_deref(), Some("Test Family"));

        let sfnt = fork.resource_type(SFNT_RESOURCE).unwrap();
        assert_eq!(sfnt.count(), 2);
        assert_eq!(sfnt.refs[0].id, 1000);
        assert!(sfnt.refs[0].name.is_none());
        assert!(fork.resource_type(Tag::new(b"STR ")).is_none());
    }

    #[test]
    fn data_slices() {
        let payloads: [&[u8]; 2] = [&[4, 5, 6, 7], &[8, 9]];
        let data = suitcase::build(&[
            suitcase::Resource::new(SFNT_RESOURCE, 1000, payloads[0]),
            suitcase::Resource::new(SFNT_RESOURCE, 1001, payloads[1]),
        ]);
        let fork = ResourceFork::read(FontData::new(&data)).unwrap();
        let sfnt = fork.resource_type(SFNT_RESOURCE).unwrap();
        for (reference, payload) in sfnt.refs.iter().zip(payloads) {
            let (offset, len) = fork
                .data_slice(FontData::new(&data), reference)
                .unwrap();
            assert_eq!(&data[offset..offset + len], payload);
            // the length prefix sits in the 4 preceding bytes
            assert_eq!(
                u32::from_be_bytes(data[offset - 4..offset].try_into().unwrap()),
                len as u32
            );
        }
    }

    #[test]
    fn truncated_fork() {
        let data = suitcase::build(&[suitcase::Resource::new(SFNT_RESOURCE, 0, &[1, 2, 3, 4])]);
        let fork = ResourceFork::read(FontData::new(&data)).unwrap();
        let reference = &fork.resource_type(SFNT_RESOURCE).unwrap().refs[0];
        // cut into the payload: header (16) + length prefix (4) + 3 of 4 bytes
        let truncated = &data[..23];
        assert!(fork
            .data_slice(FontData::new(truncated), reference)
            .is_err());
    }
}
