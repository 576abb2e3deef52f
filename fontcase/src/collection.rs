//! Loading font collections from files or memory

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use types::Tag;

use crate::font_data::FontData;
use crate::mac::{ResourceFork, FOND_RESOURCE, SFNT_RESOURCE};
use crate::read::{FontRead, ReadError};
use crate::registry::{def_for, DecodeCtx, TableCache};
use crate::table_directory::{table_checksum, TableDirectory, TableRecord};
use crate::tables::{Head, Hmtx, LongMetric, Maxp, OtherTable, Table, Vmtx};
use crate::ttc::TtcHeader;

/// Options controlling how a collection is opened.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    strict: bool,
    suitcase: bool,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote recoverable anomalies (duplicate directory tags,
    /// non-monotonic `loca`, unknown `cmap` formats) from warnings to
    /// errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Force the suitcase branch, as if the file had a `.dfont` suffix.
    pub fn suitcase(mut self, suitcase: bool) -> Self {
        self.suitcase = suitcase;
        self
    }

    /// Open a font file.
    ///
    /// A file with an empty data fork is retried through its `..namedfork`
    /// resource fork path, the macOS spelling for the fork of an old-style
    /// suitcase.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Collection, ReadError> {
        let path = path.as_ref();
        let mut data = std::fs::read(path)?;
        let mut from_resource_fork = false;
        if data.is_empty() {
            data = std::fs::read(resource_fork_path(path))?;
            from_resource_fork = true;
        }
        let suitcase = self.suitcase
            || from_resource_fork
            || path.extension().is_some_and(|ext| ext == "dfont");
        let mut collection = self.load_classified(data, suitcase)?;
        collection.path = Some(path.to_path_buf());
        collection.from_resource_fork = from_resource_fork;
        Ok(collection)
    }

    /// Load a collection from an in-memory image.
    ///
    /// The suitcase branch is only taken when requested via
    /// [`suitcase`](OpenOptions::suitcase); there is no file name to
    /// inspect.
    pub fn load(&self, data: Vec<u8>) -> Result<Collection, ReadError> {
        self.load_classified(data, self.suitcase)
    }

    // Classification order matters: a suitcase's sfnt payloads begin with
    // valid sfnt magic themselves, so the container decision comes first.
    fn load_classified(&self, data: Vec<u8>, suitcase: bool) -> Result<Collection, ReadError> {
        let mut fonts = Vec::new();
        let mut ttc = None;
        {
            let image = FontData::new(&data);
            if suitcase {
                let fork = ResourceFork::read(image)?;
                for ty in fork.types() {
                    log::info!("resource type {}", ty.tag);
                }
                if let Some(fond) = fork.resource_type(FOND_RESOURCE) {
                    for reference in &fond.refs {
                        log::info!("family {}", reference.name.as_deref().unwrap_or("?"));
                    }
                }
                let sfnts = fork
                    .resource_type(SFNT_RESOURCE)
                    .ok_or(ReadError::MalformedContainer("no sfnt resources"))?;
                for reference in &sfnts.refs {
                    let (payload, _len) = fork.data_slice(image, reference)?;
                    fonts.push(self.read_font(image, payload as u32, payload as u32)?);
                }
            } else if TtcHeader::is_ttc(image) {
                let header = TtcHeader::read(image)?;
                for &offset in header.directory_offsets() {
                    // table offsets in a collection are file-absolute
                    fonts.push(self.read_font(image, offset, 0)?);
                }
                ttc = Some(header);
            } else {
                fonts.push(self.read_font(image, 0, 0)?);
            }
        }
        Ok(Collection {
            data,
            path: None,
            from_resource_fork: false,
            strict: self.strict,
            ttc,
            fonts,
            cache: TableCache::default(),
            trace: Mutex::new(Vec::new()),
        })
    }

    fn read_font(
        &self,
        image: FontData,
        sfnt_base: u32,
        table_data_base: u32,
    ) -> Result<FontEntry, ReadError> {
        let sfnt = image
            .split_off(sfnt_base as usize)
            .ok_or(ReadError::MalformedContainer("sfnt offset past end of file"))?;
        let directory = TableDirectory::read(sfnt, self.strict)?;
        Ok(FontEntry {
            sfnt_base,
            table_data_base,
            directory,
        })
    }
}

/// The path used to reach a file's resource fork on macOS.
pub(crate) fn resource_fork_path(path: &Path) -> PathBuf {
    path.join("..namedfork/rsrc")
}

struct FontEntry {
    sfnt_base: u32,
    table_data_base: u32,
    directory: TableDirectory,
}

/// An opened font file: the byte image, its fonts, and the shared table
/// cache.
pub struct Collection {
    data: Vec<u8>,
    path: Option<PathBuf>,
    from_resource_fork: bool,
    strict: bool,
    ttc: Option<TtcHeader>,
    fonts: Vec<FontEntry>,
    cache: TableCache,
    trace: Mutex<Vec<Tag>>,
}

impl Collection {
    /// Open a font file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        OpenOptions::new().open(path)
    }

    /// Load a collection from an in-memory image with default options.
    pub fn load(data: Vec<u8>) -> Result<Self, ReadError> {
        OpenOptions::new().load(data)
    }

    /// The number of fonts in the collection (1 unless TTC or suitcase).
    pub fn font_count(&self) -> u32 {
        self.fonts.len() as u32
    }

    /// A handle to the font at `index`.
    pub fn font(&self, index: u32) -> Result<Font<'_>, ReadError> {
        if (index as usize) < self.fonts.len() {
            Ok(Font {
                collection: self,
                index: index as usize,
            })
        } else {
            Err(ReadError::InvalidCollectionIndex(index))
        }
    }

    /// Iterate over all fonts.
    pub fn fonts(&self) -> impl Iterator<Item = Font<'_>> + '_ {
        (0..self.fonts.len()).map(move |index| Font {
            collection: self,
            index,
        })
    }

    /// The path the collection was opened from.
    pub fn path_name(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The final component of the opened path.
    pub fn file_name(&self) -> Option<&str> {
        self.path.as_deref().and_then(Path::file_name)?.to_str()
    }

    /// `true` if the bytes came from a `..namedfork` resource fork.
    pub fn from_resource_fork(&self) -> bool {
        self.from_resource_fork
    }

    /// The TTC header, present iff the file is a TrueType collection.
    pub fn ttc_header(&self) -> Option<&TtcHeader> {
        self.ttc.as_ref()
    }

    /// The raw byte image backing the collection.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The tags decoded so far, in materialization order.
    ///
    /// Cache hits don't append; only an actual decode does.
    pub fn decode_trace(&self) -> Vec<Tag> {
        self.trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate every directory entry's checksum against the table bytes.
    ///
    /// Deferred by design: fonts in the wild routinely carry stale
    /// checksums, so nothing in the open or decode paths calls this.
    pub fn check_integrity(&self) -> Result<(), ReadError> {
        for entry in &self.fonts {
            self.check_entry_integrity(entry)?;
        }
        Ok(())
    }

    fn check_entry_integrity(&self, entry: &FontEntry) -> Result<(), ReadError> {
        for record in entry.directory.records() {
            let bytes = self.record_bytes(entry, record)?;
            let sum = if record.tag == Head::TAG && bytes.len() >= 12 {
                // checksumAdjustment is summed as zero
                let mut copy = bytes.to_vec();
                copy[8..12].fill(0);
                table_checksum(&copy)
            } else {
                table_checksum(bytes)
            };
            if sum != record.checksum {
                return Err(ReadError::ChecksumMismatch(record.tag));
            }
        }
        Ok(())
    }

    fn record_bytes(&self, entry: &FontEntry, record: &TableRecord) -> Result<&[u8], ReadError> {
        let start = entry.table_data_base as usize + record.offset as usize;
        let end = start + record.len as usize;
        self.data.get(start..end).ok_or(ReadError::OutOfBounds {
            offset: start,
            len: record.len as usize,
        })
    }

    fn materialize(&self, entry: &FontEntry, tag: Tag) -> Result<Arc<Table>, ReadError> {
        let record = *entry
            .directory
            .record(tag)
            .ok_or(ReadError::TableIsMissing(tag))?;
        let def = def_for(tag);

        // Dependencies are resolved before this table's cache slot is
        // locked, so nested materialization never holds two slot locks.
        let dep_tags = def.map_or(&[][..], |def| def.deps);
        let mut deps = Vec::with_capacity(dep_tags.len());
        for dep in dep_tags {
            deps.push(self.materialize(entry, *dep)?);
        }

        let abs = entry.table_data_base + record.offset;
        let key = (abs, record.len);
        let bytes = self.record_bytes(entry, &record)?;
        let data = FontData::new(&self.data)
            .slice(abs as usize..abs as usize + bytes.len())
            .ok_or(ReadError::OutOfBounds {
                offset: abs as usize,
                len: record.len as usize,
            })?;
        let ctx = DecodeCtx {
            strict: self.strict,
            deps,
        };
        self.cache.get_or_decode(
            key,
            || match def {
                Some(def) => (def.decode)(data, &ctx).map(|table| (table, tag)),
                // no decoder for this tag; keep it addressable as bytes
                None => Ok((
                    Table::Other(OtherTable {
                        tag,
                        data: bytes.to_vec(),
                    }),
                    tag,
                )),
            },
            |tag| {
                self.trace
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(tag)
            },
        )
    }
}

/// A single font within a [`Collection`].
#[derive(Clone, Copy)]
pub struct Font<'a> {
    collection: &'a Collection,
    index: usize,
}

impl<'a> Font<'a> {
    fn entry(&self) -> &'a FontEntry {
        &self.collection.fonts[self.index]
    }

    /// The font's position within the collection.
    pub fn index(&self) -> u32 {
        self.index as u32
    }

    /// The absolute offset of this font's offset subtable.
    pub fn sfnt_base(&self) -> u32 {
        self.entry().sfnt_base
    }

    /// The base added to directory entry offsets to locate table data.
    pub fn table_data_base(&self) -> u32 {
        self.entry().table_data_base
    }

    /// The font's table directory.
    pub fn directory(&self) -> &'a TableDirectory {
        &self.entry().directory
    }

    /// The decoded table for a tag, materializing it (and its
    /// dependencies) on first request.
    ///
    /// Repeated requests return the same instance, as do requests from
    /// other fonts in the collection whose directories point at the same
    /// byte span.
    pub fn table(&self, tag: Tag) -> Result<Arc<Table>, ReadError> {
        self.collection.materialize(self.entry(), tag)
    }

    /// The raw bytes of a table, without decoding it.
    pub fn table_bytes(&self, tag: Tag) -> Result<&'a [u8], ReadError> {
        let entry = self.entry();
        let record = entry
            .directory
            .record(tag)
            .ok_or(ReadError::TableIsMissing(tag))?;
        self.collection.record_bytes(entry, record)
    }

    /// The number of glyphs, from `maxp`.
    pub fn glyph_count(&self) -> Result<u16, ReadError> {
        let maxp = self.table(Maxp::TAG)?;
        let maxp = maxp.as_maxp().ok_or(ReadError::TableIsMissing(Maxp::TAG))?;
        Ok(maxp.num_glyphs)
    }

    /// The advance and side bearing of a glyph, from `hmtx` or `vmtx`.
    pub fn advance(&self, glyph_id: u16, horizontal: bool) -> Result<LongMetric, ReadError> {
        if horizontal {
            let table = self.table(Hmtx::TAG)?;
            let hmtx = table.as_hmtx().ok_or(ReadError::TableIsMissing(Hmtx::TAG))?;
            Ok(hmtx.metric(glyph_id))
        } else {
            let table = self.table(Vmtx::TAG)?;
            let vmtx = table.as_vmtx().ok_or(ReadError::TableIsMissing(Vmtx::TAG))?;
            Ok(vmtx.metric(glyph_id))
        }
    }

    /// Validate this font's directory checksums against its table bytes.
    ///
    /// The per-font view of [`Collection::check_integrity`].
    pub fn check_integrity(&self) -> Result<(), ReadError> {
        self.collection.check_entry_integrity(self.entry())
    }

    /// The bytes of a glyph's outline data, located via `loca` and `glyf`.
    ///
    /// Empty for glyphs without an outline or ids out of range.
    pub fn glyph_bytes(&self, glyph_id: u16) -> Result<Vec<u8>, ReadError> {
        let loca = self.table(crate::tables::Loca::TAG)?;
        let loca = loca
            .as_loca()
            .ok_or(ReadError::TableIsMissing(crate::tables::Loca::TAG))?;
        let glyf = self.table(crate::tables::Glyf::TAG)?;
        let glyf = glyf
            .as_glyf()
            .ok_or(ReadError::TableIsMissing(crate::tables::Glyf::TAG))?;
        Ok(glyf
            .glyph_bytes(loca, glyph_id)
            .map(<[u8]>::to_vec)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{Cvt, Glyf, Loca, Name};
    use fontcase_test_data::{payload, sfnt, suitcase, ttc};
    use pretty_assertions::assert_eq;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn standalone_truetype() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        assert_eq!(collection.font_count(), 1);
        assert!(collection.ttc_header().is_none());
        assert!(!collection.from_resource_fork());

        let font = collection.font(0).unwrap();
        assert_eq!(font.directory().num_tables(), 12);
        let head_bytes = font.table_bytes(Head::TAG).unwrap();
        let table = font.table(Head::TAG).unwrap();
        let head = table.as_head().unwrap();
        assert_eq!(
            head.units_per_em,
            u16::from_be_bytes([head_bytes[18], head_bytes[19]])
        );
    }

    #[test]
    fn tables_are_idempotent() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        let first = font.table(Maxp::TAG).unwrap();
        let second = font.table(Maxp::TAG).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        // a cache hit records no further decode
        assert_eq!(collection.decode_trace(), [Maxp::TAG]);
    }

    #[test]
    fn ttc_shares_identical_spans() {
        let collection = OpenOptions::new().load(ttc::shared_pair()).unwrap();
        assert_eq!(collection.font_count(), 2);
        assert_eq!(collection.ttc_header().unwrap().directory_count(), 2);

        let first = collection.font(0).unwrap().table(Cvt::TAG).unwrap();
        let second = collection.font(1).unwrap().table(Cvt::TAG).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // the name tables differ, so they don't share
        let first = collection.font(0).unwrap().table(Name::TAG).unwrap();
        let second = collection.font(1).unwrap().table(Name::TAG).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn dfont_enumerates_sfnt_resources() {
        init_logging();
        let (image, data_offsets) = suitcase::two_font_dfont();
        let collection = OpenOptions::new().suitcase(true).load(image).unwrap();
        assert_eq!(collection.font_count(), 2);
        for (ix, offset) in data_offsets.iter().enumerate() {
            let font = collection.font(ix as u32).unwrap();
            // header.dataOffset + resource data offset + length prefix
            assert_eq!(font.sfnt_base(), 16 + offset + 4);
            assert_eq!(font.table_data_base(), font.sfnt_base());
            assert_eq!(font.glyph_count().unwrap(), 4);
        }
    }

    #[test]
    fn glyf_materializes_dependencies_in_order() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        let glyf = font.table(Glyf::TAG).unwrap();
        assert_eq!(
            collection.decode_trace(),
            [Head::TAG, Maxp::TAG, Loca::TAG, Glyf::TAG]
        );
        // all four cached now; a second request decodes nothing new
        let again = font.table(Glyf::TAG).unwrap();
        assert!(Arc::ptr_eq(&glyf, &again));
        assert_eq!(collection.decode_trace().len(), 4);
    }

    #[test]
    fn loca_has_num_glyphs_plus_one_entries() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        let table = font.table(Loca::TAG).unwrap();
        let loca = table.as_loca().unwrap();
        assert_eq!(loca.len(), font.glyph_count().unwrap() as usize + 1);
    }

    #[test]
    fn lenient_and_strict_loca() {
        init_logging();
        let mut tables = sfnt::simple_font_tables();
        for (tag, data) in &mut tables {
            if *tag == Loca::TAG {
                *data = payload::loca_short(&[0, 2, 1, 5, 6]);
            }
        }
        let image = sfnt::build(&tables);

        let collection = OpenOptions::new().load(image.clone()).unwrap();
        let font = collection.font(0).unwrap();
        let table = font.table(Loca::TAG).unwrap();
        assert_eq!(table.as_loca().unwrap().offsets(), [0, 4, 2, 10, 12]);

        let strict = OpenOptions::new().strict(true).load(image).unwrap();
        let err = strict.font(0).unwrap().table(Loca::TAG).unwrap_err();
        assert!(matches!(err, ReadError::Decode { tag, .. } if tag == Loca::TAG));
    }

    #[test]
    fn advance_clamps_to_last_long_metric() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        let metric = font.advance(3, true).unwrap();
        assert_eq!((metric.advance, metric.side_bearing), (600, 40));
        // vertical metrics are absent in this font
        assert!(matches!(
            font.advance(0, false),
            Err(ReadError::TableIsMissing(tag)) if tag == Vmtx::TAG
        ));
    }

    #[test]
    fn glyph_bytes_via_loca() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        assert_eq!(font.glyph_bytes(0).unwrap(), [1, 2, 3, 4]);
        assert!(font.glyph_bytes(1).unwrap().is_empty());
        assert_eq!(font.glyph_bytes(2).unwrap(), [5, 6, 7, 8, 9, 10]);
        assert!(font.glyph_bytes(100).unwrap().is_empty());
    }

    #[test]
    fn character_mapping() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        let table = font.table(crate::tables::Cmap::TAG).unwrap();
        let cmap = table.as_cmap().unwrap();
        assert_eq!(cmap.find(3, 1).unwrap().map('A' as u32), 1);
        assert_eq!(cmap.find(3, 1).unwrap().map('D' as u32), 4);
        assert_eq!(cmap.find(3, 1).unwrap().map('E' as u32), 0);
    }

    #[test]
    fn integrity_check() {
        let image = sfnt::simple_font();
        let collection = OpenOptions::new().load(image.clone()).unwrap();
        collection.check_integrity().unwrap();
        collection.font(0).unwrap().check_integrity().unwrap();

        let mut corrupt = image;
        let ix = corrupt.len() - 2;
        corrupt[ix] ^= 0xFF;
        let collection = OpenOptions::new().load(corrupt).unwrap();
        assert!(matches!(
            collection.check_integrity(),
            Err(ReadError::ChecksumMismatch(_))
        ));
        assert!(matches!(
            collection.font(0).unwrap().check_integrity(),
            Err(ReadError::ChecksumMismatch(_))
        ));
    }

    #[test]
    fn undecoded_tag_kept_as_bytes() {
        let mut tables = sfnt::simple_font_tables();
        tables.push((Tag::new(b"GSUB"), vec![0xDE, 0xAD, 0xBE, 0xEF]));
        let collection = OpenOptions::new().load(sfnt::build(&tables)).unwrap();
        let font = collection.font(0).unwrap();

        let table = font.table(Tag::new(b"GSUB")).unwrap();
        let other = table.as_other().unwrap();
        assert_eq!(other.tag, Tag::new(b"GSUB"));
        assert_eq!(other.data, [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(table.tag(), Tag::new(b"GSUB"));

        // cached like any decoded table
        let again = font.table(Tag::new(b"GSUB")).unwrap();
        assert!(Arc::ptr_eq(&table, &again));
    }

    #[test]
    fn missing_table_and_bad_index() {
        let collection = OpenOptions::new().load(sfnt::simple_font()).unwrap();
        let font = collection.font(0).unwrap();
        assert!(matches!(
            font.table(Tag::new(b"GPOS")),
            Err(ReadError::TableIsMissing(tag)) if tag == Tag::new(b"GPOS")
        ));
        assert!(matches!(
            collection.font(5),
            Err(ReadError::InvalidCollectionIndex(5))
        ));
    }

    #[test]
    fn resource_fork_detour_path() {
        let path = resource_fork_path(Path::new("fonts/Geneva"));
        assert_eq!(path, Path::new("fonts/Geneva/..namedfork/rsrc"));
    }

    #[test]
    fn open_from_disk() {
        let dir = std::env::temp_dir().join(format!("fontcase-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("simple.ttf");
        std::fs::write(&path, sfnt::simple_font()).unwrap();

        let collection = Collection::open(&path).unwrap();
        assert_eq!(collection.font_count(), 1);
        assert_eq!(collection.file_name(), Some("simple.ttf"));
        assert_eq!(collection.path_name(), Some(path.as_path()));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
