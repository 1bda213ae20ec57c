//! Types for reading ARC0 archives
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use indexmap::IndexMap;
use std::{
    fmt::{self, Debug},
    io::{self, Read, Seek, SeekFrom},
    sync::Arc,
};
use tracing::{instrument, warn};

use crate::{
    error::{Error, Result},
    names::NameTable,
    tree::{self, ArchiveNode},
    types::{Arc0DirectoryRecord, Arc0FileRecord, Arc0Header, HashRecord, MIN_HEADER_SIZE},
};

/// Metadata for one file entry, derived from its record and the tree build.
#[derive(Debug, Clone, Default)]
pub struct Arc0FileData {
    /// Global file index of this entry
    pub file_index: usize,

    /// Resolved name of the file.
    ///
    /// Synthesized `file_<index>` names stand in when no hash entry exists;
    /// they are deterministic but not authoritative.
    pub file_name: Box<str>,

    /// Case-folded `"directory/file"` path, when the entry is reachable from
    /// the directory tree
    pub path: Option<Box<str>>,

    /// Absolute offset where the payload starts
    pub data_start: u64,

    /// Payload size in bytes
    pub size: u64,
}

/// A struct for reading an entry from an ARC0 archive
pub struct Arc0File<'a, R: Read + Seek> {
    data: &'a Arc0FileData,
    reader: io::Take<&'a mut R>,
}

impl<R: Read + Seek> Debug for Arc0File<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Arc0File({:#?})", self.data)
    }
}

/// Methods for retrieving information on ARC0 file entries
impl<R: Read + Seek> Arc0File<'_, R> {
    /// Get the name of the file
    pub fn name(&self) -> &str {
        &self.data.file_name
    }

    /// Get the `"directory/file"` path of the file, if it appears in the tree
    pub fn path(&self) -> Option<&str> {
        self.data.path.as_deref()
    }

    /// Get the global file index of the file
    pub fn index(&self) -> usize {
        self.data.file_index
    }

    /// Get the size of the file, in bytes
    pub fn size(&self) -> u64 {
        self.data.size
    }

    /// Get the absolute offset of the file's payload
    pub fn data_start(&self) -> u64 {
        self.data.data_start
    }
}

impl<R: Read + Seek> Read for Arc0File<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

#[derive(Debug)]
pub(crate) struct Shared {
    header: Arc0Header,
    source_len: u64,
    files: Vec<Arc0FileData>,
    paths: IndexMap<Box<str>, usize>,
    root: ArchiveNode,
}

/// ARC0 archive reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_archive_contents(reader: impl Read + Seek) -> fa_arc0::error::Result<()> {
///     let mut archive = fa_arc0::Arc0Archive::new(reader)?;
///
///     for i in 0..archive.len() {
///         let mut file = archive.by_index(i)?;
///         println!("{}: {} bytes", file.name(), file.size());
///         std::io::copy(&mut file, &mut std::io::stdout())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct Arc0Archive<R> {
    reader: R,
    shared: Arc<Shared>,
}

impl<R> Arc0Archive<R> {
    /// Total size of the files in the archive, if it can be known. Doesn't
    /// include directories or metadata.
    pub fn total_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in &self.shared.files {
            total = total.checked_add(u128::from(file.size))?;
        }
        Some(total)
    }

    /// The parsed archive header.
    pub fn header(&self) -> &Arc0Header {
        &self.shared.header
    }

    /// The reconstructed directory tree.
    pub fn root(&self) -> &ArchiveNode {
        &self.shared.root
    }

    /// Number of file entries contained in this archive.
    pub fn len(&self) -> usize {
        self.shared.files.len()
    }

    /// Whether this archive contains no file entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the tree-reachable file paths, in record order.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.shared.paths.keys().map(|s| s.as_ref())
    }

    /// Get the global index for a `"directory/file"` path, if it's present.
    ///
    /// Matching is case-insensitive on both segments.
    pub fn index_for_path(&self, path: &str) -> Option<usize> {
        let mut node = &self.shared.root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = node.child(segment)?;
        }
        node.file_index
    }

    /// Get the resolved name of a file entry, if it's present.
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.shared.files.get(index).map(|f| &*f.file_name)
    }

    /// Get the metadata of a file entry, if it's present.
    pub fn metadata_for_index(&self, index: usize) -> Option<&Arc0FileData> {
        self.shared.files.get(index)
    }
}

impl<R: Read + Seek> Arc0Archive<R> {
    /// Read an ARC0 archive, collecting the records it contains and
    /// reconstructing its directory tree.
    #[instrument(skip(reader), err)]
    pub fn new(mut reader: R) -> Result<Arc0Archive<R>> {
        let shared = Self::get_metadata(&mut reader)?;

        Ok(Arc0Archive {
            reader,
            shared: shared.into(),
        })
    }

    /// Get a contained file by its global index
    #[instrument(skip(self))]
    pub fn by_index(&mut self, index: usize) -> Result<Arc0File<'_, R>> {
        let Some(data) = self.shared.files.get(index) else {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.shared.files.len(),
            });
        };

        let end = data.data_start.checked_add(data.size);
        match end {
            Some(end) if end <= self.shared.source_len => {}
            _ => {
                return Err(Error::MalformedContainer(format!(
                    "file {index} payload [{:#x}, {:#x}) exceeds source length {:#x}",
                    data.data_start,
                    data.data_start.saturating_add(data.size),
                    self.shared.source_len
                )))
            }
        }

        self.reader.seek(SeekFrom::Start(data.data_start))?;
        Ok(Arc0File {
            data,
            reader: self.reader.by_ref().take(data.size),
        })
    }

    /// Get a contained file by its `"directory/file"` path
    ///
    /// Matching is case-insensitive on both segments.
    #[instrument(skip(self))]
    pub fn by_path(&mut self, path: &str) -> Result<Arc0File<'_, R>> {
        let Some(index) = self.index_for_path(path) else {
            return Err(Error::FileNotFound(path.to_owned()));
        };
        self.by_index(index)
    }

    /// Read a contained file into a fresh buffer by its global index
    pub fn read_by_index(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut file = self.by_index(index)?;
        let size = file.size();

        let mut buffer = Vec::with_capacity(size as usize);
        file.read_to_end(&mut buffer)?;
        if buffer.len() as u64 != size {
            return Err(Error::MalformedContainer(format!(
                "file {index} yielded {} of {size} bytes",
                buffer.len()
            )));
        }

        Ok(buffer)
    }

    /// Read a contained file into a fresh buffer by its `"directory/file"` path
    pub fn read_by_path(&mut self, path: &str) -> Result<Vec<u8>> {
        let Some(index) = self.index_for_path(path) else {
            return Err(Error::FileNotFound(path.to_owned()));
        };
        self.read_by_index(index)
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn get_directories(
        reader: &mut R,
        header: &Arc0Header,
        source_len: u64,
    ) -> Result<Vec<Arc0DirectoryRecord>> {
        let start = header.directory_entries_offset as u64;
        let count = header.directory_entries_count as u64;
        let end = start + count * Arc0DirectoryRecord::SIZE;
        if end > source_len {
            return Err(Error::MalformedContainer(format!(
                "directory table [{start:#x}, {end:#x}) exceeds source length {source_len:#x}"
            )));
        }

        reader.seek(SeekFrom::Start(start))?;
        (0..count)
            .map(|_| Arc0DirectoryRecord::read(reader).map_err(Error::from))
            .collect()
    }

    fn get_files(
        reader: &mut R,
        header: &Arc0Header,
        source_len: u64,
    ) -> Result<Vec<Arc0FileRecord>> {
        let start = header.file_entries_offset as u64;
        let count = header.file_entries_count as u64;
        let end = start + count * Arc0FileRecord::SIZE;
        if end > source_len {
            return Err(Error::MalformedContainer(format!(
                "file table [{start:#x}, {end:#x}) exceeds source length {source_len:#x}"
            )));
        }

        reader.seek(SeekFrom::Start(start))?;
        let records: Vec<Arc0FileRecord> = (0..count)
            .map(|_| Arc0FileRecord::read(reader).map_err(Error::from))
            .collect::<Result<_>>()?;

        for (index, record) in records.iter().enumerate() {
            if record.file_offset < 0 || record.file_size < 0 {
                return Err(Error::MalformedContainer(format!(
                    "file record {index} has a negative payload range (offset {}, size {})",
                    record.file_offset, record.file_size
                )));
            }
        }

        Ok(records)
    }

    fn get_hash_records(
        reader: &mut R,
        header: &Arc0Header,
        source_len: u64,
    ) -> Result<Vec<HashRecord>> {
        let mut position = header.directory_hash_offset as u64;
        reader.seek(SeekFrom::Start(position))?;

        let mut records = Vec::new();
        while position + HashRecord::SIZE <= source_len {
            let record = HashRecord {
                hash: reader.read_u32::<LittleEndian>()?,
                name_offset: reader.read_u32::<LittleEndian>()?,
                index: reader.read_u32::<LittleEndian>()?,
            };
            if record.is_sentinel() {
                break;
            }

            records.push(record);
            position += HashRecord::SIZE;
        }

        Ok(records)
    }

    fn get_name_table(reader: &mut R, header: &Arc0Header) -> Result<NameTable> {
        let size = i64::from(header.data_offset) - i64::from(header.name_offset);
        if size <= 0 {
            return Err(Error::MalformedContainer(format!(
                "name blob span [{:#x}, {:#x}) is empty",
                header.name_offset, header.data_offset
            )));
        }

        reader.seek(SeekFrom::Start(header.name_offset as u64))?;
        let mut blob = vec![0u8; size as usize];
        reader.read_exact(&mut blob)?;

        // A blob that carries the LZ10 signature but fails to decode loses
        // its names, not the whole parse; the tree degrades to placeholders.
        match NameTable::from_blob(blob) {
            Ok(table) => Ok(table),
            Err(error) => {
                warn!(%error, "name blob did not decode, names degrade to placeholders");
                Ok(NameTable::empty())
            }
        }
    }

    fn get_metadata(reader: &mut R) -> Result<Shared> {
        let source_len = reader.seek(SeekFrom::End(0))?;
        if source_len < MIN_HEADER_SIZE {
            return Err(Error::MalformedContainer(format!(
                "source of {source_len} bytes is shorter than the {MIN_HEADER_SIZE}-byte header region"
            )));
        }

        let header = Arc0Header::read(reader)?;
        header.validate(source_len)?;

        let directories = Self::get_directories(reader, &header, source_len)?;
        let file_records = Self::get_files(reader, &header, source_len)?;
        let hashes = Self::get_hash_records(reader, &header, source_len)?;
        let names = Self::get_name_table(reader, &header)?;

        let root = tree::build_tree(&directories, &file_records, &hashes, &names);

        let data_offset = header.data_offset as u64;
        let mut files: Vec<Arc0FileData> = file_records
            .iter()
            .enumerate()
            .map(|(index, record)| Arc0FileData {
                file_index: index,
                file_name: format!("file_{index}").into(),
                path: None,
                data_start: data_offset + record.file_offset as u64,
                size: record.file_size as u64,
            })
            .collect();

        for dir in &root.children {
            for node in &dir.children {
                let Some(index) = node.file_index else {
                    continue;
                };
                let data = &mut files[index];
                data.file_name = node.name.clone().into();
                data.path = Some(if dir.name.is_empty() {
                    node.name.clone().into()
                } else {
                    format!("{}/{}", dir.name, node.name).into()
                });
            }
        }

        let mut paths = IndexMap::with_capacity(files.len());
        for data in &files {
            if let Some(path) = &data.path {
                paths.insert(path.clone(), data.file_index);
            }
        }

        Ok(Shared {
            header,
            source_len,
            files,
            paths,
            root,
        })
    }
}
