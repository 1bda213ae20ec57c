//! This library handles reading **ARC0** archives (`.fa` files) used by *Level-5* games.
//!
//! # ARC0 Archive Format Documentation
//!
//! An ARC0 archive stores a two-level directory tree (root, directories, files) as flat,
//! fixed-size record tables, a name blob, an optional name-hash index, and a shared data
//! region. All multi-byte integers are little-endian.
//!
//! ## File Structure
//!
//! The header occupies the first 64 bytes. The fields this library consumes sit at fixed
//! positions; the remaining header bytes are not interpreted.
//!
//! | Offset (bytes) | Field                  | Description                                     |
//! |----------------|------------------------|-------------------------------------------------|
//! | 0x0010         | Directory Table Offset | 4 bytes: offset of the directory record table   |
//! | 0x0014         | Hash Table Offset      | 4 bytes: offset of the name-hash table          |
//! | 0x0018         | File Table Offset      | 4 bytes: offset of the file record table        |
//! | 0x001C         | Name Offset            | 4 bytes: offset of the name blob                |
//! | 0x0020         | Data Offset            | 4 bytes: offset of the shared data region       |
//! | 0x0038         | Directory Count        | 2 bytes: number of directory records            |
//! | 0x003C         | File Count             | 4 bytes: number of file records                 |
//!
//! ### Directory Records
//!
//! `Directory Count` records of 16 bytes each, read sequentially from the directory table
//! offset:
//!
//! | Offset (bytes) | Field                  | Description                                     |
//! |----------------|------------------------|-------------------------------------------------|
//! | 0x0000         | Name Offset            | 4 bytes: this directory's name within the blob  |
//! | 0x0004         | File Name Base         | 4 bytes: base offset for its children's names   |
//! | 0x0008         | File Count             | 2 bytes: number of files this directory owns    |
//! | 0x000A         | First File Index       | 2 bytes: index of its first file record         |
//! | 0x000C         | Padding                | 4 bytes: unused                                 |
//!
//! A directory's files occupy the contiguous slice `[first, first + count)` of the file
//! record table. Directories never nest; the tree is always root → directories → files.
//!
//! ### File Records
//!
//! `File Count` records of 16 bytes each. A record's position in the table is its global
//! file index, the key used for extraction and for the hash table.
//!
//! | Offset (bytes) | Field                  | Description                                     |
//! |----------------|------------------------|-------------------------------------------------|
//! | 0x0000         | Name Offset            | 4 bytes: name offset relative to the owner's base |
//! | 0x0004         | Data Offset            | 4 bytes: payload offset within the data region  |
//! | 0x0008         | Size                   | 4 bytes: payload size in bytes                  |
//! | 0x000C         | Padding                | 4 bytes: unused                                 |
//!
//! ### Hash Table
//!
//! A sequence of 12-byte records (`u32` hash, `u32` name offset, `u32` index) terminated
//! by an all-zero record or by running out of bytes. The index is synthetic: a directory
//! is keyed by `first file index - 1`, a file by its global file index. The table is an
//! alternate name-resolution path; archives without usable entries fall back to the name
//! offsets stored in the records themselves.
//!
//! ### Name Blob
//!
//! The bytes between the name offset and the data offset. When the first byte is `0x10`
//! the blob is an LZ10 stream and is decompressed before use; otherwise it is taken as-is.
//! Names are null-terminated Shift-JIS strings.
//!
//! ### Data Region
//!
//! Raw file payloads starting at the data offset; a file's bytes are the sub-range
//! `[data offset + record offset, .. + record size)`.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.fa`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Name Encoding**: Shift-JIS, null-terminated
//!

pub mod error;
pub mod names;
pub mod read;
pub mod tree;
pub mod types;

pub use read::Arc0Archive;
pub use tree::ArchiveNode;

use std::fs::File;
use std::path::Path;

use crate::error::Result;

/// Parse an archive on disk and return its reconstructed directory tree.
///
/// The file is opened read-only for the duration of this call and released
/// before returning. The returned tree is an owned snapshot with no ties to
/// the source file.
pub fn parse_tree(path: impl AsRef<Path>) -> Result<ArchiveNode> {
    let mut file = File::open(path)?;
    let archive = Arc0Archive::new(&mut file)?;
    Ok(archive.root().clone())
}

/// Extract one file from an archive on disk by its global file index.
pub fn extract_by_index(path: impl AsRef<Path>, index: usize) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut archive = Arc0Archive::new(&mut file)?;
    archive.read_by_index(index)
}

/// Extract one file from an archive on disk by its `"directory/file"` path.
///
/// Matching is case-insensitive on both path segments.
pub fn extract_by_path(path: impl AsRef<Path>, entry: &str) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut archive = Arc0Archive::new(&mut file)?;
    archive.read_by_path(entry)
}
