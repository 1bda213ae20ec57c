//! Base types for structure of ARC0 archives.

use binrw::io::SeekFrom;
use binrw::{BinRead, BinWrite};

use crate::error::{Error, Result};

/// Smallest source that can hold the fixed header field positions.
pub const MIN_HEADER_SIZE: u64 = 0x40;

/// ARC0 archive header
///
/// The consumed fields sit at fixed byte positions inside the first 64 bytes;
/// everything between them is skipped rather than interpreted. All data is
/// stored in little endian format.
#[derive(BinRead, Debug, Copy, Clone, PartialEq)]
#[br(little)]
pub struct Arc0Header {
    /// The offset from the beginning of the file where the directory records start
    #[br(seek_before = SeekFrom::Start(0x10))]
    pub directory_entries_offset: i32,

    /// The offset of the name-hash table
    pub directory_hash_offset: i32,

    /// The offset where the file records start
    pub file_entries_offset: i32,

    /// The offset of the name blob
    pub name_offset: i32,

    /// The offset of the shared data region
    pub data_offset: i32,

    /// The number of directory records stored in the archive
    #[br(seek_before = SeekFrom::Start(0x38))]
    pub directory_entries_count: i16,

    /// The number of file records stored in the archive
    #[br(seek_before = SeekFrom::Start(0x3C))]
    pub file_entries_count: i32,
}

impl Arc0Header {
    /// Check the header's internal consistency against the source length.
    ///
    /// Every table offset must lie inside `[0, data_offset]` and the data
    /// region must start inside the source; both counts must be non-negative.
    pub fn validate(&self, source_len: u64) -> Result<()> {
        if i64::from(self.data_offset) > source_len as i64 {
            return Err(Error::MalformedContainer(format!(
                "data region offset {:#x} exceeds source length {:#x}",
                self.data_offset, source_len
            )));
        }

        let tables = [
            ("directory table", self.directory_entries_offset),
            ("hash table", self.directory_hash_offset),
            ("file table", self.file_entries_offset),
            ("name blob", self.name_offset),
        ];
        for (what, offset) in tables {
            if offset < 0 || offset > self.data_offset {
                return Err(Error::MalformedContainer(format!(
                    "{what} offset {offset:#x} outside [0, {:#x}]",
                    self.data_offset
                )));
            }
        }

        if self.directory_entries_count < 0 || self.file_entries_count < 0 {
            return Err(Error::MalformedContainer(format!(
                "negative record count ({} directories, {} files)",
                self.directory_entries_count, self.file_entries_count
            )));
        }

        Ok(())
    }
}

/// ARC0 directory record
///
/// A 16-byte entry describing one directory and the contiguous slice of the
/// file table it owns.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct Arc0DirectoryRecord {
    /// Offset of this directory's own name within the name blob
    pub directory_name_offset: i32,

    /// Base offset its children's name offsets are relative to
    pub file_name_base_offset: i32,

    /// Number of file records this directory owns
    pub file_count: i16,

    /// Global index of the first owned file record
    #[brw(pad_after = 4)]
    pub first_file_index: u16,
}

impl Arc0DirectoryRecord {
    /// Encoded size of one record, including padding.
    pub const SIZE: u64 = 16;

    /// The synthetic hash-table index keying this directory, if one exists.
    ///
    /// Directories are keyed by `first_file_index - 1`; a directory whose
    /// first file index is zero has no synthetic index and always resolves
    /// through the fallback path.
    pub fn synthetic_index(&self) -> Option<u32> {
        u32::from(self.first_file_index).checked_sub(1)
    }
}

/// ARC0 file record
///
/// A 16-byte entry describing one file. The record's position in the file
/// table is its global file index; nothing else identifies it.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct Arc0FileRecord {
    /// Name offset relative to the owning directory's name base
    pub name_offset_in_folder: i32,

    /// Payload offset relative to the start of the data region
    pub file_offset: i32,

    /// Payload size in bytes
    #[brw(pad_after = 4)]
    pub file_size: i32,
}

impl Arc0FileRecord {
    /// Encoded size of one record, including padding.
    pub const SIZE: u64 = 16;
}

/// ARC0 name-hash record
///
/// A 12-byte entry in the optional name-hash table. The table is scanned
/// sequentially and terminated by an all-zero record.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct HashRecord {
    /// Hash of the entry's name
    pub hash: u32,

    /// Offset of the entry's name within the name blob
    pub name_offset: u32,

    /// Synthetic index this entry resolves
    pub index: u32,
}

impl HashRecord {
    /// Encoded size of one record.
    pub const SIZE: u64 = 12;

    /// Whether this record is the all-zero table terminator.
    pub fn is_sentinel(&self) -> bool {
        self.hash == 0 && self.name_offset == 0 && self.index == 0
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::types::{Arc0DirectoryRecord, Arc0FileRecord, Arc0Header};

    fn header_bytes() -> Vec<u8> {
        #[rustfmt::skip]
        let mut input = vec![
            // Uninterpreted leading region
            0x41, 0x52, 0x43, 0x30, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            // Table offsets
            0x40, 0x00, 0x00, 0x00,
            0x50, 0x00, 0x00, 0x00,
            0x68, 0x00, 0x00, 0x00,
            0x88, 0x00, 0x00, 0x00,
            0x98, 0x00, 0x00, 0x00,
        ];
        input.resize(0x38, 0x00);
        // Directory count
        input.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        // File count
        input.extend_from_slice(&[0x02, 0x00, 0x00, 0x00]);
        input
    }

    #[test]
    fn read_header() {
        let expected = Arc0Header {
            directory_entries_offset: 0x40,
            directory_hash_offset: 0x50,
            file_entries_offset: 0x68,
            name_offset: 0x88,
            data_offset: 0x98,
            directory_entries_count: 1,
            file_entries_count: 2,
        };

        let header = Arc0Header::read(&mut Cursor::new(header_bytes())).unwrap();
        assert_eq!(header, expected);
    }

    #[test]
    fn validate_accepts_consistent_header() {
        let header = Arc0Header::read(&mut Cursor::new(header_bytes())).unwrap();
        assert!(header.validate(0xA0).is_ok());
    }

    #[test]
    fn validate_rejects_data_region_beyond_source() {
        let header = Arc0Header::read(&mut Cursor::new(header_bytes())).unwrap();
        assert!(matches!(
            header.validate(0x90),
            Err(Error::MalformedContainer(_))
        ));
    }

    #[test]
    fn validate_rejects_name_offset_beyond_data_offset() {
        let mut header = Arc0Header::read(&mut Cursor::new(header_bytes())).unwrap();
        header.name_offset = header.data_offset + 1;
        assert!(matches!(
            header.validate(0x1000),
            Err(Error::MalformedContainer(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_offset() {
        let mut header = Arc0Header::read(&mut Cursor::new(header_bytes())).unwrap();
        header.directory_hash_offset = -4;
        assert!(matches!(
            header.validate(0x1000),
            Err(Error::MalformedContainer(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_count() {
        let mut header = Arc0Header::read(&mut Cursor::new(header_bytes())).unwrap();
        header.file_entries_count = -1;
        assert!(matches!(
            header.validate(0x1000),
            Err(Error::MalformedContainer(_))
        ));
    }

    #[test]
    fn read_directory_record() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x04, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x03, 0x00,
            0x07, 0x00,
            0xAA, 0xBB, 0xCC, 0xDD,
        ]);

        let expected = Arc0DirectoryRecord {
            directory_name_offset: 4,
            file_name_base_offset: 16,
            file_count: 3,
            first_file_index: 7,
        };

        let record = Arc0DirectoryRecord::read(&mut input).unwrap();
        assert_eq!(record, expected);
        // Padding is consumed so consecutive records stay 16 bytes apart.
        assert_eq!(input.position(), Arc0DirectoryRecord::SIZE);
    }

    #[test]
    fn read_file_record() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x0D, 0x00, 0x00, 0x00,
            0x20, 0x01, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let expected = Arc0FileRecord {
            name_offset_in_folder: 13,
            file_offset: 0x120,
            file_size: 0x40,
        };

        let record = Arc0FileRecord::read(&mut input).unwrap();
        assert_eq!(record, expected);
        assert_eq!(input.position(), Arc0FileRecord::SIZE);
    }

    #[test]
    fn directory_synthetic_index() {
        let mut record = Arc0DirectoryRecord {
            first_file_index: 5,
            ..Default::default()
        };
        assert_eq!(record.synthetic_index(), Some(4));

        record.first_file_index = 0;
        assert_eq!(record.synthetic_index(), None);
    }
}
