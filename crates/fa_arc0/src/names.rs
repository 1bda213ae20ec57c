//! Name blob handling and string resolution
//!

use tracing::{instrument, warn};

use crate::error::Result;

/// The decoded name blob of an archive.
///
/// Offsets handed to [`NameTable::resolve`] come from hash-table entries and
/// may be stale in hand-edited archives, so out-of-range offsets resolve to
/// an empty string rather than failing. Strings are null-terminated
/// Shift-JIS.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    blob: Vec<u8>,
}

impl NameTable {
    /// Build a name table from the raw `[name_offset, data_offset)` bytes.
    ///
    /// A leading `0x10` byte marks an LZ10-compressed blob, which is
    /// decompressed first; a decode failure is a
    /// [`crate::error::Error::CorruptNameTable`]. Any other leading byte is
    /// taken as an uncompressed blob. That path exists for archive variants
    /// whose names were never packed and is reported as a warning, not an
    /// error.
    #[instrument(skip(blob), fields(size = blob.len()))]
    pub fn from_blob(blob: Vec<u8>) -> Result<NameTable> {
        if blob.first() == Some(&fa_lz10::SIGNATURE) {
            let blob = fa_lz10::decompress(&blob)?;
            return Ok(NameTable { blob });
        }

        warn!("name blob has no LZ10 signature, treating it as raw text");
        Ok(NameTable { blob })
    }

    /// An empty table; every lookup resolves to an empty string.
    pub fn empty() -> NameTable {
        NameTable::default()
    }

    /// Size of the decoded blob in bytes.
    pub fn len(&self) -> usize {
        self.blob.len()
    }

    /// Whether the decoded blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }

    /// Decode the null-terminated string starting at `offset`.
    ///
    /// Out-of-range offsets yield an empty string.
    pub fn resolve(&self, offset: u32) -> String {
        let offset = offset as usize;
        if offset >= self.blob.len() {
            return String::new();
        }
        self.decode_from(offset)
    }

    /// Decode the null-terminated string at a possibly-stale signed offset,
    /// clamped into the blob's range first.
    pub fn resolve_clamped(&self, offset: i32) -> String {
        let offset = usize::try_from(offset).unwrap_or(0).min(self.blob.len());
        self.decode_from(offset)
    }

    fn decode_from(&self, offset: usize) -> String {
        let tail = &self.blob[offset..];
        let raw = match tail.iter().position(|&b| b == 0) {
            Some(end) => &tail[..end],
            None => tail,
        };

        let (decoded, _, _) = encoding_rs::SHIFT_JIS.decode(raw);
        decoded.into_owned()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::names::NameTable;

    #[test]
    fn resolve_reads_null_terminated_strings() {
        let table = NameTable::from_blob(b"dir\0file.bin\0".to_vec()).unwrap();
        assert_eq!(table.resolve(0), "dir");
        assert_eq!(table.resolve(4), "file.bin");
    }

    #[test]
    fn resolve_tolerates_missing_terminator() {
        let table = NameTable::from_blob(b"abc\0tail".to_vec()).unwrap();
        assert_eq!(table.resolve(4), "tail");
    }

    #[test]
    fn resolve_out_of_range_is_empty() {
        let table = NameTable::from_blob(b"dir\0".to_vec()).unwrap();
        assert_eq!(table.resolve(100), "");
        assert_eq!(table.resolve(4), "");
    }

    #[test]
    fn resolve_clamped_clamps_into_range() {
        let table = NameTable::from_blob(b"dir\0file.bin\0".to_vec()).unwrap();
        assert_eq!(table.resolve_clamped(-20), "dir");
        assert_eq!(table.resolve_clamped(1000), "");
        assert_eq!(table.resolve_clamped(4), "file.bin");
    }

    #[test]
    fn decodes_shift_jis_names() {
        // "チャラ.bin" in Shift-JIS
        let blob = vec![
            0x83, 0x60, 0x83, 0x83, 0x83, 0x89, 0x2E, 0x62, 0x69, 0x6E, 0x00,
        ];
        let table = NameTable::from_blob(blob).unwrap();
        assert_eq!(table.resolve(0), "チャラ.bin");
    }

    #[test]
    fn compressed_blob_is_decompressed() {
        let compressed = fa_lz10::compress(b"dir\0file.bin\0").unwrap();
        let table = NameTable::from_blob(compressed).unwrap();
        assert_eq!(table.resolve(0), "dir");
        assert_eq!(table.resolve(4), "file.bin");
    }

    #[test]
    fn corrupt_compressed_blob_is_an_error() {
        // Carries the signature but the first unit is a back-reference with
        // nothing to reference.
        let blob = vec![0x10, 0x03, 0x00, 0x00, 0x80, 0x00, 0x05];
        assert!(NameTable::from_blob(blob).is_err());
    }

    #[traced_test]
    #[test]
    fn raw_blob_is_accepted_with_a_warning() {
        let table = NameTable::from_blob(b"dir\0".to_vec()).unwrap();
        assert_eq!(table.resolve(0), "dir");
        assert!(logs_contain("no LZ10 signature"));
    }

    #[test]
    fn empty_table_resolves_nothing() {
        let table = NameTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.resolve(0), "");
        assert_eq!(table.resolve_clamped(0), "");
    }
}
