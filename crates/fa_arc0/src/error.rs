//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// structural inconsistency that aborts the whole parse
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// the name blob carries the LZ10 signature but does not decode
    #[error("corrupt name table")]
    CorruptNameTable(#[from] fa_lz10::error::Error),

    /// extraction was requested for an index outside the file table
    #[error("file index {index} out of range (archive has {count} files)")]
    IndexOutOfRange {
        /// Requested global file index
        index: usize,
        /// Number of file records in the archive
        count: usize,
    },

    /// no tree node matches the requested path
    #[error("no entry matches path {0:?}")]
    FileNotFound(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
