//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// stream does not start with the 0x10 signature byte
    #[error("invalid stream: missing 0x10 signature")]
    InvalidStream,

    /// a back-reference points before the start of the output
    #[error("invalid back-reference: displacement {displacement} at output offset {offset}")]
    InvalidBackReference {
        /// Displacement of the offending back-reference
        displacement: usize,
        /// Output offset at which it was decoded
        offset: usize,
    },

    /// input does not fit in the 24-bit size field
    #[error("input of {size} bytes exceeds the 24-bit size field")]
    InputTooLarge {
        /// Size of the rejected input
        size: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
