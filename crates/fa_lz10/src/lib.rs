//! This library handles compressing and decompressing **LZ10** streams as used by *Level-5*
//! game archives.
//!
//! # LZ10 Stream Documentation
//!
//! LZ10 is a byte-oriented, sliding-window, back-reference compression scheme. A stream
//! consists of a 4-byte header followed by groups of up to 8 encoded units, each group
//! preceded by a flag byte.
//!
//! ## Stream Structure
//!
//! | Offset (bytes) | Field              | Description                                      |
//! |----------------|--------------------|--------------------------------------------------|
//! | 0x0000         | Signature          | 1 byte: fixed value 0x10                         |
//! | 0x0001         | Decompressed Size  | 3 bytes: little-endian size of the original data |
//! | 0x0004         | Body               | Flag bytes and encoded units until the size is reached |
//!
//! ### Body
//!
//! The body is a sequence of groups. Each group starts with one flag byte whose bits are
//! consumed most-significant first, one bit per encoded unit:
//!
//! - **Bit clear**: the unit is a single literal byte, copied to the output as-is.
//! - **Bit set**: the unit is a two-byte back-reference `b1 b2`:
//!   - displacement = `((b1 & 0xF) << 8 | b2) + 1`, counted backwards from the output cursor
//!   - length = `(b1 >> 4) + 3`
//!
//!   The referenced `length` bytes are copied from the already-produced output, one byte at
//!   a time. The source range may overlap the destination; a displacement of 1 with a long
//!   length repeats the most recent byte, which is how runs are encoded.
//!
//! Decoding stops as soon as the decompressed size has been produced. Flag bits left over
//! in the final group are not consumed.
//!
//! ## Limits
//!
//! - Displacement: 1 to 4096 (12-bit field, +1 bias)
//! - Match length: 3 to 18 (4-bit field, +3 bias)
//! - Decompressed size: at most 0xFFFFFF bytes (24-bit size field)
//!

pub mod compress;
pub mod decompress;
pub mod error;

pub use compress::compress;
pub use decompress::decompress;

/// Signature byte identifying an LZ10 stream.
pub const SIGNATURE: u8 = 0x10;

/// Largest input the 24-bit size field can describe.
pub const MAX_INPUT_SIZE: usize = 0xFF_FFFF;
