//! Decoding of LZ10 streams
//!

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use tracing::instrument;

use crate::error::{Error, Result};

/// Decompress an LZ10 stream into the original bytes.
///
/// The input must start with the `0x10` signature byte and the 24-bit
/// little-endian decompressed size; anything else is an
/// [`Error::InvalidStream`]. The output buffer is sized to exactly the
/// declared size. Decoding stops once that many bytes have been produced or
/// the input runs out, whichever comes first; a truncated input is not an
/// error and leaves the tail of the buffer zeroed.
#[instrument(skip(input), fields(size = input.len()))]
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Cursor::new(input);

    match reader.read_u8() {
        Ok(crate::SIGNATURE) => {}
        _ => return Err(Error::InvalidStream),
    }
    let size = reader
        .read_u24::<LittleEndian>()
        .map_err(|_| Error::InvalidStream)? as usize;

    let mut output = vec![0u8; size];
    let mut out_pos = 0;

    'stream: while out_pos < size {
        let flags = match reader.read_u8() {
            Ok(flags) => flags,
            Err(_) => break,
        };

        // Flag bits are consumed most-significant first. Bits left over once
        // the declared size is reached are simply never consumed.
        for bit in 0..8 {
            if out_pos >= size {
                break 'stream;
            }

            if flags & (0x80 >> bit) == 0 {
                match reader.read_u8() {
                    Ok(byte) => {
                        output[out_pos] = byte;
                        out_pos += 1;
                    }
                    Err(_) => break 'stream,
                }
            } else {
                let (b1, b2) = match (reader.read_u8(), reader.read_u8()) {
                    (Ok(b1), Ok(b2)) => (b1, b2),
                    _ => break 'stream,
                };

                let displacement = ((usize::from(b1 & 0xF) << 8) | usize::from(b2)) + 1;
                let length = usize::from(b1 >> 4) + 3;

                if displacement > out_pos {
                    return Err(Error::InvalidBackReference {
                        displacement,
                        offset: out_pos,
                    });
                }

                // Copied one byte at a time: the source range may trail into
                // bytes this same copy has just written.
                for _ in 0..length {
                    if out_pos >= size {
                        break;
                    }
                    output[out_pos] = output[out_pos - displacement];
                    out_pos += 1;
                }
            }
        }
    }

    Ok(output)
}
