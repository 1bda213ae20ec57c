//! Encoding of LZ10 streams
//!

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::instrument;

use crate::error::{Error, Result};

const MIN_MATCH: usize = 3;
const MAX_MATCH: usize = 18;
const MAX_DISPLACEMENT: usize = 4096;

/// Compress bytes into an LZ10 stream.
///
/// Greedy longest-match encoding: at each position the window is searched for
/// the longest match of 3 to 18 bytes within the last 4096 bytes, and a
/// literal is emitted when none exists. The resulting stream is not minimal,
/// but any conforming decoder restores it byte-for-byte.
///
/// Inputs larger than the 24-bit size field can describe are rejected with
/// [`Error::InputTooLarge`].
#[instrument(skip(input), fields(size = input.len()))]
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() > crate::MAX_INPUT_SIZE {
        return Err(Error::InputTooLarge { size: input.len() });
    }

    let mut output = Vec::with_capacity(4 + input.len() + input.len() / 8 + 1);
    output.write_u8(crate::SIGNATURE)?;
    output.write_u24::<LittleEndian>(input.len() as u32)?;

    let mut pos = 0;
    while pos < input.len() {
        let flag_pos = output.len();
        output.push(0);
        let mut flags = 0u8;

        for bit in 0..8 {
            if pos >= input.len() {
                break;
            }

            let (length, displacement) = longest_match(input, pos);
            if length >= MIN_MATCH {
                flags |= 0x80 >> bit;

                let length_field = (length - MIN_MATCH) as u8;
                let displacement_field = (displacement - 1) as u16;
                output.write_u8((length_field << 4) | (displacement_field >> 8) as u8)?;
                output.write_u8((displacement_field & 0xFF) as u8)?;

                pos += length;
            } else {
                output.write_u8(input[pos])?;
                pos += 1;
            }
        }

        output[flag_pos] = flags;
    }

    Ok(output)
}

/// Longest window match at `pos`, scanned over every displacement. Matches
/// are compared against the input itself, so they may run past their own
/// start, mirroring the overlapping copies the decoder performs.
fn longest_match(input: &[u8], pos: usize) -> (usize, usize) {
    let mut best_length = 0;
    let mut best_displacement = 0;

    for displacement in 1..=pos.min(MAX_DISPLACEMENT) {
        let mut length = 0;
        while length < MAX_MATCH
            && pos + length < input.len()
            && input[pos + length] == input[pos + length - displacement]
        {
            length += 1;
        }

        if length > best_length {
            best_length = length;
            best_displacement = displacement;
        }
    }

    (best_length, best_displacement)
}
