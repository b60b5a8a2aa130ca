//! Bit-to-text and bit-to-byte conversion utilities.
//!
//! Bytes are packed most-significant bit first, so the text `"10000000"`
//! packs to `0x80`. A trailing partial byte is padded with zero bits on
//! the right.

use crate::error::{CollatzError, Result};
use crate::sequence::Bit;

/// Packs bits into bytes, most significant bit first.
///
/// # Parameters
/// - `bits`: The bits to pack, in output order.
///
/// # Returns
/// A `Vec<u8>` of `ceil(bits.len() / 8)` bytes.
pub fn bits_to_bytes(bits: &[Bit]) -> Vec<u8> {
    let mut output = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (j, bit) in chunk.iter().enumerate() {
            if *bit == Bit::One {
                byte |= 0x80 >> j;
            }
        }
        output.push(byte);
    }
    output
}

/// Parses a string of `'0'` and `'1'` characters into bits.
///
/// # Errors
/// Returns [`CollatzError::InvalidSymbol`] naming the first character that
/// is not a binary digit.
pub fn parse_bits(text: &str) -> Result<Vec<Bit>> {
    text.chars()
        .enumerate()
        .map(|(position, symbol)| match symbol {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            _ => Err(CollatzError::InvalidSymbol { position, symbol }),
        })
        .collect()
}
