//! Output buffer types: single bits and finished bit sequences.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;

use crate::error::{CollatzError, Result};
use crate::utils::converter;

/// A single output bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    /// The symbol `0`.
    Zero,
    /// The symbol `1`.
    One,
}

impl Bit {
    /// Candidate bit for a recurrence state: `One` when `n` is even,
    /// `Zero` when odd.
    pub fn from_parity(n: &BigUint) -> Self {
        if n.is_even() {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    /// The character `'0'` or `'1'`.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> bool {
        bit == Bit::One
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Bit {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered, finished sequence of bits.
///
/// Sequences produced by [`BalancedCollatz`](crate::BalancedCollatz) always
/// hold exactly as many zeros as ones. Sequences parsed from text carry no
/// such guarantee, which is what lets the statistical tests be fed
/// arbitrary patterns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence {
    bits: Vec<Bit>,
}

impl BitSequence {
    /// Wraps an existing vector of bits.
    pub fn from_bits(bits: Vec<Bit>) -> Self {
        BitSequence { bits }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits in order.
    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bit> {
        self.bits.iter()
    }

    /// Count of `0` bits.
    pub fn zeros(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::Zero).count()
    }

    /// Count of `1` bits.
    pub fn ones(&self) -> usize {
        self.bits.len() - self.zeros()
    }

    /// Returns `true` when the sequence has as many zeros as ones.
    pub fn is_balanced(&self) -> bool {
        self.zeros() == self.ones()
    }

    /// Number of maximal runs of identical consecutive bits.
    ///
    /// An empty sequence has zero runs.
    pub fn runs(&self) -> usize {
        if self.bits.is_empty() {
            return 0;
        }
        1 + self.bits.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Packs the bits into bytes, most significant bit first.
    pub fn to_bytes(&self) -> Vec<u8> {
        converter::bits_to_bytes(&self.bits)
    }

    /// Consumes the sequence, returning the underlying bits.
    pub fn into_bits(self) -> Vec<Bit> {
        self.bits
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.bits.iter().map(|b| b.as_char()).collect();
        f.write_str(&text)
    }
}

impl FromStr for BitSequence {
    type Err = CollatzError;

    fn from_str(s: &str) -> Result<Self> {
        converter::parse_bits(s).map(BitSequence::from_bits)
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        BitSequence {
            bits: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = &'a Bit;
    type IntoIter = std::slice::Iter<'a, Bit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}
