//! BalancedCollatz: exactly balanced bit sequence generator.
//!
//! Owns one [`CollatzEngine`] and drives it through a [`BalanceFilter`]
//! until the requested number of bits has been accepted. The engine is
//! created once; successive generations continue the same trajectory.

use num_bigint::BigUint;
use tracing::debug;
use zeroize::Zeroizing;

use crate::balance::{BalanceFilter, FilterStats};
use crate::config::validate_length;
use crate::error::{CollatzError, Result};
use crate::random::collatz::CollatzEngine;
use crate::random::entropy::EntropySource;
use crate::random::step_constant::KEY_LEN;
use crate::sequence::BitSequence;

/// Generator of exactly balanced pseudorandom bit sequences.
///
/// # Examples
///
/// ```
/// use balanced_collatz::BalancedCollatz;
///
/// let mut generator = BalancedCollatz::new().unwrap();
/// let bits = generator.generate(16).unwrap();
/// assert_eq!(bits.len(), 16);
/// assert_eq!(bits.zeros(), 8);
/// assert_eq!(bits.ones(), 8);
/// ```
///
/// Odd lengths are rejected before any bit is produced:
///
/// ```
/// use balanced_collatz::{BalancedCollatz, CollatzError};
///
/// let mut generator = BalancedCollatz::new().unwrap();
/// assert_eq!(generator.generate(127), Err(CollatzError::InvalidLength(127)));
/// ```
#[derive(Debug)]
pub struct BalancedCollatz {
    engine: CollatzEngine,
}

impl BalancedCollatz {
    /// Creates a generator seeded and keyed from the OS CSPRNG.
    ///
    /// # Errors
    /// Returns [`CollatzError::EntropyUnavailable`](crate::CollatzError::EntropyUnavailable)
    /// if the OS source fails.
    pub fn new() -> Result<Self> {
        Ok(Self::with_engine(CollatzEngine::from_os_entropy()?))
    }

    /// Creates a generator from an arbitrary entropy source.
    ///
    /// # Errors
    /// See [`CollatzEngine::from_entropy`].
    pub fn from_entropy(source: &mut dyn EntropySource) -> Result<Self> {
        Ok(Self::with_engine(CollatzEngine::from_entropy(source)?))
    }

    /// Creates a generator from a fixed seed and key.
    ///
    /// # Errors
    /// See [`CollatzEngine::from_parts`].
    pub fn from_parts(seed: BigUint, key: &[u8; KEY_LEN]) -> Result<Self> {
        Ok(Self::with_engine(CollatzEngine::from_parts(seed, key)?))
    }

    /// Creates a generator from a hex-encoded seed and key.
    ///
    /// The seed is read as a big-endian integer of any width; the key must
    /// decode to exactly 32 bytes. Decoded key bytes are wiped after setup.
    ///
    /// # Parameters
    /// - `seed_hex`: big-endian seed digits, e.g. `"1b"` for 27.
    /// - `key_hex`: 64 hex digits.
    ///
    /// # Errors
    /// - [`CollatzError::InvalidHex`] if either string is not valid hex.
    /// - [`CollatzError::InvalidKeyLength`] if the key is not 32 bytes.
    /// - [`CollatzError::DegenerateSeed`] if the seed is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collatz::BalancedCollatz;
    ///
    /// let key = "42".repeat(32);
    /// let mut generator = BalancedCollatz::from_hex_parts("1b", &key).unwrap();
    /// assert_eq!(generator.generate(16).unwrap().to_string(), "0101101001010011");
    /// ```
    pub fn from_hex_parts(seed_hex: &str, key_hex: &str) -> Result<Self> {
        let seed_bytes = Zeroizing::new(decode_hex(seed_hex)?);
        let key_bytes = Zeroizing::new(decode_hex(key_hex)?);
        let key = <&[u8; KEY_LEN]>::try_from(&key_bytes[..])
            .map_err(|_| CollatzError::InvalidKeyLength(key_bytes.len()))?;
        Self::from_parts(BigUint::from_bytes_be(&seed_bytes), key)
    }

    /// Wraps an existing engine.
    pub fn with_engine(engine: CollatzEngine) -> Self {
        BalancedCollatz { engine }
    }

    /// Generates `length` bits holding exactly `length / 2` of each symbol.
    ///
    /// # Errors
    /// Returns [`CollatzError::InvalidLength`](crate::CollatzError::InvalidLength)
    /// if `length` is zero or odd. No engine step is taken in that case.
    pub fn generate(&mut self, length: usize) -> Result<BitSequence> {
        self.generate_with_stats(length).map(|(bits, _)| bits)
    }

    /// Like [`generate`](Self::generate), also returning the filter's
    /// acceptance and discard counters.
    ///
    /// # Errors
    /// Same as [`generate`](Self::generate).
    pub fn generate_with_stats(&mut self, length: usize) -> Result<(BitSequence, FilterStats)> {
        let length = validate_length(length)?;
        let mut filter = BalanceFilter::new(&mut self.engine, length / 2);
        let bits: BitSequence = filter.by_ref().collect();
        let stats = filter.stats();
        debug!(
            length,
            discarded = stats.discarded,
            candidates = stats.candidates,
            state_bits = self.engine.state_bits(),
            "balanced sequence generated"
        );
        Ok((bits, stats))
    }

    /// The underlying engine.
    pub fn engine(&self) -> &CollatzEngine {
        &self.engine
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| CollatzError::InvalidHex(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::entropy::RngEntropy;
    use crate::sequence::Bit;
    use crate::stats::{FrequencyTest, RandomnessTest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> BalancedCollatz {
        BalancedCollatz::from_entropy(&mut RngEntropy(StdRng::seed_from_u64(seed))).unwrap()
    }

    #[test]
    fn test_generate_is_balanced() {
        let mut generator = seeded(1);
        for length in [2, 8, 64, 128, 1000] {
            let bits = generator.generate(length).unwrap();
            assert_eq!(bits.len(), length);
            assert_eq!(bits.zeros(), length / 2);
            assert_eq!(bits.ones(), length / 2);
        }
    }

    #[test]
    fn test_odd_length_takes_no_step() {
        let mut generator = seeded(2);
        assert_eq!(
            generator.generate(127),
            Err(CollatzError::InvalidLength(127))
        );
        assert_eq!(generator.engine().steps(), 0);
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut generator = seeded(3);
        assert_eq!(generator.generate(0), Err(CollatzError::InvalidLength(0)));
    }

    #[test]
    fn test_stats_account_for_every_step() {
        let mut generator = seeded(4);
        let (bits, stats) = generator.generate_with_stats(256).unwrap();
        assert_eq!(stats.accepted(), bits.len());
        assert_eq!(stats.candidates, stats.accepted() as u64 + stats.discarded);
        assert_eq!(generator.engine().steps(), stats.candidates);
    }

    #[test]
    fn test_same_entropy_same_output() {
        let a = seeded(5).generate(512).unwrap();
        let b = seeded(5).generate(512).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_successive_generations_continue_trajectory() {
        let mut generator = seeded(6);
        let first = generator.generate(64).unwrap();
        let second = generator.generate(64).unwrap();
        assert_ne!(first, second);
        assert!(second.is_balanced());
    }

    #[test]
    fn test_chi_square_is_zero() {
        let mut generator = seeded(7);
        let bits = generator.generate(128).unwrap();
        let outcome = FrequencyTest::default().evaluate(&bits).unwrap();
        assert_eq!(outcome.statistic, 0.0);
        assert!(outcome.passed);
    }

    #[test]
    fn test_two_bit_output_is_one_of_each() {
        let mut generator = seeded(8);
        let bits = generator.generate(2).unwrap();
        assert!(bits.as_slice().contains(&Bit::Zero));
        assert!(bits.as_slice().contains(&Bit::One));
    }

    #[test]
    fn test_hex_parts_match_binary_parts() {
        let key_hex = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
        let mut key = [0u8; KEY_LEN];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut from_hex = BalancedCollatz::from_hex_parts("0123456789abcdef", key_hex).unwrap();
        let mut from_parts =
            BalancedCollatz::from_parts(BigUint::from(0x0123_4567_89ab_cdefu64), &key).unwrap();
        assert_eq!(
            from_hex.generate(64).unwrap(),
            from_parts.generate(64).unwrap()
        );
    }

    #[test]
    fn test_hex_parts_wrong_key_width() {
        let result = BalancedCollatz::from_hex_parts("1b", &"42".repeat(16));
        assert_eq!(result.err(), Some(CollatzError::InvalidKeyLength(16)));
    }

    #[test]
    fn test_hex_parts_zero_seed() {
        let result = BalancedCollatz::from_hex_parts("0000", &"42".repeat(32));
        assert_eq!(result.err(), Some(CollatzError::DegenerateSeed));
    }

    #[test]
    fn test_hex_parts_bad_digits() {
        let result = BalancedCollatz::from_hex_parts("xyz", &"42".repeat(32));
        assert!(matches!(result, Err(CollatzError::InvalidHex(_))));
        let result = BalancedCollatz::from_hex_parts("1b", "abc");
        assert!(matches!(result, Err(CollatzError::InvalidHex(_))));
    }
}
