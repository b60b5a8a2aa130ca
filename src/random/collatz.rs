//! Keyed Collatz-like recurrence producing candidate bits.
//!
//! The state is an unbounded non-negative integer `n`. Each step emits the
//! parity of `n` as a candidate bit (`1` when even, `0` when odd) and then
//! advances the state:
//!
//! ```text
//! n even:  n <- n / 2
//! n odd:   n <- 3n + k,   k = HMAC-SHA256(key, be_bytes(n))
//! ```
//!
//! The state advances on every call, whether or not a consumer keeps the
//! candidate. The trajectory is a pure function of the seed and key.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use super::entropy::{EntropySource, OsEntropy};
use super::step_constant::{StepConstant, KEY_LEN};
use crate::error::{CollatzError, Result};
use crate::sequence::Bit;

/// Seed width in bytes (256 bits).
pub const SEED_LEN: usize = 32;

/// Maximum number of seed draws before giving up on a source that only
/// yields zero.
const MAX_SEED_DRAWS: usize = 4;

/// Recurrence engine owning the evolving state and the keyed step constant.
///
/// Construct one per run with [`from_os_entropy`](Self::from_os_entropy) or
/// [`from_entropy`](Self::from_entropy), or with fixed material via
/// [`from_parts`](Self::from_parts) for reproducible trajectories.
///
/// The engine is also an infinite [`Iterator`] over candidate bits.
pub struct CollatzEngine {
    state: BigUint,
    step_constant: StepConstant,
    steps: u64,
}

impl CollatzEngine {
    /// Creates an engine seeded from the operating system CSPRNG.
    ///
    /// # Errors
    /// Returns [`CollatzError::EntropyUnavailable`] if the OS source fails.
    pub fn from_os_entropy() -> Result<Self> {
        Self::from_entropy(&mut OsEntropy)
    }

    /// Creates an engine from an arbitrary entropy source.
    ///
    /// Draws a 256-bit seed first, then the 32-byte key. A zero seed is a
    /// fixed point of the recurrence and is redrawn.
    ///
    /// # Errors
    /// - [`CollatzError::EntropyUnavailable`] if the source fails.
    /// - [`CollatzError::DegenerateSeed`] if every draw produced zero.
    pub fn from_entropy(source: &mut dyn EntropySource) -> Result<Self> {
        let seed = draw_seed(source)?;

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        source.fill(&mut key[..])?;

        Self::from_parts(seed, &key)
    }

    /// Creates an engine from an explicit seed and key.
    ///
    /// Two engines built from the same parts follow the same trajectory.
    ///
    /// # Errors
    /// - [`CollatzError::DegenerateSeed`] if `seed` is zero.
    /// - [`CollatzError::KeySetup`] if the HMAC key cannot be installed.
    pub fn from_parts(seed: BigUint, key: &[u8; KEY_LEN]) -> Result<Self> {
        if seed.is_zero() {
            return Err(CollatzError::DegenerateSeed);
        }
        let step_constant = StepConstant::new(key)?;
        debug!(seed_bits = seed.bits(), "collatz engine initialized");
        Ok(CollatzEngine {
            state: seed,
            step_constant,
            steps: 0,
        })
    }

    /// Emits the candidate bit for the current state and advances it.
    pub fn next_candidate(&mut self) -> Bit {
        let bit = Bit::from_parity(&self.state);
        if self.state.is_even() {
            self.state >>= 1u32;
        } else {
            let k = self.step_constant.derive(&self.state);
            self.state = &self.state * 3u32 + k;
        }
        self.steps += 1;
        bit
    }

    /// Number of state transitions performed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Current bit length of the state.
    ///
    /// Exposes magnitude only; the state value itself stays private.
    pub fn state_bits(&self) -> u64 {
        self.state.bits()
    }
}

/// Reads a 256-bit big-endian seed, redrawing while it is zero.
fn draw_seed(source: &mut dyn EntropySource) -> Result<BigUint> {
    let mut bytes = Zeroizing::new([0u8; SEED_LEN]);
    for attempt in 1..=MAX_SEED_DRAWS {
        source.fill(&mut bytes[..])?;
        let seed = BigUint::from_bytes_be(&bytes[..]);
        if !seed.is_zero() {
            return Ok(seed);
        }
        warn!(attempt, "entropy source produced a zero seed, redrawing");
    }
    Err(CollatzError::DegenerateSeed)
}

impl Iterator for CollatzEngine {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        Some(self.next_candidate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl std::fmt::Debug for CollatzEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollatzEngine")
            .field("state_bits", &self.state.bits())
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl Zeroize for CollatzEngine {
    /// Overwrites the state limbs in place and resets the step counter.
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.steps.zeroize();
    }
}

impl Drop for CollatzEngine {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Num;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sequential_key() -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        key
    }

    fn reference_seed() -> BigUint {
        BigUint::from_str_radix(&"0123456789abcdef".repeat(4), 16).unwrap()
    }

    fn render(bits: impl Iterator<Item = Bit>) -> String {
        bits.map(|b| b.as_char()).collect()
    }

    /// Source that always returns the same byte.
    struct ConstantSource(u8);

    impl EntropySource for ConstantSource {
        fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    /// Source that is never available.
    struct BrokenSource;

    impl EntropySource for BrokenSource {
        fn fill(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(CollatzError::EntropyUnavailable("unplugged".to_string()))
        }
    }

    #[test]
    fn test_even_state_emits_one_and_halves() {
        let mut engine = CollatzEngine::from_parts(BigUint::from(6u32), &sequential_key()).unwrap();
        assert_eq!(engine.next_candidate(), Bit::One);
        assert_eq!(engine.state, BigUint::from(3u32));
    }

    #[test]
    fn test_odd_state_emits_zero_and_adds_keyed_constant() {
        let mut engine = CollatzEngine::from_parts(BigUint::from(3u32), &sequential_key()).unwrap();
        assert_eq!(engine.next_candidate(), Bit::Zero);
        let expected = BigUint::from_str_radix(
            "2a24d008789d3c74daf5e02636c675df8f09ec5e740c1bdf6305f9261f7b1c3b",
            16,
        )
        .unwrap();
        assert_eq!(engine.state, expected);
    }

    #[test]
    fn test_reference_candidate_stream() {
        let mut engine = CollatzEngine::from_parts(reference_seed(), &sequential_key()).unwrap();
        let stream = render(engine.by_ref().take(24));
        assert_eq!(stream, "001110100011011011101010");
        assert_eq!(engine.steps(), 24);
    }

    #[test]
    fn test_small_seed_candidate_stream() {
        let engine = CollatzEngine::from_parts(BigUint::from(27u32), &[0x42; KEY_LEN]).unwrap();
        assert_eq!(render(engine.take(12)), "010110100101");
    }

    #[test]
    fn test_deterministic_output() {
        let mut e1 = CollatzEngine::from_parts(reference_seed(), &sequential_key()).unwrap();
        let mut e2 = CollatzEngine::from_parts(reference_seed(), &sequential_key()).unwrap();
        for _ in 0..500 {
            assert_eq!(e1.next_candidate(), e2.next_candidate());
        }
    }

    #[test]
    fn test_different_keys_diverge() {
        let e1 = CollatzEngine::from_parts(reference_seed(), &sequential_key()).unwrap();
        let e2 = CollatzEngine::from_parts(reference_seed(), &[0x42; KEY_LEN]).unwrap();
        let a: Vec<Bit> = e1.take(256).collect();
        let b: Vec<Bit> = e2.take(256).collect();
        assert_ne!(a, b, "different keys should produce different trajectories");
    }

    #[test]
    fn test_zero_seed_rejected() {
        let result = CollatzEngine::from_parts(BigUint::zero(), &sequential_key());
        assert_eq!(result.err(), Some(CollatzError::DegenerateSeed));
    }

    #[test]
    fn test_zero_only_source_is_degenerate() {
        let result = CollatzEngine::from_entropy(&mut ConstantSource(0));
        assert_eq!(result.err(), Some(CollatzError::DegenerateSeed));
    }

    #[test]
    fn test_broken_source_is_fatal() {
        let result = CollatzEngine::from_entropy(&mut BrokenSource);
        assert!(matches!(
            result.err(),
            Some(CollatzError::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn test_entropy_seed_is_256_bits_wide() {
        let engine = CollatzEngine::from_entropy(&mut ConstantSource(0xFF)).unwrap();
        assert_eq!(engine.state_bits(), 256);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut src1 = crate::random::entropy::RngEntropy(StdRng::seed_from_u64(99));
        let mut src2 = crate::random::entropy::RngEntropy(StdRng::seed_from_u64(99));
        let e1 = CollatzEngine::from_entropy(&mut src1).unwrap();
        let e2 = CollatzEngine::from_entropy(&mut src2).unwrap();
        assert_eq!(render(e1.take(200)), render(e2.take(200)));
    }

    #[test]
    fn test_both_parities_reachable() {
        let engine = CollatzEngine::from_parts(reference_seed(), &sequential_key()).unwrap();
        let bits: Vec<Bit> = engine.take(1000).collect();
        assert!(bits.contains(&Bit::Zero));
        assert!(bits.contains(&Bit::One));
    }

    #[test]
    fn test_debug_hides_state_value() {
        let engine = CollatzEngine::from_parts(BigUint::from(123456789u64), &sequential_key()).unwrap();
        let shown = format!("{:?}", engine);
        assert!(!shown.contains("123456789"));
        assert!(shown.contains("state_bits"));
    }

    #[test]
    fn test_zeroize_wipes_state_and_steps() {
        let mut engine = CollatzEngine::from_parts(reference_seed(), &sequential_key()).unwrap();
        for _ in 0..40 {
            engine.next_candidate();
        }
        assert!(engine.state_bits() > 0);
        engine.zeroize();
        assert_eq!(engine.state_bits(), 0);
        assert_eq!(engine.steps(), 0);
    }
}
