//! EntropySource trait for seed and key material.
//!
//! Defines the interface for the secure random sources used to initialize
//! a [`CollatzEngine`](crate::random::collatz::CollatzEngine). The engine
//! draws a 256-bit seed followed by a 32-byte HMAC key, once, at
//! construction.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{CollatzError, Result};

/// Trait for secure random sources used to initialize the recurrence.
///
/// Implementations fill a buffer with unpredictable bytes or report that
/// the source is unavailable. A source that blocks until it has enough
/// entropy is acceptable; failing is fatal to the run and is never retried.
pub trait EntropySource {
    /// Fills `dest` entirely with random bytes.
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating-system CSPRNG (`getrandom` behind [`OsRng`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CollatzError::EntropyUnavailable(e.to_string()))
    }
}

/// Adapts any cryptographically secure [`RngCore`] into an [`EntropySource`].
///
/// Mostly useful for reproducible runs: wrap a seeded `StdRng` and the
/// engine it initializes will produce the same trajectory every time.
#[derive(Debug, Clone)]
pub struct RngEntropy<R>(pub R);

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| CollatzError::EntropyUnavailable(e.to_string()))
    }
}
