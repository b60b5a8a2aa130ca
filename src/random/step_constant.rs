//! Keyed derivation of the additive step constant `k`.
//!
//! When the state `n` is odd the recurrence moves to `3n + k`, where
//! `k = HMAC-SHA256(key, be_bytes(n))` read as a 256-bit big-endian
//! unsigned integer. `be_bytes(n)` is the minimal big-endian encoding of
//! `n`, and zero encodes as the single byte `0x00`.

use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use sha2::Sha256;

use crate::error::{CollatzError, Result};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Pseudorandom function deriving `k` from the current state.
///
/// The key is absorbed once at construction; every derivation clones the
/// prepared MAC, so the raw key bytes never need to be retained.
#[derive(Clone)]
pub struct StepConstant {
    mac: HmacSha256,
}

impl StepConstant {
    /// Installs `key` as the HMAC key.
    ///
    /// # Errors
    /// Returns [`CollatzError::KeySetup`] if the MAC rejects the key.
    pub fn new(key: &[u8; KEY_LEN]) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(key).map_err(|_| CollatzError::KeySetup)?;
        Ok(StepConstant { mac })
    }

    /// Raw 32-byte HMAC tag over the big-endian encoding of `n`.
    pub fn tag(&self, n: &BigUint) -> [u8; 32] {
        let mut mac = self.mac.clone();
        mac.update(&n.to_bytes_be());
        let mut out = [0u8; 32];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    /// Derives `k` for state `n`.
    pub fn derive(&self, n: &BigUint) -> BigUint {
        BigUint::from_bytes_be(&self.tag(n))
    }
}

impl std::fmt::Debug for StepConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepConstant").finish_non_exhaustive()
    }
}
