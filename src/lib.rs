//! Exactly balanced pseudorandom bit sequences.
//!
//! Generates a fixed-length bit sequence holding exactly as many zeros as
//! ones while looking uniformly random to standard tests. Bits come from
//! the parity of a keyed Collatz-like recurrence over an unbounded integer,
//! and a rejection-sampling filter enforces the 50/50 split.
//!
//! This is not a key-generation primitive: the output is deliberately
//! non-uniform (balanced), and no claim of cryptographic security is made.
//!
//! # Architecture
//!
//! ```text
//! EntropySource  (256-bit seed + 32-byte key, drawn once)
//!     ↓
//! CollatzEngine  (n even: n/2 → bit 1 | n odd: 3n + HMAC(key, n) → bit 0)
//!     ↓ candidate bits, state advances on every pull
//! BalanceFilter  (accepts while the symbol's L/2 quota is unmet)
//!     ↓
//! BitSequence    (exactly L/2 zeros and L/2 ones)
//! ```
//!
//! # Examples
//!
//! ```
//! use balanced_collatz::BalancedCollatz;
//!
//! let mut generator = BalancedCollatz::new().unwrap();
//! let bits = generator.generate(128).unwrap();
//! assert_eq!(bits.zeros(), 64);
//! assert_eq!(bits.ones(), 64);
//! println!("{}", bits);
//! ```
//!
//! Reproducible output from fixed material:
//!
//! ```
//! use balanced_collatz::BalancedCollatz;
//! use num_bigint::BigUint;
//!
//! let key = [7u8; 32];
//! let mut a = BalancedCollatz::from_parts(BigUint::from(12345u32), &key).unwrap();
//! let mut b = BalancedCollatz::from_parts(BigUint::from(12345u32), &key).unwrap();
//! assert_eq!(a.generate(64).unwrap(), b.generate(64).unwrap());
//! ```

#![deny(clippy::all)]

pub mod balance;
pub mod config;
pub mod error;
pub mod random;
pub mod sequence;
pub mod stats;
pub mod utils;

mod generator;

pub use balance::{BalanceFilter, FilterStats};
pub use config::GeneratorConfig;
pub use error::{CollatzError, Result};
pub use generator::BalancedCollatz;
pub use random::collatz::CollatzEngine;
pub use random::entropy::{EntropySource, OsEntropy, RngEntropy};
pub use sequence::{Bit, BitSequence};
