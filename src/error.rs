//! Error types for the balanced-collatz library.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollatzError>;

/// Errors produced by the balanced-collatz library.
///
/// Only initialization and the statistical collaborators can fail. Once an
/// engine exists, generation is a pure computation and never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollatzError {
    /// Target length is zero or odd.
    #[error("Length must be a positive even number, got {0}")]
    InvalidLength(usize),
    /// The secure random source could not supply seed or key material.
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),
    /// The seed is zero, a fixed point of the recurrence.
    #[error("Seed must be non-zero")]
    DegenerateSeed,
    /// The HMAC key could not be installed.
    #[error("HMAC key setup failed")]
    KeySetup,
    /// Supplied key material has the wrong width.
    #[error("Key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),
    /// Supplied seed or key text is not valid hexadecimal.
    #[error("Invalid hex input: {0}")]
    InvalidHex(String),
    /// A bit string contained something other than '0' or '1'.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// Zero-based character position.
        position: usize,
        /// The offending character.
        symbol: char,
    },
    /// A statistical test cannot be evaluated on the given sequence.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    /// A configured test threshold is not a finite positive number.
    #[error("Test thresholds must be finite and positive")]
    InvalidSignificance,
}
