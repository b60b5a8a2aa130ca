//! Statistical randomness checks over finished bit sequences.
//!
//! These are sanity checks, not proofs of unpredictability. Both tests
//! treat the sequence as fixed input and never touch the generator.

pub mod frequency;
pub mod runs;

use crate::error::Result;
use crate::sequence::BitSequence;

pub use frequency::{FrequencyReport, FrequencyTest};
pub use runs::{RunsReport, RunsTest};

/// Verdict of one randomness test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// Short test name.
    pub name: &'static str,
    /// The test statistic (chi-square or Z-score).
    pub statistic: f64,
    /// Whether the statistic fell inside the acceptance region.
    pub passed: bool,
}

/// Trait for randomness tests consuming a bit sequence.
pub trait RandomnessTest {
    /// Short test name.
    fn name(&self) -> &'static str;

    /// Evaluates the test on `bits`.
    ///
    /// # Errors
    /// Returns [`CollatzError::InsufficientData`](crate::CollatzError::InsufficientData)
    /// when the statistic is undefined for `bits`.
    fn evaluate(&self, bits: &BitSequence) -> Result<TestOutcome>;
}
