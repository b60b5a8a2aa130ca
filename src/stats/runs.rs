//! Wald–Wolfowitz runs test.
//!
//! Counts maximal runs of identical bits and compares the count with its
//! distribution under independence. With `n0` zeros, `n1` ones and
//! `n = n0 + n1`:
//!
//! ```text
//! mean     = 2*n0*n1 / n + 1
//! variance = 2*n0*n1 * (2*n0*n1 - n) / (n^2 * (n - 1))
//! z        = (runs - mean) / sqrt(variance)
//! ```
//!
//! Too few runs means clustering, too many means alternation; both fail.

use super::{RandomnessTest, TestOutcome};
use crate::config::DEFAULT_RUNS_Z_BOUND;
use crate::error::{CollatzError, Result};
use crate::sequence::BitSequence;

/// Detailed result of the runs test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunsReport {
    /// Observed number of runs.
    pub runs: usize,
    /// Expected number of runs under independence.
    pub expected_runs: f64,
    /// Standardized deviation of the observed count.
    pub z_score: f64,
    /// Whether `|z_score|` is within the bound.
    pub passed: bool,
}

/// Runs test with a symmetric Z-score acceptance range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunsTest {
    z_bound: f64,
}

impl Default for RunsTest {
    fn default() -> Self {
        RunsTest {
            z_bound: DEFAULT_RUNS_Z_BOUND,
        }
    }
}

impl RunsTest {
    /// Creates a test that passes when `-z_bound <= z <= z_bound`.
    pub fn new(z_bound: f64) -> Self {
        RunsTest { z_bound }
    }

    /// Runs the test.
    ///
    /// # Errors
    /// Returns [`CollatzError::InsufficientData`] when the sequence is
    /// shorter than two bits or holds only one symbol, where the variance
    /// is zero.
    pub fn report(&self, bits: &BitSequence) -> Result<RunsReport> {
        let n = bits.len();
        if n < 2 {
            return Err(CollatzError::InsufficientData(
                "runs test needs at least two bits".to_string(),
            ));
        }
        let n0 = bits.zeros() as f64;
        let n1 = bits.ones() as f64;
        let n = n as f64;

        let product = 2.0 * n0 * n1;
        let expected_runs = product / n + 1.0;
        let variance = product * (product - n) / (n * n * (n - 1.0));
        if variance <= 0.0 {
            return Err(CollatzError::InsufficientData(
                "runs test needs both symbols present".to_string(),
            ));
        }

        let runs = bits.runs();
        let z_score = (runs as f64 - expected_runs) / variance.sqrt();
        Ok(RunsReport {
            runs,
            expected_runs,
            z_score,
            passed: z_score.abs() <= self.z_bound,
        })
    }
}

impl RandomnessTest for RunsTest {
    fn name(&self) -> &'static str {
        "runs"
    }

    fn evaluate(&self, bits: &BitSequence) -> Result<TestOutcome> {
        let report = self.report(bits)?;
        Ok(TestOutcome {
            name: self.name(),
            statistic: report.z_score,
            passed: report.passed,
        })
    }
}
