//! Chi-square goodness-of-fit test on symbol frequencies.
//!
//! Compares the observed zero and one counts against the uniform
//! expectation `len / 2` each:
//!
//! ```text
//! chi2 = ((zeros - len/2)^2 + (ones - len/2)^2) / (len/2)
//! ```
//!
//! One degree of freedom. A balanced sequence scores exactly `0.0`.

use super::{RandomnessTest, TestOutcome};
use crate::config::DEFAULT_FREQUENCY_CRITICAL;
use crate::error::{CollatzError, Result};
use crate::sequence::BitSequence;

/// Detailed result of the frequency test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyReport {
    /// Observed zero count.
    pub zeros: usize,
    /// Observed one count.
    pub ones: usize,
    /// The chi-square statistic.
    pub chi_square: f64,
    /// Whether `chi_square` is within the critical value.
    pub passed: bool,
}

/// Frequency (monobit) test with a fixed chi-square critical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyTest {
    critical: f64,
}

impl Default for FrequencyTest {
    fn default() -> Self {
        FrequencyTest {
            critical: DEFAULT_FREQUENCY_CRITICAL,
        }
    }
}

impl FrequencyTest {
    /// Creates a test that passes when chi-square is at most `critical`.
    pub fn new(critical: f64) -> Self {
        FrequencyTest { critical }
    }

    /// Runs the test.
    ///
    /// # Errors
    /// Returns [`CollatzError::InsufficientData`] for an empty sequence.
    pub fn report(&self, bits: &BitSequence) -> Result<FrequencyReport> {
        if bits.is_empty() {
            return Err(CollatzError::InsufficientData(
                "frequency test needs at least one bit".to_string(),
            ));
        }
        let zeros = bits.zeros();
        let ones = bits.ones();
        let expected = bits.len() as f64 / 2.0;
        let chi_square = ((zeros as f64 - expected).powi(2) + (ones as f64 - expected).powi(2))
            / expected;
        Ok(FrequencyReport {
            zeros,
            ones,
            chi_square,
            passed: chi_square <= self.critical,
        })
    }
}

impl RandomnessTest for FrequencyTest {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn evaluate(&self, bits: &BitSequence) -> Result<TestOutcome> {
        let report = self.report(bits)?;
        Ok(TestOutcome {
            name: self.name(),
            statistic: report.chi_square,
            passed: report.passed,
        })
    }
}
