//! Generator configuration and validation.

use crate::error::{CollatzError, Result};

/// Default output length in bits.
pub const DEFAULT_LENGTH: usize = 128;

/// Chi-square critical value for one degree of freedom at a 0.05
/// significance level.
pub const DEFAULT_FREQUENCY_CRITICAL: f64 = 3.841;

/// Two-sided 0.05 bound on the runs-test Z-score.
pub const DEFAULT_RUNS_Z_BOUND: f64 = 1.96;

/// Settings for one generation run and its statistical checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Output length in bits. Must be positive and even.
    pub length: usize,
    /// Largest chi-square statistic the frequency test accepts.
    pub frequency_critical: f64,
    /// Largest absolute Z-score the runs test accepts.
    pub runs_z_bound: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            length: DEFAULT_LENGTH,
            frequency_critical: DEFAULT_FREQUENCY_CRITICAL,
            runs_z_bound: DEFAULT_RUNS_Z_BOUND,
        }
    }
}

impl GeneratorConfig {
    /// Default thresholds with the given length.
    pub fn with_length(length: usize) -> Self {
        GeneratorConfig {
            length,
            ..Self::default()
        }
    }

    /// Checks every field.
    ///
    /// # Errors
    /// - [`CollatzError::InvalidLength`] if `length` is zero or odd.
    /// - [`CollatzError::InvalidSignificance`] if a threshold is not finite
    ///   and positive.
    pub fn validate(&self) -> Result<()> {
        validate_length(self.length)?;
        for threshold in [self.frequency_critical, self.runs_z_bound] {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(CollatzError::InvalidSignificance);
            }
        }
        Ok(())
    }
}

/// Checks that `length` splits into two equal non-empty quotas.
///
/// Zero is rejected along with odd values: an empty run produces nothing
/// worth testing.
///
/// # Errors
/// Returns [`CollatzError::InvalidLength`] if `length` is zero or odd.
pub fn validate_length(length: usize) -> Result<usize> {
    if length == 0 || length % 2 != 0 {
        return Err(CollatzError::InvalidLength(length));
    }
    Ok(length)
}
