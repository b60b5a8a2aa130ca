//! Candidate-bit source for balanced-collatz.
//!
//! Provides the keyed Collatz-like recurrence that drives generation and
//! the entropy seam used to seed and key it.

pub mod collatz;
pub mod entropy;
pub mod step_constant;
