//! Conversion helpers shared by the output types.

pub mod converter;
