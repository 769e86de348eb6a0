//! This module defines the numeric utilities used by the fixed point and temporal converters.
/// Scaled integer to floating point conversion and powers of ten.
pub mod scaled_number;

mod precision;
pub use precision::{InvalidPrecisionError, Precision};
#[cfg(test)]
mod precision_test;
