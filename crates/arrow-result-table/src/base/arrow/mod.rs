//! Array level reconstruction of wire columns into their arrow representation.
mod conversion_error;
pub use conversion_error::{ColumnConversionError, ColumnLabel, ConversionResult};

mod primitive_mapping;

pub mod fixed_point_conversion;

pub mod temporal_conversion;

pub mod wire_batch_utility;
