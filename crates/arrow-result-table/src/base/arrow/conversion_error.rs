use crate::base::{metadata::ColumnMetadataError, time::TimeError};
use arrow::error::ArrowError;
use core::{fmt, num::ParseFloatError};
use snafu::Snafu;

/// Position and name of the column a conversion runs on, kept for error context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnLabel {
    index: usize,
    name: String,
}

impl ColumnLabel {
    /// Labels the column at `index` named `name`.
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Position of the column in the schema.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the column.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} `{}`", self.index, self.name)
    }
}

#[derive(Snafu, Debug)]
/// Errors raised while reconstructing a wire column into its arrow representation.
pub enum ColumnConversionError {
    /// The column metadata could not be read
    #[snafu(transparent)]
    Metadata {
        /// The underlying source error
        source: ColumnMetadataError,
    },
    /// The metadata and the physical arrow type of a column disagree
    #[snafu(display("schema mismatch in column {column}: {reason}"))]
    SchemaMismatch {
        /// The mismatched column
        column: ColumnLabel,
        /// What disagrees
        reason: String,
    },
    /// A value does not fit the target type
    #[snafu(display("value {value} in column {column} row {row} does not fit {target}"))]
    ValueOverflow {
        /// The column holding the value
        column: ColumnLabel,
        /// The row of the value within its batch
        row: usize,
        /// The offending value, rendered
        value: String,
        /// The target type
        target: String,
    },
    /// A temporal value holds sub-fields that do not decode
    #[snafu(display("invalid temporal value in column {column} row {row}: {source}"))]
    InvalidTemporalValue {
        /// The column holding the value
        column: ColumnLabel,
        /// The row of the value within its batch
        row: usize,
        /// The underlying source error
        source: TimeError,
    },
    /// A scaled number could not be approximated as a double
    #[snafu(display("value in column {column} row {row} is not a valid double: {source}"))]
    FloatApproximation {
        /// The column holding the value
        column: ColumnLabel,
        /// The row of the value within its batch
        row: usize,
        /// The underlying source error
        source: ParseFloatError,
    },
    /// An arrow kernel or constructor failed
    #[snafu(transparent)]
    Arrow {
        /// The underlying source error
        source: ArrowError,
    },
}

impl ColumnConversionError {
    pub(crate) fn schema_mismatch(column: &ColumnLabel, reason: impl Into<String>) -> Self {
        ColumnConversionError::SchemaMismatch {
            column: column.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(
        column: &ColumnLabel,
        row: usize,
        value: impl ToString,
        target: impl ToString,
    ) -> Self {
        ColumnConversionError::ValueOverflow {
            column: column.clone(),
            row,
            value: value.to_string(),
            target: target.to_string(),
        }
    }
}

/// Result type for column conversions.
pub type ConversionResult<T> = Result<T, ColumnConversionError>;
