use crate::base::arrow::ColumnConversionError;
use arrow::error::ArrowError;
use snafu::Snafu;

/// Errors that can occur while aggregating wire batches into an [`ArrowTable`](super::ArrowTable)
/// or exporting it.
#[derive(Debug, Snafu)]
pub enum TableError {
    /// The columns of the wire schema could not be planned
    #[snafu(transparent)]
    Plan {
        /// The underlying source error
        source: ColumnConversionError,
    },
    /// A batch could not be reconstructed
    #[snafu(display("failed to convert batch {batch}: {source}"))]
    Conversion {
        /// Arrival position of the batch
        batch: usize,
        /// The underlying source error
        source: ColumnConversionError,
    },
    /// A batch does not carry the schema of the first batch
    #[snafu(display("batch {batch} does not match the schema of the first batch"))]
    BatchSchemaMismatch {
        /// Arrival position of the batch
        batch: usize,
    },
    /// An interchange descriptor could not be created
    #[snafu(display("failed to export the table: {source}"))]
    Export {
        /// The underlying source error
        source: ArrowError,
    },
    /// An earlier conversion failed, so no table will ever be produced
    #[snafu(display("an earlier conversion failed, the table is unavailable"))]
    Poisoned,
}
