//! Aggregation of converted wire batches into one table and its interchange export.
mod arrow_table;
#[allow(clippy::module_name_repetitions)]
pub use arrow_table::ArrowTable;

mod dispatcher;
pub use dispatcher::{ColumnConversion, FixedPointTarget, SchemaConversion};

mod error;
#[allow(clippy::module_name_repetitions)]
pub use error::TableError;

mod export;
pub use export::InterchangeExport;

mod iterator;
#[allow(clippy::module_name_repetitions)]
pub use iterator::TableIterator;
