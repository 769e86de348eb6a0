use super::{ArrowTable, InterchangeExport, SchemaConversion, TableError};
use crate::base::config::ConversionConfig;
use alloc::sync::Arc;
use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
use core::{iter::FusedIterator, mem};
use tracing::debug;

/// Whether the wire batches of a [`TableIterator`] were converted yet.
enum ConversionState {
    Uncomputed {
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    },
    Computed {
        table: ArrowTable,
        export: InterchangeExport,
    },
    Poisoned,
}

/// Aggregates wire batches into one [`ArrowTable`] and exports it.
///
/// Conversion runs lazily on the first request for the table or for any handle, and at
/// most once: later requests return what the first one produced. A failed conversion
/// is reported once, after which the iterator is poisoned.
///
/// As an [`Iterator`] it yields the table once and then signals end-of-data.
pub struct TableIterator {
    config: ConversionConfig,
    state: ConversionState,
    exhausted: bool,
}

impl TableIterator {
    /// Creates an iterator over `batches`, all of which must carry the schema of the
    /// first one. Without batches the table is empty and has no columns.
    #[must_use]
    pub fn new(batches: Vec<RecordBatch>, config: ConversionConfig) -> Self {
        let schema = batches
            .first()
            .map_or_else(|| Arc::new(Schema::empty()), RecordBatch::schema);
        Self::with_schema(schema, batches, config)
    }

    /// Creates an iterator over `batches` carrying the wire `schema`. This keeps the
    /// columns of results without any batch.
    #[must_use]
    pub fn with_schema(
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
        config: ConversionConfig,
    ) -> Self {
        Self {
            config,
            state: ConversionState::Uncomputed { schema, batches },
            exhausted: false,
        }
    }

    /// The configuration captured at creation.
    #[must_use]
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Whether the conversion already ran successfully.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self.state, ConversionState::Computed { .. })
    }

    #[tracing::instrument(name = "TableIterator::convert", level = "debug", skip_all)]
    fn convert(
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
        config: &ConversionConfig,
    ) -> Result<(ArrowTable, InterchangeExport), TableError> {
        let plan = SchemaConversion::try_new(schema, config)?;
        let converted = batches
            .iter()
            .enumerate()
            .map(|(batch, wire)| {
                if wire.schema() != *plan.input_schema() {
                    return Err(TableError::BatchSchemaMismatch { batch });
                }
                plan.convert_batch(wire)
                    .map_err(|source| TableError::Conversion { batch, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let table = ArrowTable::new(Arc::clone(plan.output_schema()), converted);
        let conversions = plan.conversions();
        let rebuilt_columns = conversions
            .filter(|conversion| !conversion.is_passthrough())
            .count();
        debug!(
            batches = table.batches().len(),
            rows = table.num_rows(),
            rebuilt_columns,
            "converted wire batches"
        );
        let export = InterchangeExport::try_new(&table)?;
        Ok((table, export))
    }

    fn computed(&mut self) -> Result<(&ArrowTable, &mut InterchangeExport), TableError> {
        let state = mem::replace(&mut self.state, ConversionState::Poisoned);
        self.state = match state {
            ConversionState::Uncomputed { schema, batches } => {
                let (table, export) = Self::convert(schema, batches, &self.config)?;
                ConversionState::Computed { table, export }
            }
            state => state,
        };
        match &mut self.state {
            ConversionState::Computed { table, export } => Ok((&*table, export)),
            ConversionState::Uncomputed { .. } | ConversionState::Poisoned => {
                Err(TableError::Poisoned)
            }
        }
    }

    /// The converted table, converting on first use.
    ///
    /// # Errors
    /// Returns the conversion error on the call that ran the conversion and
    /// [`TableError::Poisoned`] on every later call.
    pub fn table(&mut self) -> Result<&ArrowTable, TableError> {
        self.computed().map(|(table, _)| table)
    }

    /// Addresses of the `FFI_ArrowArray` descriptor of every column-batch, ordered by
    /// batch and then by column.
    ///
    /// # Errors
    /// Fails like [`Self::table`].
    pub fn array_handles(&mut self) -> Result<Vec<usize>, TableError> {
        Ok(self.computed()?.1.array_handles())
    }

    /// Addresses of the `FFI_ArrowSchema` descriptor of every column-batch, aligned with
    /// [`Self::array_handles`].
    ///
    /// # Errors
    /// Fails like [`Self::table`].
    pub fn schema_handles(&mut self) -> Result<Vec<usize>, TableError> {
        Ok(self.computed()?.1.schema_handles())
    }

    /// Addresses of one struct `FFI_ArrowArray` and one table `FFI_ArrowSchema` per batch.
    ///
    /// # Errors
    /// Fails like [`Self::table`].
    pub fn batch_handles(&mut self) -> Result<Vec<(usize, usize)>, TableError> {
        Ok(self.computed()?.1.batch_handles())
    }
}

impl Iterator for TableIterator {
    type Item = Result<ArrowTable, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || matches!(self.state, ConversionState::Poisoned) {
            return None;
        }
        self.exhausted = true;
        Some(self.table().cloned())
    }
}

impl FusedIterator for TableIterator {}
