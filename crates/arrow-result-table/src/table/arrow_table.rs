use arrow::{
    array::{ArrayRef, RecordBatch},
    compute::concat_batches,
    datatypes::SchemaRef,
    error::ArrowError,
};

/// The logical concatenation of reconstructed batches.
///
/// The table owns the batches it was built from and never copies them: columns that did
/// not need reconstruction share their buffers with the wire batches.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl ArrowTable {
    /// Creates a table over `batches`, which must all carry `schema`.
    pub(crate) fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// The schema shared by every batch.
    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// The batches in arrival order.
    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows across all batches.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Number of columns of the schema.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// The arrays of column `index`, one per batch in arrival order, or `None` if there
    /// is no such column.
    #[must_use]
    pub fn column_chunks(&self, index: usize) -> Option<Vec<&ArrayRef>> {
        if index >= self.num_columns() {
            return None;
        }
        let chunks = self.batches.iter().map(|batch| batch.column(index));
        Some(chunks.collect())
    }

    /// Materializes the table as one batch. Unlike every other accessor this copies all
    /// buffers.
    ///
    /// # Errors
    /// Fails if arrow cannot concatenate the batches.
    pub fn concat(&self) -> Result<RecordBatch, ArrowError> {
        concat_batches(&self.schema, &self.batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use arrow::{
        array::Int64Array,
        datatypes::{DataType, Field, Schema},
    };

    fn batch(schema: &SchemaRef, values: Vec<i64>) -> RecordBatch {
        RecordBatch::try_new(Arc::clone(schema), vec![Arc::new(Int64Array::from(values))]).unwrap()
    }

    fn table() -> ArrowTable {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Int64, true)]));
        let batches = vec![
            batch(&schema, vec![1, 2]),
            batch(&schema, vec![]),
            batch(&schema, vec![3]),
        ];
        ArrowTable::new(schema, batches)
    }

    #[test]
    fn we_can_count_rows_and_columns_across_batches() {
        let table = table();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 1);
        assert_eq!(table.batches().len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn column_chunks_share_the_batch_arrays() {
        let table = table();
        let chunks = table.column_chunks(0).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(Arc::ptr_eq(chunks[2], table.batches()[2].column(0)));
        assert!(table.column_chunks(1).is_none());
    }

    #[test]
    fn we_can_concatenate_the_batches() {
        let concatenated = table().concat().unwrap();
        assert_eq!(
            concatenated.column(0).as_ref(),
            &Int64Array::from(vec![1, 2, 3]) as &dyn arrow::array::Array
        );
    }
}
