//! Zero-copy hand-off of an [`ArrowTable`] through the Arrow C Data Interface.
use super::{ArrowTable, TableError};
use arrow::{
    array::{Array, StructArray},
    ffi::{FFI_ArrowArray, FFI_ArrowSchema},
};
use core::{fmt, ptr::addr_of_mut};

fn export_error(source: arrow::error::ArrowError) -> TableError {
    TableError::Export { source }
}

/// The C Data Interface descriptors of a table, created once and owned until drop.
///
/// Descriptors are boxed so their addresses stay fixed. A consumer may take ownership of
/// a descriptor by moving it out, which leaves it released; dropping a released
/// descriptor is a no-op, so every buffer is released exactly once.
#[allow(clippy::vec_box)]
pub struct InterchangeExport {
    arrays: Vec<Box<FFI_ArrowArray>>,
    schemas: Vec<Box<FFI_ArrowSchema>>,
    batch_arrays: Vec<Box<FFI_ArrowArray>>,
    batch_schemas: Vec<Box<FFI_ArrowSchema>>,
}

impl InterchangeExport {
    /// Exports every column of every batch of `table`, ordered by batch and then by
    /// column, together with one struct descriptor per batch.
    ///
    /// # Errors
    /// Fails if a field cannot be described through the C Data Interface.
    #[tracing::instrument(name = "InterchangeExport::try_new", level = "debug", skip_all)]
    pub fn try_new(table: &ArrowTable) -> Result<Self, TableError> {
        let fields = table.schema().fields();
        let mut arrays = Vec::with_capacity(table.batches().len() * fields.len());
        let mut schemas = Vec::with_capacity(arrays.capacity());
        let mut batch_arrays = Vec::with_capacity(table.batches().len());
        let mut batch_schemas = Vec::with_capacity(table.batches().len());
        for batch in table.batches() {
            for (array, field) in batch.columns().iter().zip(fields.iter()) {
                arrays.push(Box::new(FFI_ArrowArray::new(&array.to_data())));
                schemas.push(Box::new(
                    FFI_ArrowSchema::try_from(field.as_ref()).map_err(export_error)?,
                ));
            }
            let rows = StructArray::from(batch.clone());
            batch_arrays.push(Box::new(FFI_ArrowArray::new(&rows.to_data())));
            batch_schemas.push(Box::new(
                FFI_ArrowSchema::try_from(table.schema().as_ref()).map_err(export_error)?,
            ));
        }
        tracing::debug!(
            descriptors = arrays.len(),
            batches = batch_arrays.len(),
            "exported table"
        );
        Ok(Self {
            arrays,
            schemas,
            batch_arrays,
            batch_schemas,
        })
    }

    /// Addresses of the `FFI_ArrowArray` of every column-batch.
    pub fn array_handles(&mut self) -> Vec<usize> {
        self.arrays
            .iter_mut()
            .map(|array| addr_of_mut!(**array) as usize)
            .collect()
    }

    /// Addresses of the `FFI_ArrowSchema` of every column-batch, aligned with
    /// [`Self::array_handles`].
    pub fn schema_handles(&mut self) -> Vec<usize> {
        self.schemas
            .iter_mut()
            .map(|schema| addr_of_mut!(**schema) as usize)
            .collect()
    }

    /// Addresses of one struct `FFI_ArrowArray` and the matching table `FFI_ArrowSchema`
    /// per batch.
    pub fn batch_handles(&mut self) -> Vec<(usize, usize)> {
        self.batch_arrays
            .iter_mut()
            .zip(self.batch_schemas.iter_mut())
            .map(|(array, schema)| {
                let array = addr_of_mut!(**array) as usize;
                (array, addr_of_mut!(**schema) as usize)
            })
            .collect()
    }

    /// Number of column-batch descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Whether no column-batch was exported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

impl fmt::Debug for InterchangeExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterchangeExport")
            .field("arrays", &self.arrays.len())
            .field("batches", &self.batch_arrays.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::arrow::wire_batch_utility::{real, text, wire_batch};
    use arrow::{
        array::{make_array, ArrayRef},
        datatypes::Field,
        ffi::from_ffi,
    };

    fn table() -> ArrowTable {
        let first = wire_batch([real("a", [1.0_f64, 2.0]), text("b", ["x", "y"])]);
        let second = wire_batch([real("a", [3.0_f64]), text("b", ["z"])]);
        ArrowTable::new(first.schema(), vec![first, second])
    }

    #[test]
    fn handles_are_ordered_by_batch_then_column() {
        let table = table();
        let mut export = InterchangeExport::try_new(&table).unwrap();
        assert_eq!(export.len(), 4);
        let arrays = export.array_handles();
        let schemas = export.schema_handles();
        assert_eq!(arrays.len(), schemas.len());

        let array = unsafe { FFI_ArrowArray::from_raw(arrays[2] as *mut FFI_ArrowArray) };
        let schema = unsafe { &*(schemas[2] as *const FFI_ArrowSchema) };
        assert_eq!(Field::try_from(schema).unwrap().name(), "a");
        let imported: ArrayRef = make_array(unsafe { from_ffi(array, schema) }.unwrap());
        assert_eq!(imported.as_ref(), table.batches()[1].column(0).as_ref());
    }

    #[test]
    fn handles_are_stable_across_calls() {
        let mut export = InterchangeExport::try_new(&table()).unwrap();
        assert_eq!(export.array_handles(), export.array_handles());
        assert_eq!(export.batch_handles(), export.batch_handles());
        assert_eq!(export.batch_handles().len(), 2);
    }

    #[test]
    fn handles_survive_moving_the_export() {
        let mut export = InterchangeExport::try_new(&table()).unwrap();
        let arrays = export.array_handles();
        let schemas = export.schema_handles();
        let mut moved = Box::new(export);
        assert_eq!(moved.array_handles(), arrays);
        assert_eq!(moved.schema_handles(), schemas);
    }
}
