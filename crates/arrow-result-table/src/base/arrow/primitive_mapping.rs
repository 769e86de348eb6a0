use super::{ColumnConversionError, ColumnLabel, ConversionResult};
use arrow::{
    array::{Array, ArrayRef, AsArray, Int32Array, Int64Array, PrimitiveArray, StructArray},
    compute::cast,
    datatypes::{ArrowPrimitiveType, DataType, Int64Type},
};

/// Maps every non-null value of `array`, passing its row. Null slots stay null and
/// their value bits are never read.
pub(crate) fn try_map_rows<I, O, F>(
    array: &PrimitiveArray<I>,
    mut f: F,
) -> ConversionResult<PrimitiveArray<O>>
where
    I: ArrowPrimitiveType,
    O: ArrowPrimitiveType,
    F: FnMut(usize, I::Native) -> ConversionResult<O::Native>,
{
    array
        .iter()
        .enumerate()
        .map(|(row, value)| value.map(|value| f(row, value)).transpose())
        .collect()
}

/// Widens any signed integer array to `Int64`.
pub(crate) fn widen_to_int64(
    array: &ArrayRef,
    column: &ColumnLabel,
) -> ConversionResult<Int64Array> {
    match array.data_type() {
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let widened = cast(array, &DataType::Int64)?;
            Ok(widened.as_primitive::<Int64Type>().clone())
        }
        data_type => Err(ColumnConversionError::schema_mismatch(
            column,
            format!("expected an integer array, found {data_type}"),
        )),
    }
}

/// Looks up the `Int64` child `name` of a struct column.
pub(crate) fn int64_child<'a>(
    array: &'a StructArray,
    name: &str,
    column: &ColumnLabel,
) -> ConversionResult<&'a Int64Array> {
    array
        .column_by_name(name)
        .and_then(|child| child.as_primitive_opt())
        .ok_or_else(|| {
            ColumnConversionError::schema_mismatch(column, format!("missing Int64 field `{name}`"))
        })
}

/// Looks up the `Int32` child `name` of a struct column.
pub(crate) fn int32_child<'a>(
    array: &'a StructArray,
    name: &str,
    column: &ColumnLabel,
) -> ConversionResult<&'a Int32Array> {
    array
        .column_by_name(name)
        .and_then(|child| child.as_primitive_opt())
        .ok_or_else(|| {
            ColumnConversionError::schema_mismatch(column, format!("missing Int32 field `{name}`"))
        })
}

/// The struct view of a column whose wire form is a struct.
pub(crate) fn as_struct<'a>(
    array: &'a ArrayRef,
    column: &ColumnLabel,
) -> ConversionResult<&'a StructArray> {
    array.as_struct_opt().ok_or_else(|| {
        ColumnConversionError::schema_mismatch(
            column,
            format!("expected a struct array, found {}", array.data_type()),
        )
    })
}
