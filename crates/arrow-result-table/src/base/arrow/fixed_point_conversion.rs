//! Reconstruction of scaled fixed point columns.
//!
//! The wire stores `FIXED` values as integers scaled by `10^scale`, either as a native
//! integer array or, for precisions beyond 64 bits, as a `Decimal128` array. They are
//! rebuilt either as exact `Decimal128(precision, scale)` columns or as `Float64` columns.
use super::{
    primitive_mapping::{try_map_rows, widen_to_int64},
    ColumnConversionError, ColumnLabel, ConversionResult,
};
use crate::base::math::{
    scaled_number::{render_scaled, scaled_to_f64},
    Precision,
};
use alloc::sync::Arc;
use arrow::{
    array::{Array, ArrayRef, AsArray, Decimal128Array, Float64Array, PrimitiveArray},
    datatypes::{ArrowPrimitiveType, DataType, Decimal128Type, DecimalType},
};

/// The largest scale a `Decimal128` column accepts.
pub const MAX_FIXED_POINT_SCALE: u8 = 38;

/// Maps the scaled integers of a `FIXED` wire column, whichever width they arrive in.
fn try_map_scaled_integers<O, F>(
    array: &ArrayRef,
    column: &ColumnLabel,
    mut f: F,
) -> ConversionResult<PrimitiveArray<O>>
where
    O: ArrowPrimitiveType,
    F: FnMut(usize, i128) -> ConversionResult<O::Native>,
{
    match array.data_type() {
        DataType::Decimal128(_, _) => try_map_rows(array.as_primitive::<Decimal128Type>(), f),
        _ => try_map_rows(&widen_to_int64(array, column)?, |row, value| {
            f(row, i128::from(value))
        }),
    }
}

/// Rebuilds a scaled integer column as `Decimal128(precision, scale)`.
///
/// The integers are kept as they are: only the type now records the scale.
///
/// # Errors
/// Fails on a non-integer input, a scale above 38, or a value with more digits than `precision`.
pub fn fixed_point_to_decimal(
    array: &ArrayRef,
    column: &ColumnLabel,
    precision: Precision,
    scale: u8,
) -> ConversionResult<ArrayRef> {
    let decimal_scale = i8::try_from(scale)
        .ok()
        .filter(|_| scale <= MAX_FIXED_POINT_SCALE)
        .ok_or_else(|| {
            ColumnConversionError::schema_mismatch(
                column,
                format!("scale {scale} exceeds the decimal limit of {MAX_FIXED_POINT_SCALE}"),
            )
        })?;
    let target = DataType::Decimal128(precision.value(), decimal_scale);
    let values: Decimal128Array = try_map_scaled_integers(array, column, |row, value| {
        Decimal128Type::validate_decimal_precision(value, precision.value())
            .map(|()| value)
            .map_err(|_| {
                ColumnConversionError::overflow(column, row, render_scaled(value, scale), &target)
            })
    })?;
    Ok(Arc::new(
        values.with_precision_and_scale(precision.value(), decimal_scale)?,
    ))
}

/// Rebuilds a scaled integer column as `Float64`.
///
/// Small scales are divided directly, large ones go through the exact decimal string,
/// see [`scaled_to_f64`].
///
/// # Errors
/// Fails on a non-integer input.
pub fn fixed_point_to_double(
    array: &ArrayRef,
    column: &ColumnLabel,
    scale: u8,
) -> ConversionResult<ArrayRef> {
    let values: Float64Array = try_map_scaled_integers(array, column, |row, value| {
        scaled_to_f64(value, scale).map_err(|source| ColumnConversionError::FloatApproximation {
            column: column.clone(),
            row,
            source,
        })
    })?;
    Ok(Arc::new(values))
}
