//! Utility functions for creating wire [`RecordBatch`]es and their columns.
//! These functions are primarily intended for use in tests.
//!
//! Every column builder returns a `(Field, ArrayRef)` pair whose field carries the
//! side-channel metadata a wire result would carry.
//!
//! # Example
//! ```
//! use arrow_result_table::base::arrow::wire_batch_utility::*;
//! let batch = wire_batch([
//!     fixed("price", 10, 2, [12345_i64, -5]),
//!     time("at", 9, [1_123_456_789_i64, 0]),
//!     text("name", ["a", "b"]),
//! ]);
//! assert_eq!(batch.num_rows(), 2);
//! ```
use crate::base::{
    math::Precision,
    metadata::{ColumnMetadata, LogicalType},
    time::ZonedEncoding,
};
use alloc::sync::Arc;
use arrow::{
    array::{
        Array, ArrayRef, BooleanArray, Decimal128Array, Float64Array, Int32Array, Int64Array,
        RecordBatch, StringArray, StructArray,
    },
    buffer::NullBuffer,
    datatypes::{DataType, Field, Fields, Schema},
};

/// Creates a nullable [`Field`] carrying `metadata` as its field metadata.
#[must_use]
pub fn wire_field(name: impl Into<String>, metadata: ColumnMetadata, data_type: DataType) -> Field {
    Field::new(name, data_type, true).with_metadata(metadata.to_field_metadata())
}

fn int64_column(
    name: impl Into<String>,
    metadata: ColumnMetadata,
    data: impl IntoIterator<Item = impl Into<Option<i64>>>,
) -> (Field, ArrayRef) {
    let array: Int64Array = data.into_iter().map(Into::<Option<i64>>::into).collect();
    (wire_field(name, metadata, DataType::Int64), Arc::new(array))
}

/// Splits optional rows into zero-filled values and a validity buffer.
fn unzip_rows<T: Default>(data: impl IntoIterator<Item = Option<T>>) -> (Vec<T>, NullBuffer) {
    let (values, validity): (Vec<T>, Vec<bool>) = data
        .into_iter()
        .map(|row| match row {
            Some(value) => (value, true),
            None => (T::default(), false),
        })
        .unzip();
    (values, NullBuffer::from(validity))
}

fn struct_column(
    name: impl Into<String>,
    metadata: ColumnMetadata,
    children: Vec<(&str, ArrayRef)>,
    nulls: NullBuffer,
) -> (Field, ArrayRef) {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = children
        .into_iter()
        .map(|(child, array)| (Field::new(child, array.data_type().clone(), false), array))
        .unzip();
    let fields = Fields::from(fields);
    let array = StructArray::new(fields.clone(), arrays, Some(nulls));
    (
        wire_field(name, metadata, DataType::Struct(fields)),
        Arc::new(array),
    )
}

/// Creates a `FIXED` column of 64-bit integers scaled by `10^scale`.
/// This is primarily intended for use in conjunction with [`wire_batch`].
///
/// # Example
/// ```
/// use arrow_result_table::base::arrow::wire_batch_utility::*;
/// let batch = wire_batch([fixed("a", 10, 2, [Some(12345_i64), None])]);
/// ```
///
/// # Panics
/// - Panics if `precision` is not a valid decimal precision.
#[must_use]
pub fn fixed(
    name: impl Into<String>,
    precision: u8,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<i64>>>,
) -> (Field, ArrayRef) {
    let metadata = ColumnMetadata::new(LogicalType::Fixed)
        .with_scale(scale)
        .with_precision(Precision::new(precision).unwrap());
    int64_column(name, metadata, data)
}

/// Creates a `FIXED` column whose scaled integers need more than 64 bits and therefore
/// travel as a `Decimal128(38, 0)` array.
/// This is primarily intended for use in conjunction with [`wire_batch`].
///
/// # Panics
/// - Panics if `precision` is not a valid decimal precision.
#[must_use]
pub fn wide_fixed(
    name: impl Into<String>,
    precision: u8,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<i128>>>,
) -> (Field, ArrayRef) {
    let metadata = ColumnMetadata::new(LogicalType::Fixed)
        .with_scale(scale)
        .with_precision(Precision::new(precision).unwrap());
    let array = data
        .into_iter()
        .map(Into::<Option<i128>>::into)
        .collect::<Decimal128Array>()
        .with_precision_and_scale(Precision::max().value(), 0)
        .unwrap();
    (
        wire_field(name, metadata, array.data_type().clone()),
        Arc::new(array),
    )
}

/// Creates a `TIME` column counting `10^-scale` second units since midnight.
/// This is primarily intended for use in conjunction with [`wire_batch`].
///
/// # Example
/// ```
/// use arrow_result_table::base::arrow::wire_batch_utility::*;
/// // 12:34:56.789
/// let batch = wire_batch([time("t", 3, [45_296_789_i64])]);
/// ```
#[must_use]
pub fn time(
    name: impl Into<String>,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<i64>>>,
) -> (Field, ArrayRef) {
    int64_column(
        name,
        ColumnMetadata::new(LogicalType::Time).with_scale(scale),
        data,
    )
}

/// Creates a `TIMESTAMP_NTZ` column counting `10^-scale` second units since the epoch.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn timestamp_ntz(
    name: impl Into<String>,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<i64>>>,
) -> (Field, ArrayRef) {
    int64_column(
        name,
        ColumnMetadata::new(LogicalType::TimestampNtz).with_scale(scale),
        data,
    )
}

/// Creates a `TIMESTAMP_LTZ` column counting `10^-scale` second units since the epoch.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn timestamp_ltz(
    name: impl Into<String>,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<i64>>>,
) -> (Field, ArrayRef) {
    int64_column(
        name,
        ColumnMetadata::new(LogicalType::TimestampLtz).with_scale(scale),
        data,
    )
}

/// Creates a `TIMESTAMP_NTZ` column in its struct form: whole epoch seconds and a
/// nanosecond fraction per row.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn timestamp_ntz_wide(
    name: impl Into<String>,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<(i64, i32)>>>,
) -> (Field, ArrayRef) {
    let (rows, nulls) = unzip_rows::<(i64, i32)>(data.into_iter().map(Into::into));
    let (epoch, fraction): (Vec<i64>, Vec<i32>) = rows.into_iter().unzip();
    let epoch: ArrayRef = Arc::new(Int64Array::from(epoch));
    let fraction: ArrayRef = Arc::new(Int32Array::from(fraction));
    struct_column(
        name,
        ColumnMetadata::new(LogicalType::TimestampNtz).with_scale(scale),
        vec![
            (ZonedEncoding::EPOCH_FIELD, epoch),
            (ZonedEncoding::FRACTION_FIELD, fraction),
        ],
        nulls,
    )
}

/// Creates an 8 byte `TIMESTAMP_TZ` column. Each row is an epoch count scaled by
/// `10^scale` and the offset in minutes biased by 1440.
/// This is primarily intended for use in conjunction with [`wire_batch`].
///
/// # Example
/// ```
/// use arrow_result_table::base::arrow::wire_batch_utility::*;
/// // 2024-06-20T12:34:56Z recorded at +02:00
/// let batch = wire_batch([timestamp_tz_narrow("t", 0, [(1_718_886_896_i64, 1560_i32)])]);
/// ```
#[must_use]
pub fn timestamp_tz_narrow(
    name: impl Into<String>,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<(i64, i32)>>>,
) -> (Field, ArrayRef) {
    let (rows, nulls) = unzip_rows::<(i64, i32)>(data.into_iter().map(Into::into));
    let (epoch, timezone): (Vec<i64>, Vec<i32>) = rows.into_iter().unzip();
    let epoch: ArrayRef = Arc::new(Int64Array::from(epoch));
    let timezone: ArrayRef = Arc::new(Int32Array::from(timezone));
    struct_column(
        name,
        ColumnMetadata::new(LogicalType::TimestampTz)
            .with_scale(scale)
            .with_byte_length(ZonedEncoding::Narrow.byte_length()),
        vec![
            (ZonedEncoding::EPOCH_FIELD, epoch),
            (ZonedEncoding::TIMEZONE_FIELD, timezone),
        ],
        nulls,
    )
}

/// Creates a 16 byte `TIMESTAMP_TZ` column. Each row is whole epoch seconds, a
/// nanosecond fraction and the offset in minutes biased by 1440.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn timestamp_tz_wide(
    name: impl Into<String>,
    scale: u8,
    data: impl IntoIterator<Item = impl Into<Option<(i64, i32, i32)>>>,
) -> (Field, ArrayRef) {
    let (rows, nulls) = unzip_rows::<(i64, i32, i32)>(data.into_iter().map(Into::into));
    let mut epoch = Vec::with_capacity(rows.len());
    let mut fraction = Vec::with_capacity(rows.len());
    let mut timezone = Vec::with_capacity(rows.len());
    for (seconds, nanos, minutes) in rows {
        epoch.push(seconds);
        fraction.push(nanos);
        timezone.push(minutes);
    }
    let epoch: ArrayRef = Arc::new(Int64Array::from(epoch));
    let fraction: ArrayRef = Arc::new(Int32Array::from(fraction));
    let timezone: ArrayRef = Arc::new(Int32Array::from(timezone));
    struct_column(
        name,
        ColumnMetadata::new(LogicalType::TimestampTz)
            .with_scale(scale)
            .with_byte_length(ZonedEncoding::Wide.byte_length()),
        vec![
            (ZonedEncoding::EPOCH_FIELD, epoch),
            (ZonedEncoding::FRACTION_FIELD, fraction),
            (ZonedEncoding::TIMEZONE_FIELD, timezone),
        ],
        nulls,
    )
}

/// Creates a `TEXT` column.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn text(
    name: impl Into<String>,
    data: impl IntoIterator<Item = impl Into<String>>,
) -> (Field, ArrayRef) {
    let array: StringArray = data
        .into_iter()
        .map(|value| Some::<String>(value.into()))
        .collect();
    (
        wire_field(name, ColumnMetadata::new(LogicalType::Text), DataType::Utf8),
        Arc::new(array),
    )
}

/// Creates a `BOOLEAN` column.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn boolean(
    name: impl Into<String>,
    data: impl IntoIterator<Item = impl Into<Option<bool>>>,
) -> (Field, ArrayRef) {
    let array: BooleanArray = data.into_iter().map(Into::<Option<bool>>::into).collect();
    (
        wire_field(
            name,
            ColumnMetadata::new(LogicalType::Boolean),
            DataType::Boolean,
        ),
        Arc::new(array),
    )
}

/// Creates a `REAL` column.
/// This is primarily intended for use in conjunction with [`wire_batch`].
#[must_use]
pub fn real(
    name: impl Into<String>,
    data: impl IntoIterator<Item = impl Into<Option<f64>>>,
) -> (Field, ArrayRef) {
    let array: Float64Array = data.into_iter().map(Into::<Option<f64>>::into).collect();
    (
        wire_field(
            name,
            ColumnMetadata::new(LogicalType::Real),
            DataType::Float64,
        ),
        Arc::new(array),
    )
}

/// Creates a wire [`RecordBatch`] from a list of `(Field, ArrayRef)` pairs.
/// This is a convenience wrapper around [`RecordBatch::try_new`] primarily for use in tests and
/// intended to be used along with the other methods in this module (e.g. [fixed], [time], etc).
///
/// # Panics
/// - Panics if the columns differ in length or disagree with their fields.
#[must_use]
pub fn wire_batch(columns: impl IntoIterator<Item = (Field, ArrayRef)>) -> RecordBatch {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}
