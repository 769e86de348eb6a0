//! Reconstruction of time-of-day, naive/local timestamp and zoned timestamp columns.
//!
//! Every temporal wire value counts `10^-scale` second units, either as one integer or
//! split into whole seconds and a nanosecond fraction. Values are decoded into an exact
//! [`EpochInstant`] and only then truncated to the target [`TimeUnit`].
use super::{
    primitive_mapping::{as_struct, int32_child, int64_child, try_map_rows, widen_to_int64},
    ColumnConversionError, ColumnLabel, ConversionResult,
};
use crate::base::time::{EpochInstant, TimeError, TimeUnit, ZonedEncoding, ZonedTimestamp};
use alloc::sync::Arc;
use arrow::{
    array::{
        Array, ArrayRef, Int32Array, Int64Array, PrimitiveArray, StructArray,
        Time32MillisecondArray, Time32SecondArray, Time64MicrosecondArray,
    },
    datatypes::{
        ArrowPrimitiveType, DataType, TimestampMicrosecondType, TimestampMillisecondType,
        TimestampSecondType,
    },
};

/// Timezone label of reconstructed zoned timestamp columns.
pub const UTC_TIMEZONE: &str = "UTC";

/// Name of the whole seconds sub-field of a struct encoded timestamp.
pub const EPOCH_FIELD: &str = ZonedEncoding::EPOCH_FIELD;
/// Name of the nanosecond sub-field of a struct encoded timestamp.
pub const FRACTION_FIELD: &str = ZonedEncoding::FRACTION_FIELD;

fn target_unit(column: &ColumnLabel, scale: u8) -> ConversionResult<TimeUnit> {
    TimeUnit::target_for_scale(scale)
        .map_err(|error| ColumnConversionError::schema_mismatch(column, error))
}

fn invalid_value(column: &ColumnLabel, row: usize, source: TimeError) -> ColumnConversionError {
    ColumnConversionError::InvalidTemporalValue {
        column: column.clone(),
        row,
        source,
    }
}

/// Decodes scaled integers and counts them in `unit`.
fn scaled_to_units<O>(
    values: &Int64Array,
    column: &ColumnLabel,
    scale: u8,
    unit: TimeUnit,
) -> ConversionResult<PrimitiveArray<O>>
where
    O: ArrowPrimitiveType,
    O::Native: TryFrom<i64>,
{
    try_map_rows(values, |row, value| {
        EpochInstant::from_scaled(value, scale)
            .map_err(|source| invalid_value(column, row, source))?
            .to_unit(unit)
            .and_then(|units| O::Native::try_from(units).ok())
            .ok_or_else(|| ColumnConversionError::overflow(column, row, value, unit))
    })
}

/// Decodes every row of a struct column with `decode`, treating a null struct or a null
/// sub-field as a null row, and counts the instants in `unit`.
fn struct_rows_to_units<F>(
    array: &StructArray,
    children: &[&dyn Array],
    column: &ColumnLabel,
    unit: TimeUnit,
    mut decode: F,
) -> ConversionResult<Int64Array>
where
    F: FnMut(usize) -> Result<EpochInstant, TimeError>,
{
    (0..array.len())
        .map(|row| {
            if array.is_null(row) || children.iter().any(|child| child.is_null(row)) {
                return Ok(None);
            }
            let instant = decode(row).map_err(|source| invalid_value(column, row, source))?;
            instant.to_unit(unit).map(Some).ok_or_else(|| {
                ColumnConversionError::overflow(
                    column,
                    row,
                    format!("{}s+{}ns", instant.seconds(), instant.subsec_nanos()),
                    unit,
                )
            })
        })
        .collect()
}

fn timestamp_array(units: Int64Array, unit: TimeUnit, timezone: Option<Arc<str>>) -> ArrayRef {
    match unit {
        TimeUnit::Second => Arc::new(
            units
                .reinterpret_cast::<TimestampSecondType>()
                .with_timezone_opt(timezone),
        ),
        TimeUnit::Millisecond => Arc::new(
            units
                .reinterpret_cast::<TimestampMillisecondType>()
                .with_timezone_opt(timezone),
        ),
        TimeUnit::Microsecond => Arc::new(
            units
                .reinterpret_cast::<TimestampMicrosecondType>()
                .with_timezone_opt(timezone),
        ),
    }
}

/// The arrow type [`time_of_day`] produces for `scale`.
///
/// # Errors
/// Fails for scales above nanoseconds.
pub fn time_of_day_type(column: &ColumnLabel, scale: u8) -> ConversionResult<DataType> {
    Ok(target_unit(column, scale)?.time_data_type())
}

/// The arrow type [`timestamp`] and [`zoned_timestamp`] produce for `scale`.
///
/// # Errors
/// Fails for scales above nanoseconds.
pub fn timestamp_type(
    column: &ColumnLabel,
    scale: u8,
    timezone: Option<Arc<str>>,
) -> ConversionResult<DataType> {
    let unit = target_unit(column, scale)?;
    Ok(DataType::Timestamp(unit.into(), timezone))
}

/// Rebuilds a `TIME` column: integer counts of `10^-scale` seconds since midnight.
///
/// Scales finer than microseconds are truncated to microseconds.
///
/// # Errors
/// Fails on a non-integer input, a scale above 9 or a value that does not fit the target.
pub fn time_of_day(
    array: &ArrayRef,
    column: &ColumnLabel,
    scale: u8,
) -> ConversionResult<ArrayRef> {
    let unit = target_unit(column, scale)?;
    let values = widen_to_int64(array, column)?;
    let converted: ArrayRef = match unit {
        TimeUnit::Second => {
            let times: Time32SecondArray = scaled_to_units(&values, column, scale, unit)?;
            Arc::new(times)
        }
        TimeUnit::Millisecond => {
            let times: Time32MillisecondArray = scaled_to_units(&values, column, scale, unit)?;
            Arc::new(times)
        }
        TimeUnit::Microsecond => {
            let times: Time64MicrosecondArray = scaled_to_units(&values, column, scale, unit)?;
            Arc::new(times)
        }
    };
    Ok(converted)
}

/// Rebuilds a `TIMESTAMP_NTZ` or `TIMESTAMP_LTZ` column.
///
/// The wire form is either an integer count of `10^-scale` seconds since the epoch or a
/// struct of whole `epoch` seconds and a nanosecond `fraction`. `timezone` only labels the
/// output type; stored values are epoch counts either way.
///
/// # Errors
/// Fails on an unexpected wire form, a scale above 9, an invalid fraction or a value that
/// does not fit the target.
pub fn timestamp(
    array: &ArrayRef,
    column: &ColumnLabel,
    scale: u8,
    timezone: Option<Arc<str>>,
) -> ConversionResult<ArrayRef> {
    let unit = target_unit(column, scale)?;
    let units = if let DataType::Struct(_) = array.data_type() {
        let structs = as_struct(array, column)?;
        let epoch = int64_child(structs, EPOCH_FIELD, column)?;
        let fraction = int32_child(structs, FRACTION_FIELD, column)?;
        struct_rows_to_units(structs, &[epoch as &dyn Array, fraction], column, unit, |row| {
            EpochInstant::from_parts(epoch.value(row), fraction.value(row))
        })?
    } else {
        scaled_to_units(&widen_to_int64(array, column)?, column, scale, unit)?
    };
    Ok(timestamp_array(units, unit, timezone))
}

/// The sub-fields of a zoned timestamp struct, split by encoding.
enum ZonedFields<'a> {
    Narrow {
        epoch: &'a Int64Array,
        timezone: &'a Int32Array,
    },
    Wide {
        epoch: &'a Int64Array,
        fraction: &'a Int32Array,
        timezone: &'a Int32Array,
    },
}

impl<'a> ZonedFields<'a> {
    fn try_new(
        array: &'a StructArray,
        encoding: ZonedEncoding,
        column: &ColumnLabel,
    ) -> ConversionResult<Self> {
        if array.num_columns() != encoding.field_count() {
            return Err(ColumnConversionError::schema_mismatch(
                column,
                format!(
                    "{encoding:?} zoned timestamps have {} fields, found {}",
                    encoding.field_count(),
                    array.num_columns()
                ),
            ));
        }
        let epoch = int64_child(array, ZonedEncoding::EPOCH_FIELD, column)?;
        let timezone = int32_child(array, ZonedEncoding::TIMEZONE_FIELD, column)?;
        Ok(match encoding {
            ZonedEncoding::Narrow => ZonedFields::Narrow { epoch, timezone },
            ZonedEncoding::Wide => ZonedFields::Wide {
                epoch,
                fraction: int32_child(array, ZonedEncoding::FRACTION_FIELD, column)?,
                timezone,
            },
        })
    }

    fn children(&self) -> Vec<&'a dyn Array> {
        match *self {
            ZonedFields::Narrow { epoch, timezone } => vec![epoch as &dyn Array, timezone],
            ZonedFields::Wide {
                epoch,
                fraction,
                timezone,
            } => vec![epoch as &dyn Array, fraction, timezone],
        }
    }

    fn decode(&self, row: usize, scale: u8) -> Result<ZonedTimestamp, TimeError> {
        match self {
            ZonedFields::Narrow { epoch, timezone } => {
                ZonedTimestamp::decode_narrow(epoch.value(row), timezone.value(row), scale)
            }
            ZonedFields::Wide {
                epoch,
                fraction,
                timezone,
            } => ZonedTimestamp::decode_wide(
                epoch.value(row),
                fraction.value(row),
                timezone.value(row),
            ),
        }
    }
}

/// Rebuilds a `TIMESTAMP_TZ` column as a UTC timestamp column.
///
/// Each value is decoded according to `encoding`, its offset is validated and then
/// discarded: the output holds the UTC instant only, labelled [`UTC_TIMEZONE`].
///
/// # Errors
/// Fails when the struct layout disagrees with `encoding`, on a scale above 9, on an
/// invalid offset or fraction, or on a value that does not fit the target.
pub fn zoned_timestamp(
    array: &ArrayRef,
    column: &ColumnLabel,
    scale: u8,
    encoding: ZonedEncoding,
) -> ConversionResult<ArrayRef> {
    let unit = target_unit(column, scale)?;
    let structs = as_struct(array, column)?;
    let fields = ZonedFields::try_new(structs, encoding, column)?;
    let units = struct_rows_to_units(structs, &fields.children(), column, unit, |row| {
        fields.decode(row, scale).map(|value| value.utc_instant())
    })?;
    Ok(timestamp_array(units, unit, Some(UTC_TIMEZONE.into())))
}
