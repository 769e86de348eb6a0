use crate::base::{
    arrow::{
        fixed_point_conversion::{
            fixed_point_to_decimal, fixed_point_to_double, MAX_FIXED_POINT_SCALE,
        },
        temporal_conversion::{
            time_of_day, time_of_day_type, timestamp, timestamp_type, zoned_timestamp,
            EPOCH_FIELD, FRACTION_FIELD, UTC_TIMEZONE,
        },
        ColumnConversionError, ColumnLabel, ConversionResult,
    },
    config::ConversionConfig,
    math::Precision,
    metadata::{ColumnMetadata, LogicalType},
    time::ZonedEncoding,
};
use alloc::sync::Arc;
use arrow::{
    array::{ArrayRef, RecordBatch},
    datatypes::{DataType, Field, Fields, Schema, SchemaRef},
};
use itertools::{izip, Itertools};
use tracing::debug;

/// Sub-fields of a timestamp split into whole seconds and nanoseconds.
const SPLIT_FIELDS: [&str; 2] = [EPOCH_FIELD, FRACTION_FIELD];

/// The representation a scaled fixed point column is rebuilt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPointTarget {
    /// Exact `Decimal128` with the given precision
    Decimal(Precision),
    /// Approximate `Float64`
    Double,
}

/// What happens to one wire column when a batch is reconstructed.
///
/// A conversion is planned once per column from the field metadata and then applied to
/// the column of every batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnConversion {
    /// The wire array already is the final representation and is shared as is.
    Passthrough,
    /// Scaled integers rebuilt as decimals or doubles.
    FixedPoint {
        /// Number of fractional digits
        scale: u8,
        /// Output representation
        target: FixedPointTarget,
    },
    /// Scaled time-of-day counts.
    Time {
        /// Number of fractional digits
        scale: u8,
    },
    /// Naive or local timestamps, either scaled or split into seconds and nanoseconds.
    Timestamp {
        /// Number of fractional digits
        scale: u8,
        /// Label attached to the output type, `None` for naive timestamps
        timezone: Option<Arc<str>>,
    },
    /// Zoned timestamps normalized to UTC.
    ZonedTimestamp {
        /// Number of fractional digits
        scale: u8,
        /// Wire layout of each value
        encoding: ZonedEncoding,
    },
}

fn is_integer(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
    )
}

/// Whether `fields` are exactly the named sub-fields of a struct encoded timestamp.
fn has_sub_fields(fields: &Fields, names: &[&str]) -> bool {
    fields.len() == names.len()
        && names
            .iter()
            .all(|name| fields.iter().any(|field| field.name() == name))
}

/// Whether a `Decimal128` wire column already has the type `target` produces.
fn is_exact_decimal(data_type: &DataType, target: FixedPointTarget, scale: u8) -> bool {
    let FixedPointTarget::Decimal(precision) = target else {
        return false;
    };
    match data_type {
        DataType::Decimal128(wire_precision, wire_scale) => {
            *wire_precision == precision.value() && i16::from(*wire_scale) == i16::from(scale)
        }
        _ => false,
    }
}

impl ColumnConversion {
    /// Decides how the column `field` at `index` is reconstructed.
    ///
    /// # Errors
    /// Fails when the metadata is missing or malformed, or when it disagrees with the
    /// physical arrow type of the column.
    pub fn plan(index: usize, field: &Field, config: &ConversionConfig) -> ConversionResult<Self> {
        let column = ColumnLabel::new(index, field.name());
        let metadata = ColumnMetadata::try_from_field(field)?;
        let scale = metadata.scale();
        let data_type = field.data_type();
        let mismatch = |reason: String| ColumnConversionError::schema_mismatch(&column, reason);
        let conversion = match metadata.logical_type() {
            LogicalType::Fixed => {
                let precision = metadata.precision().unwrap_or_default();
                if scale > precision.value() || scale > MAX_FIXED_POINT_SCALE {
                    return Err(mismatch(format!(
                        "scale {scale} does not fit precision {}",
                        precision.value()
                    )));
                }
                let target = if config.number_to_decimal() {
                    FixedPointTarget::Decimal(precision)
                } else {
                    FixedPointTarget::Double
                };
                match data_type {
                    data_type if is_integer(data_type) && scale == 0 => Self::Passthrough,
                    data_type if is_integer(data_type) => Self::FixedPoint { scale, target },
                    data_type if is_exact_decimal(data_type, target, scale) => Self::Passthrough,
                    DataType::Decimal128(_, _) => Self::FixedPoint { scale, target },
                    data_type => {
                        return Err(mismatch(format!(
                            "FIXED columns are integers or Decimal128, found {data_type}"
                        )))
                    }
                }
            }
            LogicalType::Time => match data_type {
                DataType::Int32 | DataType::Int64 => Self::Time { scale },
                data_type => {
                    return Err(mismatch(format!(
                        "TIME columns are Int32 or Int64, found {data_type}"
                    )))
                }
            },
            logical_type @ (LogicalType::TimestampNtz | LogicalType::TimestampLtz) => {
                match data_type {
                    DataType::Int64 => {}
                    DataType::Struct(fields) if has_sub_fields(fields, &SPLIT_FIELDS) => {}
                    data_type => {
                        return Err(mismatch(format!(
                            "{logical_type} needs Int64 or a split struct, found {data_type}"
                        )))
                    }
                }
                let timezone = match logical_type {
                    LogicalType::TimestampLtz => config.session_timezone(),
                    _ => None,
                };
                Self::Timestamp { scale, timezone }
            }
            LogicalType::TimestampTz => {
                let byte_length = metadata
                    .byte_length()
                    .ok_or_else(|| mismatch("TIMESTAMP_TZ columns need a byteLength".to_string()))?;
                let encoding = ZonedEncoding::try_from(byte_length)
                    .map_err(|error| mismatch(error.to_string()))?;
                match data_type {
                    DataType::Struct(fields) if fields.len() == encoding.field_count() => {}
                    data_type => {
                        return Err(mismatch(format!(
                            "{byte_length} byte zoned values need {} fields, found {data_type}",
                            encoding.field_count()
                        )))
                    }
                }
                Self::ZonedTimestamp { scale, encoding }
            }
            LogicalType::Real
            | LogicalType::Text
            | LogicalType::Char
            | LogicalType::Binary
            | LogicalType::Boolean
            | LogicalType::Date
            | LogicalType::Variant
            | LogicalType::Object
            | LogicalType::Array
            | LogicalType::Map
            | LogicalType::Vector
            | LogicalType::Any
            | LogicalType::Geography
            | LogicalType::Geometry => Self::Passthrough,
        };
        // Surfaces unsupported scales before any batch is touched.
        conversion.output_data_type(data_type, &column)?;
        debug!(
            %column,
            logical_type = %metadata.logical_type(),
            scale,
            conversion = ?conversion,
            "planned column conversion"
        );
        Ok(conversion)
    }

    /// The arrow type this conversion produces from a column of type `input`.
    ///
    /// # Errors
    /// Fails for temporal scales above nanoseconds.
    pub fn output_data_type(
        &self,
        input: &DataType,
        column: &ColumnLabel,
    ) -> ConversionResult<DataType> {
        match self {
            ColumnConversion::Passthrough => Ok(input.clone()),
            ColumnConversion::FixedPoint {
                scale,
                target: FixedPointTarget::Decimal(precision),
            } => {
                let reason = format!("invalid scale {scale}");
                let scale = i8::try_from(*scale)
                    .map_err(|_| ColumnConversionError::schema_mismatch(column, reason))?;
                Ok(DataType::Decimal128(precision.value(), scale))
            }
            ColumnConversion::FixedPoint {
                target: FixedPointTarget::Double,
                ..
            } => Ok(DataType::Float64),
            ColumnConversion::Time { scale } => time_of_day_type(column, *scale),
            ColumnConversion::Timestamp { scale, timezone } => {
                timestamp_type(column, *scale, timezone.clone())
            }
            ColumnConversion::ZonedTimestamp { scale, .. } => {
                timestamp_type(column, *scale, Some(UTC_TIMEZONE.into()))
            }
        }
    }

    /// Reconstructs one batch worth of the column.
    ///
    /// # Errors
    /// Fails on the first value that cannot be represented in the output type.
    pub fn apply(&self, array: &ArrayRef, column: &ColumnLabel) -> ConversionResult<ArrayRef> {
        match self {
            ColumnConversion::Passthrough => Ok(Arc::clone(array)),
            ColumnConversion::FixedPoint {
                scale,
                target: FixedPointTarget::Decimal(precision),
            } => fixed_point_to_decimal(array, column, *precision, *scale),
            ColumnConversion::FixedPoint {
                scale,
                target: FixedPointTarget::Double,
            } => fixed_point_to_double(array, column, *scale),
            ColumnConversion::Time { scale } => time_of_day(array, column, *scale),
            ColumnConversion::Timestamp { scale, timezone } => {
                timestamp(array, column, *scale, timezone.clone())
            }
            ColumnConversion::ZonedTimestamp { scale, encoding } => {
                zoned_timestamp(array, column, *scale, *encoding)
            }
        }
    }

    /// Whether the column is shared without being rebuilt.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        matches!(self, ColumnConversion::Passthrough)
    }
}

/// The conversions of every column of a wire schema, together with the schema they
/// produce.
#[derive(Debug, Clone)]
pub struct SchemaConversion {
    input_schema: SchemaRef,
    output_schema: SchemaRef,
    columns: Vec<(ColumnLabel, ColumnConversion)>,
}

impl SchemaConversion {
    /// Plans every column of `schema`.
    ///
    /// Output fields keep their name, nullability and metadata; only their type changes.
    ///
    /// # Errors
    /// Fails on the first column that cannot be planned.
    pub fn try_new(schema: SchemaRef, config: &ConversionConfig) -> ConversionResult<Self> {
        let (columns, output_fields): (Vec<_>, Vec<_>) = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(index, field)| -> ConversionResult<_> {
                let column = ColumnLabel::new(index, field.name());
                let conversion = ColumnConversion::plan(index, field, config)?;
                let output = conversion.output_data_type(field.data_type(), &column)?;
                let output_field = Field::clone(field).with_data_type(output);
                Ok(((column, conversion), output_field))
            })
            .collect::<ConversionResult<Vec<_>>>()?
            .into_iter()
            .unzip();
        let output_schema = Arc::new(Schema::new_with_metadata(
            output_fields,
            schema.metadata().clone(),
        ));
        Ok(Self {
            input_schema: schema,
            output_schema,
            columns,
        })
    }

    /// The wire schema this plan was made for.
    #[must_use]
    pub fn input_schema(&self) -> &SchemaRef {
        &self.input_schema
    }

    /// The schema of reconstructed batches.
    #[must_use]
    pub fn output_schema(&self) -> &SchemaRef {
        &self.output_schema
    }

    /// The planned conversion of every column, in schema order.
    pub fn conversions(&self) -> impl Iterator<Item = &ColumnConversion> {
        self.columns.iter().map(|(_, conversion)| conversion)
    }

    /// Reconstructs `batch`, rebuilding planned columns and sharing passthrough ones.
    ///
    /// # Errors
    /// Fails when a column cannot be reconstructed or the rebuilt columns do not form a
    /// valid batch.
    pub fn convert_batch(&self, batch: &RecordBatch) -> ConversionResult<RecordBatch> {
        let arrays: Vec<ArrayRef> = izip!(&self.columns, batch.columns())
            .map(|((column, conversion), array)| conversion.apply(array, column))
            .try_collect()?;
        let batch = RecordBatch::try_new(Arc::clone(&self.output_schema), arrays)?;
        Ok(batch)
    }
}
