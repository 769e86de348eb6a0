use super::{ColumnMetadataError, LogicalType};
use crate::base::math::Precision;
use arrow::datatypes::Field;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field metadata key holding the [`LogicalType`] tag.
pub const LOGICAL_TYPE_KEY: &str = "logicalType";
/// Field metadata key holding the scale.
pub const SCALE_KEY: &str = "scale";
/// Field metadata key holding the decimal precision.
pub const PRECISION_KEY: &str = "precision";
/// Field metadata key holding the encoded byte width.
pub const BYTE_LENGTH_KEY: &str = "byteLength";

/// The side-channel description of one wire column, read from its arrow [`Field`] metadata.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnMetadata {
    logical_type: LogicalType,
    scale: u8,
    precision: Option<Precision>,
    byte_length: Option<usize>,
}

impl ColumnMetadata {
    /// Metadata with the given logical type, scale 0 and no precision or byte length.
    #[must_use]
    pub fn new(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            scale: 0,
            precision: None,
            byte_length: None,
        }
    }

    /// Sets the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the decimal precision.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the encoded byte width.
    #[must_use]
    pub fn with_byte_length(mut self, byte_length: usize) -> Self {
        self.byte_length = Some(byte_length);
        self
    }

    /// Reads the metadata of `field`. A missing scale means scale 0.
    ///
    /// # Errors
    /// Fails if the logical type is missing or unknown, or a numeric entry does not parse.
    pub fn try_from_field(field: &Field) -> Result<Self, ColumnMetadataError> {
        let metadata = field.metadata();
        let column = field.name();
        let tag = metadata
            .get(LOGICAL_TYPE_KEY)
            .ok_or_else(|| ColumnMetadataError::MissingLogicalType {
                column: column.clone(),
            })?;
        let Ok(logical_type) = tag.parse::<LogicalType>() else {
            return Err(ColumnMetadataError::UnknownLogicalType {
                column: column.clone(),
                tag: tag.clone(),
            });
        };

        let invalid = |key: &'static str, value: &String| ColumnMetadataError::InvalidValue {
            column: column.clone(),
            key,
            value: value.clone(),
        };
        let scale = metadata
            .get(SCALE_KEY)
            .map(|value| {
                value
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| invalid(SCALE_KEY, value))
            })
            .transpose()?
            .unwrap_or_default();
        let precision = metadata
            .get(PRECISION_KEY)
            .map(|value| {
                value
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|precision| Precision::try_from(precision).ok())
                    .ok_or_else(|| invalid(PRECISION_KEY, value))
            })
            .transpose()?;
        let byte_length = metadata
            .get(BYTE_LENGTH_KEY)
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(BYTE_LENGTH_KEY, value))
            })
            .transpose()?;

        Ok(Self {
            logical_type,
            scale,
            precision,
            byte_length,
        })
    }

    /// Renders the metadata as arrow field metadata, the inverse of [`Self::try_from_field`].
    #[must_use]
    pub fn to_field_metadata(&self) -> HashMap<String, String> {
        let mut metadata = HashMap::from([
            (
                LOGICAL_TYPE_KEY.to_string(),
                self.logical_type.tag().to_string(),
            ),
            (SCALE_KEY.to_string(), self.scale.to_string()),
        ]);
        if let Some(precision) = self.precision {
            metadata.insert(PRECISION_KEY.to_string(), precision.value().to_string());
        }
        if let Some(byte_length) = self.byte_length {
            metadata.insert(BYTE_LENGTH_KEY.to_string(), byte_length.to_string());
        }
        metadata
    }

    /// The declared logical type.
    #[must_use]
    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    /// Number of fractional digits of the integer encoding.
    #[must_use]
    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// The declared decimal precision, if any.
    #[must_use]
    pub fn precision(&self) -> Option<Precision> {
        self.precision
    }

    /// The declared encoded byte width, if any.
    #[must_use]
    pub fn byte_length(&self) -> Option<usize> {
        self.byte_length
    }
}
