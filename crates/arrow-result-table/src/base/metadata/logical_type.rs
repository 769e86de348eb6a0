use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// The logical type a wire column declares in its `logicalType` metadata entry.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogicalType {
    /// Integers scaled by `10^scale`
    Fixed,
    /// Double precision floats
    Real,
    /// UTF-8 text
    Text,
    /// Fixed length UTF-8 text
    Char,
    /// Opaque bytes
    Binary,
    /// Booleans
    Boolean,
    /// Days since the unix epoch
    Date,
    /// Scaled time of day
    Time,
    /// Scaled timestamp without a timezone
    TimestampNtz,
    /// Scaled timestamp in the session timezone
    TimestampLtz,
    /// Scaled timestamp with a per-value offset
    TimestampTz,
    /// Semi-structured value serialized as text
    Variant,
    /// Semi-structured object serialized as text
    Object,
    /// Semi-structured array serialized as text
    Array,
    /// Structured map
    Map,
    /// Fixed size numeric vector
    Vector,
    /// Untyped value
    Any,
    /// Geospatial value on a sphere
    Geography,
    /// Geospatial value on a plane
    Geometry,
}

impl LogicalType {
    /// The tag used in the column metadata.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            LogicalType::Fixed => "FIXED",
            LogicalType::Real => "REAL",
            LogicalType::Text => "TEXT",
            LogicalType::Char => "CHAR",
            LogicalType::Binary => "BINARY",
            LogicalType::Boolean => "BOOLEAN",
            LogicalType::Date => "DATE",
            LogicalType::Time => "TIME",
            LogicalType::TimestampNtz => "TIMESTAMP_NTZ",
            LogicalType::TimestampLtz => "TIMESTAMP_LTZ",
            LogicalType::TimestampTz => "TIMESTAMP_TZ",
            LogicalType::Variant => "VARIANT",
            LogicalType::Object => "OBJECT",
            LogicalType::Array => "ARRAY",
            LogicalType::Map => "MAP",
            LogicalType::Vector => "VECTOR",
            LogicalType::Any => "ANY",
            LogicalType::Geography => "GEOGRAPHY",
            LogicalType::Geometry => "GEOMETRY",
        }
    }
}

/// Error for a `logicalType` tag no variant of [`LogicalType`] answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogicalType(pub String);

impl FromStr for LogicalType {
    type Err = UnknownLogicalType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "FIXED" => Ok(LogicalType::Fixed),
            "REAL" => Ok(LogicalType::Real),
            "TEXT" => Ok(LogicalType::Text),
            "CHAR" => Ok(LogicalType::Char),
            "BINARY" => Ok(LogicalType::Binary),
            "BOOLEAN" => Ok(LogicalType::Boolean),
            "DATE" => Ok(LogicalType::Date),
            "TIME" => Ok(LogicalType::Time),
            "TIMESTAMP" | "TIMESTAMP_NTZ" => Ok(LogicalType::TimestampNtz),
            "TIMESTAMP_LTZ" => Ok(LogicalType::TimestampLtz),
            "TIMESTAMP_TZ" => Ok(LogicalType::TimestampTz),
            "VARIANT" => Ok(LogicalType::Variant),
            "OBJECT" => Ok(LogicalType::Object),
            "ARRAY" => Ok(LogicalType::Array),
            "MAP" => Ok(LogicalType::Map),
            "VECTOR" => Ok(LogicalType::Vector),
            "ANY" => Ok(LogicalType::Any),
            "GEOGRAPHY" => Ok(LogicalType::Geography),
            "GEOMETRY" => Ok(LogicalType::Geometry),
            _ => Err(UnknownLogicalType(tag.to_string())),
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LogicalType; 19] = [
        LogicalType::Fixed,
        LogicalType::Real,
        LogicalType::Text,
        LogicalType::Char,
        LogicalType::Binary,
        LogicalType::Boolean,
        LogicalType::Date,
        LogicalType::Time,
        LogicalType::TimestampNtz,
        LogicalType::TimestampLtz,
        LogicalType::TimestampTz,
        LogicalType::Variant,
        LogicalType::Object,
        LogicalType::Array,
        LogicalType::Map,
        LogicalType::Vector,
        LogicalType::Any,
        LogicalType::Geography,
        LogicalType::Geometry,
    ];

    #[test]
    fn every_tag_parses_back_to_its_type() {
        for logical_type in ALL {
            assert_eq!(logical_type.tag().parse(), Ok(logical_type));
        }
    }

    #[test]
    fn tags_are_case_insensitive_and_timestamp_means_ntz() {
        assert_eq!("fixed".parse(), Ok(LogicalType::Fixed));
        assert_eq!(" Timestamp_Tz ".parse(), Ok(LogicalType::TimestampTz));
        assert_eq!("TIMESTAMP".parse(), Ok(LogicalType::TimestampNtz));
    }

    #[test]
    fn we_cannot_parse_unknown_tags() {
        assert_eq!(
            "DECIMAL".parse::<LogicalType>(),
            Err(UnknownLogicalType("DECIMAL".to_string()))
        );
        assert!("".parse::<LogicalType>().is_err());
    }
}
