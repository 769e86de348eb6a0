use super::{EpochInstant, TimeError, TimeZoneOffset};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The byte layout of a zoned timestamp on the wire.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub enum ZonedEncoding {
    /// 8 bytes: an epoch count scaled by `10^scale` and a biased minute offset.
    Narrow,
    /// 16 bytes: epoch seconds, a nanosecond fraction and a biased minute offset.
    Wide,
}

impl ZonedEncoding {
    /// Name of the scaled (narrow) or whole second (wide) epoch sub-field.
    pub const EPOCH_FIELD: &'static str = "epoch";
    /// Name of the nanosecond fraction sub-field (wide only).
    pub const FRACTION_FIELD: &'static str = "fraction";
    /// Name of the biased minute offset sub-field.
    pub const TIMEZONE_FIELD: &'static str = "timezone";

    /// Byte width announced in the column metadata for this encoding.
    #[must_use]
    pub const fn byte_length(self) -> usize {
        match self {
            ZonedEncoding::Narrow => 8,
            ZonedEncoding::Wide => 16,
        }
    }

    /// Number of sub-fields in the struct carrying this encoding.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            ZonedEncoding::Narrow => 2,
            ZonedEncoding::Wide => 3,
        }
    }
}

impl TryFrom<usize> for ZonedEncoding {
    type Error = TimeError;

    fn try_from(byte_length: usize) -> Result<Self, Self::Error> {
        match byte_length {
            8 => Ok(ZonedEncoding::Narrow),
            16 => Ok(ZonedEncoding::Wide),
            _ => Err(TimeError::UnsupportedByteLength { byte_length }),
        }
    }
}

/// A decoded zoned wire value: the UTC instant and the offset it was recorded with.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZonedTimestamp {
    instant: EpochInstant,
    offset: TimeZoneOffset,
}

impl ZonedTimestamp {
    /// Decodes a narrow value: `epoch` counts `10^-scale` seconds since the unix epoch in UTC.
    ///
    /// # Errors
    /// Fails on an unsupported scale or an out of range offset.
    pub fn decode_narrow(epoch: i64, timezone: i32, scale: u8) -> Result<Self, TimeError> {
        Ok(Self {
            instant: EpochInstant::from_scaled(epoch, scale)?,
            offset: TimeZoneOffset::from_biased_minutes(timezone)?,
        })
    }

    /// Decodes a wide value from whole UTC seconds, a nanosecond fraction and the offset.
    ///
    /// # Errors
    /// Fails on an invalid fraction or an out of range offset.
    pub fn decode_wide(epoch: i64, fraction: i32, timezone: i32) -> Result<Self, TimeError> {
        Ok(Self {
            instant: EpochInstant::from_parts(epoch, fraction)?,
            offset: TimeZoneOffset::from_biased_minutes(timezone)?,
        })
    }

    /// The instant normalized to UTC. The offset takes no part in it.
    #[must_use]
    pub fn utc_instant(&self) -> EpochInstant {
        self.instant
    }

    /// The offset the value was recorded with.
    #[must_use]
    pub fn offset(&self) -> TimeZoneOffset {
        self.offset
    }

    /// The wall clock view of the value at its recorded offset.
    ///
    /// Returns `None` if the instant is outside chrono's range or the offset is a full day.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let utc = DateTime::from_timestamp(self.instant.seconds(), self.instant.subsec_nanos())?;
        Some(utc.with_timezone(&self.offset.to_fixed_offset()?))
    }
}
