use super::TimeError;
use chrono::FixedOffset;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Bias added to the minute offset stored in the timezone sub-field of zoned values.
pub const TIMEZONE_OFFSET_BIAS_MINUTES: i32 = 1440;

/// A fixed offset from UTC carried by a zoned wire value
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeZoneOffset {
    offset: i32,
}

impl TimeZoneOffset {
    /// Create an offset from a count of seconds
    #[must_use]
    pub const fn new(offset: i32) -> Self {
        TimeZoneOffset { offset }
    }
    #[must_use]
    /// The UTC offset
    pub const fn utc() -> Self {
        TimeZoneOffset::new(0)
    }
    /// Get the underlying offset in seconds
    #[must_use]
    pub const fn offset(self) -> i32 {
        self.offset
    }

    /// Decodes the biased minute count of a timezone sub-field, e.g. `1560` is `+02:00`.
    ///
    /// # Errors
    /// Fails when the decoded offset is more than a day away from UTC.
    pub fn from_biased_minutes(encoded: i32) -> Result<Self, TimeError> {
        let minutes = encoded
            .checked_sub(TIMEZONE_OFFSET_BIAS_MINUTES)
            .filter(|minutes| minutes.abs() <= TIMEZONE_OFFSET_BIAS_MINUTES)
            .ok_or(TimeError::InvalidTimezoneOffset { encoded })?;
        Ok(TimeZoneOffset::new(minutes * 60))
    }

    /// The offset as a chrono [`FixedOffset`], if chrono accepts it (strictly less than a day).
    #[must_use]
    pub fn to_fixed_offset(self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.offset)
    }
}

impl fmt::Display for TimeZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.offset();
        let hours = seconds / 3600;
        let minutes = (seconds.abs() % 3600) / 60;
        if seconds < 0 {
            write!(f, "-{:02}:{:02}", hours.abs(), minutes)
        } else {
            write!(f, "+{hours:02}:{minutes:02}")
        }
    }
}
