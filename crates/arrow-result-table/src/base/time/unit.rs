use super::TimeError;
use arrow::datatypes::{DataType, TimeUnit as ArrowTimeUnit};
use core::fmt;
use serde::{Deserialize, Serialize};

/// The largest scale a temporal wire value may carry (nanoseconds).
pub const MAX_TEMPORAL_SCALE: u8 = 9;

/// The resolution a reconstructed temporal column is emitted at.
///
/// Reconstructed columns are never finer than microseconds, so wire digits beyond
/// [`TimeUnit::Microsecond`] are truncated by the converters.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeUnit {
    /// Represents seconds with precision 0: ex "12:34:56"
    Second,
    /// Represents milliseconds with precision 3: ex "12:34:56.123"
    Millisecond,
    /// Represents microseconds with precision 6: ex "12:34:56.123456"
    Microsecond,
}

impl TimeUnit {
    /// Number of fractional second digits of this unit.
    #[must_use]
    pub const fn digits(self) -> u8 {
        match self {
            TimeUnit::Second => 0,
            TimeUnit::Millisecond => 3,
            TimeUnit::Microsecond => 6,
        }
    }

    /// The unit a column with `scale` is reconstructed at: the coarsest unit holding every
    /// digit of `scale`, capped at microseconds.
    ///
    /// # Errors
    /// Fails for scales above nanoseconds.
    pub fn target_for_scale(scale: u8) -> Result<Self, TimeError> {
        match scale {
            0 => Ok(TimeUnit::Second),
            1..=3 => Ok(TimeUnit::Millisecond),
            4..=MAX_TEMPORAL_SCALE => Ok(TimeUnit::Microsecond),
            _ => Err(TimeError::UnsupportedScale { scale }),
        }
    }

    /// The arrow type of a time-of-day column at this unit.
    #[must_use]
    pub fn time_data_type(self) -> DataType {
        match self {
            TimeUnit::Second | TimeUnit::Millisecond => DataType::Time32(self.into()),
            TimeUnit::Microsecond => DataType::Time64(self.into()),
        }
    }
}

impl From<TimeUnit> for ArrowTimeUnit {
    fn from(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Second => ArrowTimeUnit::Second,
            TimeUnit::Millisecond => ArrowTimeUnit::Millisecond,
            TimeUnit::Microsecond => ArrowTimeUnit::Microsecond,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Second => write!(f, "seconds (precision: 0)"),
            TimeUnit::Millisecond => write!(f, "milliseconds (precision: 3)"),
            TimeUnit::Microsecond => write!(f, "microseconds (precision: 6)"),
        }
    }
}
