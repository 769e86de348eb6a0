use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Errors related to decoding wire time values, including scales, offsets and encodings.
#[allow(clippy::module_name_repetitions)]
#[derive(Snafu, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TimeError {
    /// The scale of a temporal column cannot be represented by any supported time unit.
    #[snafu(display("unsupported scale for temporal value: {scale}"))]
    UnsupportedScale {
        /// The scale found in the column metadata
        scale: u8,
    },

    /// The biased minute offset of a zoned value lies outside of a day in either direction.
    #[snafu(display("invalid timezone offset: {encoded} (biased minutes)"))]
    InvalidTimezoneOffset {
        /// The raw value of the timezone sub-field
        encoded: i32,
    },

    /// The byte width of a zoned timestamp does not name a known encoding.
    #[snafu(display("unsupported zoned timestamp byte length: {byte_length}"))]
    UnsupportedByteLength {
        /// The byte length found in the column metadata
        byte_length: usize,
    },

    /// A nanosecond fraction sub-field is negative or not below one second.
    #[snafu(display("invalid nanosecond fraction: {fraction}"))]
    InvalidFraction {
        /// The raw value of the fraction sub-field
        fraction: i32,
    },
}

// This exists because conversion errors carry a rendered reason
impl From<TimeError> for String {
    fn from(error: TimeError) -> Self {
        error.to_string()
    }
}
