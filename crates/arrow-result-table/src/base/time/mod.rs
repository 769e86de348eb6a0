//! Decoding of scaled wire temporal values into exact instants and offsets.
/// Error module to store all errors related to decoding wire time values
mod error;
#[allow(clippy::module_name_repetitions)]
pub use error::TimeError;

mod epoch;
pub use epoch::EpochInstant;

/// Stores the target resolutions of reconstructed temporal columns
mod unit;
#[allow(clippy::module_name_repetitions)]
pub use unit::{TimeUnit, MAX_TEMPORAL_SCALE};

/// Stores functionality relevant to per-value timezone offsets
mod timezone;
#[allow(clippy::module_name_repetitions)]
pub use timezone::{TimeZoneOffset, TIMEZONE_OFFSET_BIAS_MINUTES};

mod zoned;
pub use zoned::{ZonedEncoding, ZonedTimestamp};
