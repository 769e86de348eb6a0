use serde::{Deserialize, Deserializer, Serialize};
use snafu::Snafu;

#[derive(Snafu, Debug, Eq, PartialEq)]
#[snafu(display("Decimal precision is not valid: {precision}"))]
/// Decimal precision exceeds the `Decimal128` limit of 38 digits
/// or is non-positive aka `InvalidPrecision`
pub struct InvalidPrecisionError {
    precision: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Copy)]
/// limit-enforced precision
pub struct Precision(u8);
pub(crate) const MAX_SUPPORTED_PRECISION: u8 = 38;

impl Precision {
    /// Constructor for creating a Precision instance
    pub fn new(value: u8) -> Result<Self, InvalidPrecisionError> {
        if value > MAX_SUPPORTED_PRECISION || value == 0 {
            Err(InvalidPrecisionError {
                precision: value.to_string(),
            })
        } else {
            Ok(Precision(value))
        }
    }

    /// The widest precision a `Decimal128` column can carry.
    #[must_use]
    pub const fn max() -> Self {
        Precision(MAX_SUPPORTED_PRECISION)
    }

    /// Gets the precision as a u8 for this decimal
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::max()
    }
}

impl TryFrom<i64> for Precision {
    type Error = InvalidPrecisionError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Precision::new(value.try_into().map_err(|_| InvalidPrecisionError {
            precision: value.to_string(),
        })?)
    }
}

// Custom deserializer for precision since we need to limit its value to 38
impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D>(deserializer: D) -> Result<Precision, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Precision::new(value).map_err(serde::de::Error::custom)
    }
}
