//! The immutable settings every converter is called with.
use alloc::sync::Arc;
use serde::{Deserialize, Serialize};

/// Settings controlling how wire columns are reconstructed.
///
/// One value is captured when a [`TableIterator`](crate::table::TableIterator) is created
/// and handed by reference to every conversion, so no conversion observes session state.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Emit scaled fixed point columns as `Decimal128` instead of approximating them as `Float64`.
    number_to_decimal: bool,
    /// Zone label attached to local timestamps. It never changes the stored epoch values.
    session_timezone: Option<String>,
}

impl ConversionConfig {
    /// Creates the default configuration: doubles for scaled numbers, no session timezone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether scaled fixed point columns become exact decimals.
    #[must_use]
    pub fn with_number_to_decimal(mut self, number_to_decimal: bool) -> Self {
        self.number_to_decimal = number_to_decimal;
        self
    }

    /// Sets the zone label attached to local timestamp columns.
    #[must_use]
    pub fn with_session_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.session_timezone = Some(timezone.into());
        self
    }

    /// Whether scaled fixed point columns become exact decimals.
    #[must_use]
    pub fn number_to_decimal(&self) -> bool {
        self.number_to_decimal
    }

    /// The zone label attached to local timestamp columns, if any.
    #[must_use]
    pub fn session_timezone(&self) -> Option<Arc<str>> {
        self.session_timezone.as_deref().map(Arc::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_config_approximates_numbers_without_a_timezone() {
        let config = ConversionConfig::new();
        assert!(!config.number_to_decimal());
        assert_eq!(config.session_timezone(), None);
    }

    #[test]
    fn we_can_build_a_config() {
        let config = ConversionConfig::new()
            .with_number_to_decimal(true)
            .with_session_timezone("America/Los_Angeles");
        assert!(config.number_to_decimal());
        assert_eq!(
            config.session_timezone().as_deref(),
            Some("America/Los_Angeles")
        );
    }

    #[test]
    fn we_can_deserialize_a_partial_config() {
        let config: ConversionConfig =
            serde_json::from_str(r#"{"number_to_decimal": true}"#).unwrap();
        assert_eq!(config, ConversionConfig::new().with_number_to_decimal(true));

        let config: ConversionConfig =
            serde_json::from_str(r#"{"session_timezone": "Europe/Berlin"}"#).unwrap();
        assert_eq!(config.session_timezone().as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn we_can_round_trip_a_config_through_json() {
        let config = ConversionConfig::new()
            .with_number_to_decimal(true)
            .with_session_timezone("UTC");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            serde_json::from_str::<ConversionConfig>(&json).unwrap(),
            config
        );
    }
}
