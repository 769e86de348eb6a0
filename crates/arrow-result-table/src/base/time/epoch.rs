use super::{TimeError, TimeUnit, MAX_TEMPORAL_SCALE};
use crate::base::math::scaled_number::pow10;
use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// An exact point on a time axis, split into whole seconds and a non-negative
/// nanosecond remainder.
///
/// The axis is the unix epoch for timestamps and midnight for times of day.
/// Negative instants keep a non-negative remainder, so `-0.5s` is `(-1, 500_000_000)`.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochInstant {
    seconds: i64,
    nanos: u32,
}

impl EpochInstant {
    /// Decomposes a count of `10^-scale` second units.
    ///
    /// # Errors
    /// Fails for scales above nanoseconds.
    pub fn from_scaled(value: i64, scale: u8) -> Result<Self, TimeError> {
        let units_per_second = (scale <= MAX_TEMPORAL_SCALE)
            .then(|| pow10(scale.into()))
            .flatten()
            .ok_or(TimeError::UnsupportedScale { scale })?;
        let fraction = value.rem_euclid(units_per_second);
        let nanos_per_unit = NANOS_PER_SECOND / units_per_second;
        Ok(Self::new_unchecked(
            value.div_euclid(units_per_second),
            fraction * nanos_per_unit,
        ))
    }

    /// Builds an instant from whole seconds and a nanosecond fraction sub-field.
    ///
    /// # Errors
    /// Fails if the fraction is negative or not below one second.
    pub fn from_parts(seconds: i64, fraction: i32) -> Result<Self, TimeError> {
        if (0..1_000_000_000).contains(&fraction) {
            Ok(Self::new_unchecked(seconds, fraction.into()))
        } else {
            Err(TimeError::InvalidFraction { fraction })
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn new_unchecked(seconds: i64, nanos: i64) -> Self {
        debug_assert!((0..NANOS_PER_SECOND).contains(&nanos));
        Self {
            seconds,
            nanos: nanos as u32,
        }
    }

    /// Whole seconds, rounded towards negative infinity.
    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds past [`Self::seconds`].
    #[must_use]
    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// The instant counted in `unit`s. Digits finer than `unit` are truncated, never rounded.
    ///
    /// Returns `None` when the count does not fit in an `i64`.
    #[must_use]
    pub fn to_unit(&self, unit: TimeUnit) -> Option<i64> {
        let digits = u32::from(unit.digits());
        let nanos_per_unit = pow10(u32::from(MAX_TEMPORAL_SCALE) - digits)?;
        let units = i128::from(self.seconds) * i128::from(pow10(digits)?)
            + i128::from(i64::from(self.nanos) / nanos_per_unit);
        i64::try_from(units).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn we_can_decompose_scaled_values() {
        let instant = EpochInstant::from_scaled(1_123_456_789, 9).unwrap();
        assert_eq!(instant.seconds(), 1);
        assert_eq!(instant.subsec_nanos(), 123_456_789);

        let instant = EpochInstant::from_scaled(12_345, 3).unwrap();
        assert_eq!(instant.seconds(), 12);
        assert_eq!(instant.subsec_nanos(), 345_000_000);

        let instant = EpochInstant::from_scaled(42, 0).unwrap();
        assert_eq!(instant.seconds(), 42);
        assert_eq!(instant.subsec_nanos(), 0);
    }

    #[test]
    fn negative_values_keep_a_non_negative_remainder() {
        let instant = EpochInstant::from_scaled(-500, 3).unwrap();
        assert_eq!(instant.seconds(), -1);
        assert_eq!(instant.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn nanoseconds_truncate_to_microseconds() {
        let instant = EpochInstant::from_scaled(1_123_456_789, 9).unwrap();
        assert_eq!(instant.to_unit(TimeUnit::Microsecond), Some(1_123_456));
        let instant = EpochInstant::from_scaled(1_999_999_999, 9).unwrap();
        assert_eq!(instant.to_unit(TimeUnit::Microsecond), Some(1_999_999));
        assert_eq!(instant.to_unit(TimeUnit::Second), Some(1));
    }

    #[test]
    fn pre_epoch_truncation_moves_to_the_earlier_instant() {
        let instant = EpochInstant::from_scaled(-1_500, 9).unwrap();
        assert_eq!(instant.to_unit(TimeUnit::Microsecond), Some(-2));
    }

    #[test]
    fn coarse_scales_widen_exactly() {
        let instant = EpochInstant::from_scaled(12_345, 2).unwrap();
        assert_eq!(instant.to_unit(TimeUnit::Millisecond), Some(123_450));
        assert_eq!(instant.to_unit(TimeUnit::Microsecond), Some(123_450_000));
    }

    #[test]
    fn we_report_overflowing_units() {
        let instant = EpochInstant::from_parts(i64::MAX / 10, 0).unwrap();
        assert_eq!(instant.to_unit(TimeUnit::Microsecond), None);
        assert!(instant.to_unit(TimeUnit::Second).is_some());
    }

    #[test]
    fn we_can_build_instants_from_parts() {
        let instant = EpochInstant::from_parts(1_700_000_000, 987_654_321).unwrap();
        assert_eq!(
            instant.to_unit(TimeUnit::Microsecond),
            Some(1_700_000_000_987_654)
        );
        assert_eq!(
            EpochInstant::from_parts(0, 1_000_000_000),
            Err(TimeError::InvalidFraction {
                fraction: 1_000_000_000,
            })
        );
        assert!(EpochInstant::from_parts(0, -1).is_err());
    }

    #[test]
    fn we_cannot_decompose_scales_beyond_nanoseconds() {
        assert_eq!(
            EpochInstant::from_scaled(1, 10),
            Err(TimeError::UnsupportedScale { scale: 10 })
        );
    }

    proptest! {
        #[test]
        fn same_unit_round_trips_exactly(value: i64, scale in 0_u8..=6) {
            let unit = TimeUnit::target_for_scale(scale).unwrap();
            let instant = EpochInstant::from_scaled(value, scale).unwrap();
            let widened = instant.to_unit(unit);
            let factor = pow10(u32::from(unit.digits() - scale)).unwrap();
            prop_assert_eq!(widened, value.checked_mul(factor));
        }
    }
}
