//! Conversion of scaled fixed-point integers into floating point values.
//!
//! A scaled integer `v` with scale `s` stands for the decimal number `v / 10^s`.
//! Small scales are divided directly by an exactly representable power of ten.
//! From [`DIRECT_DIVISION_SCALE_LIMIT`] upwards the integer is rendered to its decimal
//! string and parsed, so the result is the correctly rounded `f64` of the exact decimal.
use core::{iter, num::ParseFloatError};

/// Scales strictly below this limit use direct division.
pub const DIRECT_DIVISION_SCALE_LIMIT: u8 = 9;

const POWERS_OF_TEN_F64: [f64; DIRECT_DIVISION_SCALE_LIMIT as usize] = [
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
];

/// `10^exponent` as an `i64`, or `None` if it does not fit.
#[must_use]
pub const fn pow10(exponent: u32) -> Option<i64> {
    10_i64.checked_pow(exponent)
}

/// `10^exponent` as an `i128`, or `None` if it does not fit.
#[must_use]
pub const fn pow10_i128(exponent: u32) -> Option<i128> {
    10_i128.checked_pow(exponent)
}

/// Renders `value` as a decimal string with `scale` fractional digits.
///
/// Values with fewer digits than `scale` are left-padded with zeros, so
/// `render_scaled(-5, 3)` is `"-0.005"`.
#[must_use]
pub fn render_scaled(value: i128, scale: u8) -> String {
    let digits = value.unsigned_abs().to_string();
    let scale = usize::from(scale);
    let mut rendered = String::with_capacity(digits.len() + scale + 3);
    if value < 0 {
        rendered.push('-');
    }
    if digits.len() <= scale {
        rendered.push_str("0.");
        rendered.extend(iter::repeat_n('0', scale - digits.len()));
        rendered.push_str(&digits);
    } else {
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        rendered.push_str(whole);
        if !fraction.is_empty() {
            rendered.push('.');
            rendered.push_str(fraction);
        }
    }
    rendered
}

/// Converts the scaled integer `value` with `scale` fractional digits to `f64`.
///
/// # Errors
/// Only fails if the rendered decimal string is rejected by the float parser.
#[allow(clippy::cast_precision_loss)]
pub fn scaled_to_f64(value: i128, scale: u8) -> Result<f64, ParseFloatError> {
    if scale < DIRECT_DIVISION_SCALE_LIMIT {
        Ok(value as f64 / POWERS_OF_TEN_F64[usize::from(scale)])
    } else {
        render_scaled(value, scale).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn we_can_render_scaled_values() {
        assert_eq!(render_scaled(12345, 2), "123.45");
        assert_eq!(render_scaled(-12345, 2), "-123.45");
        assert_eq!(render_scaled(100, 2), "1.00");
        assert_eq!(render_scaled(7, 0), "7");
        assert_eq!(render_scaled(0, 0), "0");
    }

    #[test]
    fn we_left_pad_values_shorter_than_the_scale() {
        assert_eq!(render_scaled(0, 2), "0.00");
        assert_eq!(render_scaled(5, 3), "0.005");
        assert_eq!(render_scaled(-5, 3), "-0.005");
        assert_eq!(render_scaled(123, 3), "0.123");
        assert_eq!(render_scaled(-123, 3), "-0.123");
    }

    #[test]
    fn we_can_render_extreme_values() {
        assert_eq!(
            render_scaled(i128::MIN, 38),
            "-1.70141183460469231731687303715884105728"
        );
        assert_eq!(
            render_scaled(i128::MAX, 0),
            "170141183460469231731687303715884105727"
        );
    }

    #[test]
    fn small_scales_divide_directly() {
        assert_eq!(scaled_to_f64(12345, 2).unwrap(), 123.45);
        assert_eq!(scaled_to_f64(-12345, 2).unwrap(), -123.45);
        assert_eq!(scaled_to_f64(0, 8).unwrap(), 0.0);
        assert_eq!(scaled_to_f64(1, 8).unwrap(), 1e-8);
    }

    #[test]
    fn large_scales_parse_the_exact_decimal() {
        let value = 123_456_789_012_345_678_i128;
        assert_eq!(
            scaled_to_f64(value, 17).unwrap(),
            "1.23456789012345678".parse::<f64>().unwrap()
        );
        assert_eq!(scaled_to_f64(-value, 17).unwrap(), -1.234_567_890_123_456_7);
    }

    #[allow(clippy::cast_precision_loss)]
    #[test]
    fn naive_division_loses_information_the_string_path_keeps() {
        let value = 111_111_111_111_111_111_i128;
        let naive = value as f64 / 1e17;
        let converted = scaled_to_f64(value, 17).unwrap();
        assert_eq!(converted, 1.111_111_111_111_111_2);
        assert_eq!(naive, 1.111_111_111_111_111);
        assert_ne!(converted, naive);

        let value = 123_456_789_012_345_678_i128;
        let naive = value as f64 / 1e9;
        let converted = scaled_to_f64(value, 9).unwrap();
        assert_eq!(converted, "123456789.012345678".parse::<f64>().unwrap());
        assert_ne!(converted, naive);
    }

    #[test]
    fn values_with_fewer_digits_than_the_scale_convert() {
        assert_eq!(scaled_to_f64(5, 12).unwrap(), 5e-12);
        assert_eq!(scaled_to_f64(-5, 12).unwrap(), -5e-12);
        assert_eq!(scaled_to_f64(0, 20).unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn direct_division_agrees_with_the_exact_decimal_for_exact_integers(
            value in -(1_i64 << 53)..(1_i64 << 53),
            scale in 0_u8..DIRECT_DIVISION_SCALE_LIMIT,
        ) {
            let exact: f64 = render_scaled(i128::from(value), scale).parse().unwrap();
            prop_assert_eq!(scaled_to_f64(i128::from(value), scale).unwrap(), exact);
        }
    }
}
