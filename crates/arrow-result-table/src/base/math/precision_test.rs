use crate::base::math::Precision;
use serde_json;

#[test]
fn we_can_deserialize_valid_precision() {
    let json = "18";
    let precision: Result<Precision, _> = serde_json::from_str(json);
    assert_eq!(precision.unwrap().value(), 18);
}

#[test]
fn we_can_deserialize_valid_precision_inclusive() {
    let json = "38";
    let precision: Result<Precision, _> = serde_json::from_str(json);
    assert_eq!(precision.unwrap().value(), 38);
}

#[test]
fn we_cannot_deserialize_invalid_precision() {
    let json = "39";
    let precision: Result<Precision, _> = serde_json::from_str(json);
    assert!(precision.is_err());
}

#[test]
fn we_cannot_create_a_zero_precision() {
    assert!(Precision::new(0).is_err());
    assert!(Precision::try_from(-3_i64).is_err());
    assert!(Precision::try_from(300_i64).is_err());
}

#[test]
fn the_default_precision_is_the_widest_decimal128_precision() {
    assert_eq!(Precision::default(), Precision::max());
    assert_eq!(Precision::default().value(), 38);
}
