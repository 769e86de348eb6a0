#![cfg(test)]
use arrow::{
    array::{Array, AsArray},
    datatypes::{
        DataType, Time32MillisecondType, Time64MicrosecondType, TimeUnit,
        TimestampMicrosecondType, TimestampMillisecondType, TimestampSecondType,
    },
};
use arrow_result_table::{
    base::{
        arrow::{wire_batch_utility::*, ColumnConversionError},
        config::ConversionConfig,
        time::TimeError,
    },
    table::{ArrowTable, TableError, TableIterator},
};
use chrono::DateTime;

// 2024-06-20T12:34:56Z
const INSTANT_SECONDS: i64 = 1_718_886_896;

fn convert(batch: arrow::array::RecordBatch, config: ConversionConfig) -> ArrowTable {
    TableIterator::new(vec![batch], config)
        .next()
        .unwrap()
        .unwrap()
}

#[test]
fn nanosecond_times_of_day_are_truncated_to_microseconds() {
    let table = convert(
        wire_batch([
            time("nanos", 9, [Some(1_123_456_789_i64), None]),
            time("millis", 3, [Some(45_296_789_i64), Some(0)]),
        ]),
        ConversionConfig::new(),
    );
    let batch = &table.batches()[0];
    assert_eq!(
        table.schema().field(0).data_type(),
        &DataType::Time64(TimeUnit::Microsecond)
    );
    let nanos = batch.column(0).as_primitive::<Time64MicrosecondType>();
    assert_eq!(nanos.value(0), 1_123_456);
    assert!(nanos.is_null(1));
    let millis = batch.column(1).as_primitive::<Time32MillisecondType>();
    assert_eq!(millis.values().to_vec(), vec![45_296_789, 0]);
}

#[test]
fn local_timestamps_take_the_session_label_without_shifting() {
    let config = ConversionConfig::new().with_session_timezone("America/Los_Angeles");
    let table = convert(
        wire_batch([
            timestamp_ltz("local", 3, [INSTANT_SECONDS * 1000 + 123]),
            timestamp_ntz("naive", 0, [INSTANT_SECONDS]),
        ]),
        config,
    );
    let batch = &table.batches()[0];
    assert_eq!(
        table.schema().field(0).data_type(),
        &DataType::Timestamp(TimeUnit::Millisecond, Some("America/Los_Angeles".into()))
    );
    let local = batch.column(0).as_primitive::<TimestampMillisecondType>();
    assert_eq!(local.value(0), INSTANT_SECONDS * 1000 + 123);
    assert_eq!(
        table.schema().field(1).data_type(),
        &DataType::Timestamp(TimeUnit::Second, None)
    );
    let naive = batch.column(1).as_primitive::<TimestampSecondType>();
    assert_eq!(naive.value(0), INSTANT_SECONDS);
}

#[test]
fn a_narrow_zoned_value_at_plus_two_hours_yields_its_utc_instant() {
    let values = [Some((INSTANT_SECONDS * 1_000_000 + 500, 1560_i32)), None];
    let table = convert(
        wire_batch([timestamp_tz_narrow("zoned", 6, values)]),
        ConversionConfig::new(),
    );
    assert_eq!(
        table.schema().field(0).data_type(),
        &DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
    );
    let zoned = table.batches()[0].column(0);
    let zoned = zoned.as_primitive::<TimestampMicrosecondType>();
    assert_eq!(zoned.value(0), INSTANT_SECONDS * 1_000_000 + 500);
    assert!(zoned.is_null(1));
    let utc = DateTime::from_timestamp_micros(zoned.value(0)).unwrap();
    assert_eq!(utc.to_rfc3339(), "2024-06-20T12:34:56.000500+00:00");
}

#[test]
fn wide_zoned_and_naive_values_combine_seconds_and_fractions() {
    let table = convert(
        wire_batch([
            timestamp_tz_wide("zoned", 9, [(INSTANT_SECONDS, 123_456_789_i32, 1140_i32)]),
            timestamp_ntz_wide("naive", 9, [Some((-1_i64, 999_999_999_i32))]),
        ]),
        ConversionConfig::new(),
    );
    let batch = &table.batches()[0];
    let zoned = batch.column(0).as_primitive::<TimestampMicrosecondType>();
    assert_eq!(zoned.value(0), INSTANT_SECONDS * 1_000_000 + 123_456);
    let naive = batch.column(1).as_primitive::<TimestampMicrosecondType>();
    assert_eq!(naive.value(0), -1);
}

#[test]
fn offsets_beyond_a_day_fail_the_whole_conversion() {
    let invalid = [(0_i64, 1440_i32), (0, 2881)];
    let mut iterator = TableIterator::new(
        vec![
            wire_batch([timestamp_tz_narrow("zoned", 0, [(0_i64, 1440_i32)])]),
            wire_batch([timestamp_tz_narrow("zoned", 0, invalid)]),
        ],
        ConversionConfig::new(),
    );
    assert!(matches!(
        iterator.next(),
        Some(Err(TableError::Conversion {
            batch: 1,
            source: ColumnConversionError::InvalidTemporalValue {
                row: 1,
                source: TimeError::InvalidTimezoneOffset { encoded: 2881 },
                ..
            }
        }))
    ));
}
