//! Converts a few hand-built wire batches and prints the resulting table.
//!
//! Run with `RUST_LOG=debug` to see the planned column conversions.
use arrow::util::pretty::pretty_format_batches;
use arrow_result_table::{
    base::{
        arrow::wire_batch_utility::{
            fixed, text, time, timestamp_ltz, timestamp_tz_narrow, timestamp_tz_wide, wire_batch,
        },
        config::ConversionConfig,
    },
    table::TableIterator,
};
use tracing_subscriber::EnvFilter;

// 2024-06-20T12:34:56Z
const INSTANT_SECONDS: i64 = 1_718_886_896;
const INSTANT_MILLIS: i64 = INSTANT_SECONDS * 1000;

/// # Panics
///
/// - Will panic if the hand-built batches fail to convert.
/// - Will panic if the table cannot be rendered.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let recorded = [(INSTANT_SECONDS, 1560_i32), (INSTANT_SECONDS, 1500_i32)];
    let batches = vec![
        wire_batch([
            text("city", ["Berlin", "Lagos"]),
            fixed("price", 12, 2, [Some(12_345_i64), None]),
            time("opens", 9, [32_400_123_456_789_i64, 28_800_000_000_000]),
            timestamp_ltz("seen", 3, [INSTANT_MILLIS, INSTANT_MILLIS + 1]),
            timestamp_tz_narrow("recorded", 0, recorded),
        ]),
        wire_batch([
            text("city", ["Lima"]),
            fixed("price", 12, 2, [-5_i64]),
            time("opens", 9, [0_i64]),
            timestamp_ltz("seen", 3, [0_i64]),
            timestamp_tz_narrow("recorded", 0, [(0_i64, 1140_i32)]),
        ]),
    ];
    let config = ConversionConfig::new()
        .with_number_to_decimal(true)
        .with_session_timezone("Europe/Berlin");
    let mut iterator = TableIterator::new(batches, config);

    let table = iterator.next().unwrap().unwrap();
    println!("{}", pretty_format_batches(table.batches()).unwrap());
    println!(
        "{} rows, {} columns, {} column-batch descriptors",
        table.num_rows(),
        table.num_columns(),
        iterator.array_handles().unwrap().len()
    );

    let precise = timestamp_tz_wide("precise", 9, [(INSTANT_SECONDS, 123_456_789_i32, 1440_i32)]);
    let wide = wire_batch([precise]);
    let table = TableIterator::new(vec![wide], ConversionConfig::new())
        .next()
        .unwrap()
        .unwrap();
    println!("{}", pretty_format_batches(table.batches()).unwrap());
    assert!(iterator.next().is_none());
}
