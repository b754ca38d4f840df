//! Shared helpers for integration tests (SparkSession setup and table assertions).

#![allow(dead_code)]

use sparkless_quinn::{DataFrame, SparkSession};

/// Create a SparkSession with a descriptive app name for tests.
pub fn spark() -> SparkSession {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    SparkSession::builder()
        .app_name("sparkless_quinn_tests")
        .get_or_create()
}

/// Assert two DataFrames hold the same columns, types and rows (in order, nulls included).
pub fn assert_df_equality(actual: &DataFrame, expected: &DataFrame) {
    assert_eq!(
        actual.schema().unwrap(),
        expected.schema().unwrap(),
        "schemas differ"
    );
    assert_eq!(
        actual.collect_rows().unwrap(),
        expected.collect_rows().unwrap(),
        "rows differ"
    );
}
