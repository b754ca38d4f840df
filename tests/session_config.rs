//! Session configuration and case sensitivity as seen through `create_df`.

mod common;

use serde_json::json;
use sparkless_quinn::{col, ColumnExt, DataType, EngineError, SparkSession, SparkSessionExt, SparklessConfig};

fn ages(spark: &SparkSession) -> sparkless_quinn::DataFrame {
    spark
        .create_df(
            vec![vec![json!(1), json!(5)], vec![json!(9), json!(null)]],
            &[("Lower", DataType::Integer, true), ("Age", DataType::Integer, true)],
        )
        .unwrap()
}

#[test]
fn default_session_resolves_columns_case_insensitively() {
    let spark = common::spark();
    let df = ages(&spark);
    let lower = df.column("lower").unwrap();
    let age = df.column("AGE").unwrap();
    assert_eq!(lower.name(), "Lower");

    let out = df
        .with_column("ok", &age.null_between(&lower, &col("Age")))
        .unwrap();
    assert_eq!(
        out.select(vec!["ok"]).unwrap().collect_rows().unwrap(),
        vec![vec![json!(true)], vec![json!(false)]]
    );
}

#[test]
fn case_sensitive_config_rejects_wrong_case() {
    let config = SparklessConfig::from_json_str(
        r#"{"app_name": "strict", "case_sensitive": true, "extra": {"spark.master": "local"}}"#,
    )
    .unwrap();
    let spark = SparkSession::from_config(&config);
    assert_eq!(spark.app_name(), Some("strict"));
    assert_eq!(spark.get_config("spark.master"), Some("local"));

    let df = ages(&spark);
    assert!(matches!(df.column("age"), Err(EngineError::NotFound(_))));
    assert!(df.column("Age").is_ok());
}

#[test]
fn collect_as_json_rows_is_keyed_by_column() {
    let spark = common::spark();
    let rows = ages(&spark).collect_as_json_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("Lower"), Some(&json!(9)));
    assert_eq!(rows[1].get("Age"), Some(&json!(null)));
}
