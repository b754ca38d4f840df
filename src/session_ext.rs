//! `create_df`: build a DataFrame from literal rows and a compact
//! `(name, type, nullable)` schema, mostly for writing expected tables in tests.

use crate::dataframe::{DataFrame, Row};
use crate::error::EngineError;
use crate::schema::{DataType, StructField, StructType};
use crate::session::SparkSession;

pub trait SparkSessionExt {
    /// ```
    /// use serde_json::json;
    /// use sparkless_quinn::{DataType, SparkSession, SparkSessionExt};
    ///
    /// let spark = SparkSession::builder().app_name("doc").get_or_create();
    /// let df = spark
    ///     .create_df(
    ///         vec![vec![json!("jose"), json!(true)], vec![json!("luisa"), json!(null)]],
    ///         &[("name", DataType::String, true), ("has_stuff", DataType::Boolean, true)],
    ///     )
    ///     .unwrap();
    /// assert_eq!(df.count(), 2);
    /// ```
    fn create_df<R>(&self, rows: R, schema: &[(&str, DataType, bool)]) -> Result<DataFrame, EngineError>
    where
        R: IntoIterator<Item = Row>;
}

impl SparkSessionExt for SparkSession {
    fn create_df<R>(&self, rows: R, schema: &[(&str, DataType, bool)]) -> Result<DataFrame, EngineError>
    where
        R: IntoIterator<Item = Row>,
    {
        let struct_type: StructType = schema
            .iter()
            .map(|(name, data_type, nullable)| StructField::new(*name, data_type.clone(), *nullable))
            .collect();
        self.create_dataframe_from_rows(rows.into_iter().collect(), &struct_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spark() -> SparkSession {
        SparkSession::builder().app_name("session_ext").get_or_create()
    }

    #[test]
    fn create_df_follows_schema_order() {
        let df = spark()
            .create_df(
                vec![vec![json!(1), json!("a")]],
                &[("id", DataType::Integer, false), ("tag", DataType::String, true)],
            )
            .unwrap();
        assert_eq!(df.columns(), vec!["id", "tag"]);
        assert_eq!(df.schema().unwrap().fields()[0].data_type, DataType::Integer);
    }

    #[test]
    fn create_df_rejects_null_in_non_nullable_field() {
        let err = spark()
            .create_df(
                vec![vec![json!(null)]],
                &[("id", DataType::Integer, false)],
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::User(ref m) if m.contains("not nullable")));
    }

    #[test]
    fn create_df_rejects_wrong_arity() {
        let err = spark()
            .create_df(
                vec![vec![json!(1), json!(2)]],
                &[("id", DataType::Integer, true)],
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::User(_)));
    }

    #[test]
    fn create_df_rejects_type_mismatch() {
        let err = spark()
            .create_df(
                vec![vec![json!("seventeen")]],
                &[("age", DataType::Integer, true)],
            )
            .unwrap_err();
        assert!(err.to_string().contains("'age'"));
    }

    #[test]
    fn create_df_empty_rows_keeps_schema() {
        let df = spark()
            .create_df(Vec::<Row>::new(), &[("flag", DataType::Boolean, true)])
            .unwrap();
        assert_eq!(df.count(), 0);
        assert_eq!(df.schema().unwrap().fields()[0].data_type, DataType::Boolean);
    }
}
