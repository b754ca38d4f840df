//! DataFrame module: main tabular type plus the row-level helpers used to
//! compare results with expected tables.

mod transformations;

use crate::column::Column;
use crate::error::EngineError;
use crate::schema::StructType;
use polars::prelude::{AnyValue, DataFrame as PlDataFrame, Expr};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Default for `spark.sql.caseSensitive` (PySpark default is false = case-insensitive).
pub(crate) const DEFAULT_CASE_SENSITIVE: bool = false;

/// One collected row, values in column order.
pub type Row = Vec<JsonValue>;

/// DataFrame - main tabular data structure.
/// Thin wrapper around an eager Polars `DataFrame`.
#[derive(Clone)]
pub struct DataFrame {
    pub(crate) df: Arc<PlDataFrame>,
    /// When false (default), column names are matched case-insensitively (PySpark behavior).
    pub(crate) case_sensitive: bool,
}

impl DataFrame {
    /// Create a new DataFrame from a Polars DataFrame (case-insensitive column matching by default).
    pub fn from_polars(df: PlDataFrame) -> Self {
        Self::from_polars_with_options(df, DEFAULT_CASE_SENSITIVE)
    }

    pub fn from_polars_with_options(df: PlDataFrame, case_sensitive: bool) -> Self {
        DataFrame {
            df: Arc::new(df),
            case_sensitive,
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Resolve a logical column name to the actual column name in the schema.
    /// When case_sensitive is false, matches case-insensitively.
    pub fn resolve_column_name(&self, name: &str) -> Result<String, EngineError> {
        let names = self.df.get_column_names();
        let found = if self.case_sensitive {
            names.iter().find(|n| n.as_str() == name)
        } else {
            let name_lower = name.to_lowercase();
            names
                .iter()
                .find(|n| n.as_str().to_lowercase() == name_lower)
        };
        if let Some(n) = found {
            return Ok(n.to_string());
        }
        let available: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        Err(EngineError::NotFound(format!(
            "Column '{}' not found. Available columns: [{}]. Check spelling and case sensitivity (spark.sql.caseSensitive).",
            name,
            available.join(", ")
        )))
    }

    pub fn schema(&self) -> Result<StructType, EngineError> {
        StructType::from_polars_schema(&self.df.schema())
    }

    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.df.height()
    }

    /// Print the first n rows (default 20).
    pub fn show(&self, n: Option<usize>) {
        let n = n.unwrap_or(20);
        println!("{}", self.df.head(Some(n)));
    }

    /// The underlying Polars frame.
    pub fn collect(&self) -> Arc<PlDataFrame> {
        self.df.clone()
    }

    /// Collect rows in order, each row holding values in column order.
    /// Two frames with equal `collect_rows` output hold the same data, nulls included.
    pub fn collect_rows(&self) -> Result<Vec<Row>, EngineError> {
        let df = self.df.as_ref();
        let columns = df.get_columns();
        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let row = columns
                .iter()
                .map(|c| c.get(i).map(any_value_to_json))
                .collect::<Result<Row, _>>()?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Collect as rows of column-name -> JSON value.
    pub fn collect_as_json_rows(&self) -> Result<Vec<HashMap<String, JsonValue>>, EngineError> {
        let names = self.columns();
        Ok(self
            .collect_rows()?
            .into_iter()
            .map(|row| names.iter().cloned().zip(row).collect())
            .collect())
    }

    /// Select columns (returns a new DataFrame).
    /// Column names are resolved according to case sensitivity.
    pub fn select(&self, cols: Vec<&str>) -> Result<DataFrame, EngineError> {
        let resolved: Vec<String> = cols
            .iter()
            .map(|c| self.resolve_column_name(c))
            .collect::<Result<Vec<_>, _>>()?;
        transformations::select(self, resolved)
    }

    /// Filter rows using a boolean column; rows where it is false or null are dropped.
    pub fn filter(&self, condition: &Column) -> Result<DataFrame, EngineError> {
        transformations::filter(self, condition.expr().clone())
    }

    /// Get a column reference by name (for building expressions).
    /// Respects case sensitivity: when false, "Age" resolves to column "age" if present.
    pub fn column(&self, name: &str) -> Result<Column, EngineError> {
        let resolved = self.resolve_column_name(name)?;
        Ok(Column::new(resolved))
    }

    /// Add or replace a column. An existing column with a matching name
    /// (per case sensitivity) is replaced in place; otherwise the column is appended.
    pub fn with_column(&self, column_name: &str, col: &Column) -> Result<DataFrame, EngineError> {
        let target = self
            .resolve_column_name(column_name)
            .unwrap_or_else(|_| column_name.to_string());
        transformations::with_column(self, &target, col.expr().clone())
    }

    pub fn with_column_expr(&self, column_name: &str, expr: Expr) -> Result<DataFrame, EngineError> {
        self.with_column(column_name, &Column::from_expr(expr, None))
    }
}

impl std::fmt::Debug for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.df)
    }
}

fn any_value_to_json(av: AnyValue<'_>) -> JsonValue {
    match av {
        AnyValue::Null => JsonValue::Null,
        AnyValue::Boolean(b) => JsonValue::Bool(b),
        AnyValue::Int8(i) => JsonValue::Number(serde_json::Number::from(i)),
        AnyValue::Int16(i) => JsonValue::Number(serde_json::Number::from(i)),
        AnyValue::Int32(i) => JsonValue::Number(serde_json::Number::from(i)),
        AnyValue::Int64(i) => JsonValue::Number(serde_json::Number::from(i)),
        AnyValue::UInt32(u) => JsonValue::Number(serde_json::Number::from(u)),
        AnyValue::UInt64(u) => JsonValue::Number(serde_json::Number::from(u)),
        AnyValue::Float32(f) => serde_json::Number::from_f64(f64::from(f))
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        AnyValue::Float64(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        AnyValue::String(s) => JsonValue::String(s.to_string()),
        AnyValue::StringOwned(s) => JsonValue::String(s.to_string()),
        AnyValue::Date(days) => chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(i64::from(days))))
            .map(|d| JsonValue::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(JsonValue::Null),
        other => JsonValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;
    use serde_json::json;

    fn people() -> DataFrame {
        DataFrame::from_polars(
            df![
                "Name" => ["jose", "li"],
                "age" => [Some(17i32), None],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn test_resolve_column_name_case_insensitive() {
        let df = people();
        assert_eq!(df.resolve_column_name("name").unwrap(), "Name");
        assert!(matches!(
            df.resolve_column_name("missing"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_column_name_case_sensitive() {
        let pl = people().collect().as_ref().clone();
        let df = DataFrame::from_polars_with_options(pl, true);
        assert!(df.resolve_column_name("name").is_err());
        assert_eq!(df.resolve_column_name("Name").unwrap(), "Name");
    }

    #[test]
    fn test_collect_rows_keeps_order_and_nulls() {
        let rows = people().collect_rows().unwrap();
        assert_eq!(rows, vec![vec![json!("jose"), json!(17)], vec![json!("li"), json!(null)]]);
    }

    #[test]
    fn test_collect_as_json_rows() {
        let rows = people().collect_as_json_rows().unwrap();
        assert_eq!(rows[0].get("Name"), Some(&json!("jose")));
        assert_eq!(rows[1].get("age"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_with_column_replaces_in_place() {
        let df = people();
        let out = df
            .with_column("AGE", &crate::functions::lit_i32(1))
            .unwrap();
        assert_eq!(out.columns(), vec!["Name", "age"]);
        assert_eq!(out.collect_rows().unwrap()[1], vec![json!("li"), json!(1)]);
    }

    #[test]
    fn test_any_value_date() {
        assert_eq!(any_value_to_json(AnyValue::Date(0)), json!("1970-01-01"));
        assert_eq!(any_value_to_json(AnyValue::Date(19723)), json!("2024-01-01"));
    }
}
