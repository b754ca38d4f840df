use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame as PlDataFrame, DataType as PlDataType, NamedFrom, PlSmallStr, Series};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::config::{parse_flag, SparklessConfig, KEY_APP_NAME, KEY_CASE_SENSITIVE};
use crate::dataframe::{DataFrame, Row, DEFAULT_CASE_SENSITIVE};
use crate::error::EngineError;
use crate::schema::{DataType, StructField, StructType};

/// Builder for creating a SparkSession with configuration options
#[derive(Clone, Default)]
pub struct SparkSessionBuilder {
    app_name: Option<String>,
    master: Option<String>,
    config: HashMap<String, String>,
}

impl SparkSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn master(mut self, master: impl Into<String>) -> Self {
        self.master = Some(master.into());
        self
    }

    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Merge a [`SparklessConfig`] into the builder config. An app name set in
    /// the config wins over one set earlier on the builder.
    pub fn with_config(mut self, config: &SparklessConfig) -> Self {
        for (k, v) in config.to_session_config() {
            if k == KEY_APP_NAME {
                self.app_name = Some(v);
            } else {
                self.config.insert(k, v);
            }
        }
        self
    }

    pub fn get_or_create(self) -> SparkSession {
        let session = SparkSession::new(self.app_name, self.master, self.config);
        tracing::info!(
            app_name = session.app_name().unwrap_or("<unnamed>"),
            case_sensitive = session.is_case_sensitive(),
            "session created"
        );
        session
    }
}

/// Entry point for creating DataFrames.
/// Similar to PySpark's SparkSession but using Polars as the backend.
#[derive(Clone, Debug)]
pub struct SparkSession {
    app_name: Option<String>,
    master: Option<String>,
    config: HashMap<String, String>,
}

impl SparkSession {
    pub fn new(
        app_name: Option<String>,
        master: Option<String>,
        config: HashMap<String, String>,
    ) -> Self {
        SparkSession {
            app_name,
            master,
            config,
        }
    }

    pub fn builder() -> SparkSessionBuilder {
        SparkSessionBuilder::new()
    }

    pub fn from_config(config: &SparklessConfig) -> SparkSession {
        Self::builder().with_config(config).get_or_create()
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn master(&self) -> Option<&str> {
        self.master.as_deref()
    }

    pub fn get_config(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// `spark.sql.caseSensitive`, false unless set.
    pub fn is_case_sensitive(&self) -> bool {
        self.get_config(KEY_CASE_SENSITIVE)
            .map(parse_flag)
            .unwrap_or(DEFAULT_CASE_SENSITIVE)
    }

    /// Create a DataFrame from a Polars DataFrame
    pub fn create_dataframe_from_polars(&self, df: PlDataFrame) -> DataFrame {
        DataFrame::from_polars_with_options(df, self.is_case_sensitive())
    }

    /// Create a DataFrame from rows of JSON values and an explicit schema.
    ///
    /// Every row must have exactly one value per schema field. A null in a
    /// non-nullable field or a value of the wrong type is rejected with
    /// [`EngineError::User`]. `Date` values are `"YYYY-MM-DD"` strings and
    /// `Timestamp` values are `"YYYY-MM-DD HH:MM:SS[.f]"` strings.
    pub fn create_dataframe_from_rows(
        &self,
        rows: Vec<Row>,
        schema: &StructType,
    ) -> Result<DataFrame, EngineError> {
        let width = schema.fields().len();
        tracing::debug!(rows = rows.len(), fields = width, "creating DataFrame from rows");
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            tracing::warn!(row = idx, "row arity does not match schema");
            return Err(EngineError::User(format!(
                "row {idx} has {} values but the schema has {width} fields [{}]",
                row.len(),
                schema.field_names().join(", ")
            )));
        }
        let columns = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(idx, field)| build_series(field, idx, &rows).map(Into::into))
            .collect::<Result<Vec<polars::prelude::Column>, _>>()?;
        let df = PlDataFrame::new(columns)?;
        Ok(self.create_dataframe_from_polars(df))
    }
}

impl Default for SparkSession {
    fn default() -> Self {
        Self::builder().get_or_create()
    }
}

fn build_series(field: &StructField, idx: usize, rows: &[Row]) -> Result<Series, EngineError> {
    let name: PlSmallStr = field.name.as_str().into();
    let series = match &field.data_type {
        DataType::Byte => Series::new(
            name,
            field_values(field, idx, rows, |v| v.as_i64().and_then(|n| i8::try_from(n).ok()))?,
        ),
        DataType::Short => Series::new(
            name,
            field_values(field, idx, rows, |v| v.as_i64().and_then(|n| i16::try_from(n).ok()))?,
        ),
        DataType::Integer => Series::new(
            name,
            field_values(field, idx, rows, |v| {
                v.as_i64().and_then(|n| i32::try_from(n).ok())
            })?,
        ),
        DataType::Long => Series::new(name, field_values(field, idx, rows, JsonValue::as_i64)?),
        DataType::Float => Series::new(
            name,
            field_values(field, idx, rows, |v| v.as_f64().map(|f| f as f32))?,
        ),
        DataType::Double => Series::new(name, field_values(field, idx, rows, JsonValue::as_f64)?),
        DataType::Boolean => Series::new(name, field_values(field, idx, rows, JsonValue::as_bool)?),
        DataType::String => Series::new(
            name,
            field_values(field, idx, rows, |v| v.as_str().map(str::to_string))?,
        ),
        DataType::Date => {
            let days = field_values(field, idx, rows, |v| v.as_str().and_then(parse_date_days))?;
            Series::new(name, days).cast(&PlDataType::Date)?
        }
        DataType::Timestamp => {
            let micros =
                field_values(field, idx, rows, |v| v.as_str().and_then(parse_timestamp_micros))?;
            Series::new(name, micros).cast(&field.data_type.to_polars())?
        }
        DataType::Array(_) | DataType::Map(_, _) | DataType::Struct(_) => {
            tracing::warn!(field = %field.name, "nested field type in row data");
            return Err(EngineError::User(format!(
                "field '{}': {:?} is not supported when building rows",
                field.name, field.data_type
            )))
        }
    };
    Ok(series)
}

/// Convert one schema column of `rows`, enforcing nullability and type.
fn field_values<T>(
    field: &StructField,
    idx: usize,
    rows: &[Row],
    convert: impl Fn(&JsonValue) -> Option<T>,
) -> Result<Vec<Option<T>>, EngineError> {
    rows.iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let value = &row[idx];
            if value.is_null() {
                if !field.nullable {
                    tracing::warn!(field = %field.name, row = row_idx, "null in non-nullable field");
                    return Err(EngineError::User(format!(
                        "field '{}' is not nullable but row {row_idx} is null",
                        field.name
                    )));
                }
                return Ok(None);
            }
            convert(value).map(Some).ok_or_else(|| {
                tracing::warn!(field = %field.name, row = row_idx, "value does not match field type");
                EngineError::User(format!(
                    "field '{}' of type {:?} cannot hold {value} (row {row_idx})",
                    field.name, field.data_type
                ))
            })
        })
        .collect()
}

fn parse_date_days(s: &str) -> Option<i32> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    i32::try_from(date.signed_duration_since(epoch).num_days()).ok()
}

fn parse_timestamp_micros(s: &str) -> Option<i64> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc().timestamp_micros())
}
