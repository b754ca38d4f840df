use polars::prelude::{DataType as PlDataType, Field, PlSmallStr, Schema, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Logical column types, named after their Spark SQL counterparts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    Timestamp,
    Array(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Struct(Vec<StructField>),
}

impl DataType {
    pub fn to_polars(&self) -> PlDataType {
        match self {
            DataType::String => PlDataType::String,
            DataType::Byte => PlDataType::Int8,
            DataType::Short => PlDataType::Int16,
            DataType::Integer => PlDataType::Int32,
            DataType::Long => PlDataType::Int64,
            DataType::Float => PlDataType::Float32,
            DataType::Double => PlDataType::Float64,
            DataType::Boolean => PlDataType::Boolean,
            DataType::Date => PlDataType::Date,
            DataType::Timestamp => PlDataType::Datetime(TimeUnit::Microseconds, None),
            DataType::Array(inner) => PlDataType::List(Box::new(inner.to_polars())),
            // A map is stored as a list of key/value structs.
            DataType::Map(key, value) => PlDataType::List(Box::new(PlDataType::Struct(vec![
                Field::new(PlSmallStr::from_static("key"), key.to_polars()),
                Field::new(PlSmallStr::from_static("value"), value.to_polars()),
            ]))),
            DataType::Struct(fields) => PlDataType::Struct(
                fields
                    .iter()
                    .map(|f| Field::new(f.name.as_str().into(), f.data_type.to_polars()))
                    .collect(),
            ),
        }
    }

    /// Map a Polars dtype back to a logical type.
    ///
    /// Dtypes with no Spark counterpart (unsigned integers, decimals,
    /// categoricals, ...) are rejected rather than reported as a different
    /// type. A list of structs reads back as an `Array`, not a `Map`.
    pub fn from_polars(dtype: &PlDataType) -> Result<Self, EngineError> {
        Ok(match dtype {
            PlDataType::String => DataType::String,
            PlDataType::Int8 => DataType::Byte,
            PlDataType::Int16 => DataType::Short,
            PlDataType::Int32 => DataType::Integer,
            PlDataType::Int64 => DataType::Long,
            PlDataType::Float32 => DataType::Float,
            PlDataType::Float64 => DataType::Double,
            PlDataType::Boolean => DataType::Boolean,
            PlDataType::Date => DataType::Date,
            PlDataType::Datetime(_, _) => DataType::Timestamp,
            PlDataType::List(inner) => DataType::Array(Box::new(DataType::from_polars(inner)?)),
            PlDataType::Struct(fields) => DataType::Struct(
                fields
                    .iter()
                    .map(|f| {
                        DataType::from_polars(f.dtype())
                            .map(|dt| StructField::new(f.name().as_str(), dt, true))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            other => {
                return Err(EngineError::User(format!(
                    "dtype {other} has no logical type counterpart"
                )))
            }
        })
    }
}

/// Parse a Spark SQL type name (`"int"`, `"bigint"`, `"string"`, ...).
pub fn parse_type_name(name: &str) -> Result<DataType, EngineError> {
    let s = name.trim().to_lowercase();
    Ok(match s.as_str() {
        "int" | "integer" => DataType::Integer,
        "tinyint" | "byte" => DataType::Byte,
        "smallint" | "short" => DataType::Short,
        "long" | "bigint" => DataType::Long,
        "float" | "real" => DataType::Float,
        "double" => DataType::Double,
        "string" | "str" => DataType::String,
        "boolean" | "bool" => DataType::Boolean,
        "date" => DataType::Date,
        "timestamp" => DataType::Timestamp,
        _ => return Err(EngineError::User(format!("unknown type name: {name}"))),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        StructField {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    fields: Vec<StructField>,
}

impl StructType {
    pub fn new(fields: Vec<StructField>) -> Self {
        StructType { fields }
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Build a schema from a Polars schema. Polars does not track
    /// nullability, so every field is reported as nullable.
    pub fn from_polars_schema(schema: &Schema) -> Result<Self, EngineError> {
        schema
            .iter()
            .map(|(name, dtype)| {
                DataType::from_polars(dtype).map(|dt| StructField::new(name.as_str(), dt, true))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(StructType::new)
    }

    pub fn to_polars_schema(&self) -> Schema {
        let fields: Vec<Field> = self
            .fields
            .iter()
            .map(|f| Field::new(f.name.as_str().into(), f.data_type.to_polars()))
            .collect();
        Schema::from_iter(fields)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<StructField> for StructType {
    fn from_iter<I: IntoIterator<Item = StructField>>(iter: I) -> Self {
        StructType::new(iter.into_iter().collect())
    }
}
