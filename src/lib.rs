//! sparkless-quinn - PySpark-style column predicates for a Polars-backed DataFrame API.
//!
//! The [`ColumnExt`] trait adds null-aware helpers (`null_between`, `is_falsy`,
//! `is_truthy`, `is_null_or_blank`, `is_not_in`, ...) to both [`Column`] and
//! Polars `Expr`. [`SparkSessionExt::create_df`] builds small DataFrames from
//! literal rows and an explicit nullable schema.
//!
//! ```
//! use serde_json::json;
//! use sparkless_quinn::{col, ColumnExt, DataType, SparkSession, SparkSessionExt};
//!
//! let spark = SparkSession::builder().app_name("quickstart").get_or_create();
//! let df = spark
//!     .create_df(
//!         vec![vec![json!("jose"), json!(true)], vec![json!("luisa"), json!(null)]],
//!         &[("name", DataType::String, true), ("has_stuff", DataType::Boolean, true)],
//!     )
//!     .unwrap();
//! let out = df.with_column("is_stuff_falsy", &col("has_stuff").is_falsy()).unwrap();
//! assert_eq!(
//!     out.collect_rows().unwrap(),
//!     vec![
//!         vec![json!("jose"), json!(true), json!(false)],
//!         vec![json!("luisa"), json!(null), json!(true)],
//!     ]
//! );
//! ```

pub mod column;
pub mod column_ext;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod functions;
pub mod schema;
pub mod session;
pub mod session_ext;

pub use column::Column;
pub use column_ext::{ColumnExt, LiteralList};
pub use config::SparklessConfig;
pub use dataframe::{DataFrame, Row};
pub use error::EngineError;
pub use functions::*;
pub use schema::{parse_type_name, DataType, StructField, StructType};
pub use session::{SparkSession, SparkSessionBuilder};
pub use session_ext::SparkSessionExt;
