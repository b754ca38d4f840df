use crate::column::Column;
use crate::error::EngineError;
use crate::schema::parse_type_name;
use polars::prelude::{lit, ChainedThen, Expr, Then, NULL};

/// Get a column by name
pub fn col(name: &str) -> Column {
    Column::new(name.to_string())
}

/// Create a literal column from a value
pub fn lit_i32(value: i32) -> Column {
    Column::from_expr(lit(value), Some(value.to_string()))
}

pub fn lit_i64(value: i64) -> Column {
    Column::from_expr(lit(value), Some(value.to_string()))
}

pub fn lit_f64(value: f64) -> Column {
    Column::from_expr(lit(value), Some(value.to_string()))
}

pub fn lit_bool(value: bool) -> Column {
    Column::from_expr(lit(value), Some(value.to_string()))
}

pub fn lit_str(value: &str) -> Column {
    Column::from_expr(lit(value), Some(format!("'{value}'")))
}

/// Typed null literal column, e.g. `lit_null("int")`.
/// See [`parse_type_name`] for supported type strings.
pub fn lit_null(dtype: &str) -> Result<Column, EngineError> {
    let dtype = parse_type_name(dtype)?;
    Ok(Column::from_expr(
        lit(NULL).cast(dtype.to_polars()),
        Some("NULL".to_string()),
    ))
}

/// PySpark-style conditional expression builder.
///
/// # Example
/// ```
/// use sparkless_quinn::{col, lit_i64, lit_str, when};
///
/// let label = when(&col("age").lt(lit_i64(13).into_expr()))
///     .then(&lit_str("child"))
///     .when(&col("age").lt(lit_i64(18).into_expr()))
///     .then(&lit_str("teen"))
///     .otherwise(&lit_str("adult"));
/// ```
pub fn when(condition: &Column) -> WhenBuilder {
    WhenBuilder {
        condition: condition.expr().clone(),
        prev: None,
    }
}

enum Branches {
    Single(Then),
    Chained(ChainedThen),
}

/// A pending `when` clause waiting for its `then` value.
pub struct WhenBuilder {
    condition: Expr,
    prev: Option<Branches>,
}

impl WhenBuilder {
    /// Specify the value when condition is true
    pub fn then(self, value: &Column) -> ThenBuilder {
        let value = value.expr().clone();
        let branches = match self.prev {
            None => Branches::Single(polars::prelude::when(self.condition).then(value)),
            Some(Branches::Single(t)) => Branches::Chained(t.when(self.condition).then(value)),
            Some(Branches::Chained(t)) => Branches::Chained(t.when(self.condition).then(value)),
        };
        ThenBuilder { branches }
    }
}

/// Builder for chaining when-then clauses before finalizing with otherwise
pub struct ThenBuilder {
    branches: Branches,
}

impl ThenBuilder {
    /// Chain an additional when-then clause. Clauses are tested in order.
    pub fn when(self, condition: &Column) -> WhenBuilder {
        WhenBuilder {
            condition: condition.expr().clone(),
            prev: Some(self.branches),
        }
    }

    /// Finalize the expression with the fallback value
    pub fn otherwise(self, value: &Column) -> Column {
        let value = value.expr().clone();
        let expr = match self.branches {
            Branches::Single(t) => t.otherwise(value),
            Branches::Chained(t) => t.otherwise(value),
        };
        Column::from_expr(expr, Some("CASE WHEN".to_string()))
    }
}
