use polars::prelude::{col, lit, Expr, Series};

/// Column - represents a column in a DataFrame, used for building expressions.
/// Thin wrapper around Polars `Expr`.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    expr: Expr,
}

impl Column {
    /// Create a new Column from a column name
    pub fn new(name: String) -> Self {
        Column {
            expr: col(name.as_str()),
            name,
        }
    }

    /// Create a Column from a Polars Expr
    pub fn from_expr(expr: Expr, name: Option<String>) -> Self {
        let display_name = name.unwrap_or_else(|| "<expr>".to_string());
        Column {
            name: display_name,
            expr,
        }
    }

    /// Get the underlying Polars Expr
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Convert to Polars Expr (consumes self)
    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Display name, used when no explicit alias is given.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self, name: &str) -> Column {
        Column {
            name: name.to_string(),
            expr: self.expr.clone().alias(name),
        }
    }

    pub fn is_null(&self) -> Column {
        Column {
            name: format!("({} IS NULL)", self.name),
            expr: self.expr.clone().is_null(),
        }
    }

    pub fn is_not_null(&self) -> Column {
        Column {
            name: format!("({} IS NOT NULL)", self.name),
            expr: self.expr.clone().is_not_null(),
        }
    }

    // Comparisons keep Polars (three-valued) semantics: any null operand yields null.

    pub fn eq(&self, other: Expr) -> Column {
        Self::from_expr(self.expr.clone().eq(other), None)
    }

    pub fn neq(&self, other: Expr) -> Column {
        Self::from_expr(self.expr.clone().neq(other), None)
    }

    pub fn gt(&self, other: Expr) -> Column {
        Self::from_expr(self.expr.clone().gt(other), None)
    }

    pub fn gt_eq(&self, other: Expr) -> Column {
        Self::from_expr(self.expr.clone().gt_eq(other), None)
    }

    pub fn lt(&self, other: Expr) -> Column {
        Self::from_expr(self.expr.clone().lt(other), None)
    }

    pub fn lt_eq(&self, other: Expr) -> Column {
        Self::from_expr(self.expr.clone().lt_eq(other), None)
    }

    /// Inclusive `lower <= self <= upper`. Nulls propagate (Kleene AND), unlike
    /// [`ColumnExt::null_between`](crate::ColumnExt::null_between).
    pub fn between(&self, lower: &Column, upper: &Column) -> Column {
        let expr = self
            .expr
            .clone()
            .gt_eq(lower.expr.clone())
            .and(self.expr.clone().lt_eq(upper.expr.clone()));
        Self::from_expr(
            expr,
            Some(format!(
                "(({} >= {}) AND ({} <= {}))",
                self.name, lower.name, self.name, upper.name
            )),
        )
    }

    /// Null-safe equality (NULL <=> NULL returns True)
    pub fn eq_null_safe(&self, other: &Column) -> Column {
        use crate::functions::{lit_bool, when};

        let left_null = self.expr.clone().is_null();
        let right_null = other.expr.clone().is_null();

        when(&Self::from_expr(left_null.clone().and(right_null.clone()), None))
            .then(&lit_bool(true))
            .when(&Self::from_expr(left_null.or(right_null), None))
            .then(&lit_bool(false))
            .otherwise(&Self::from_expr(
                self.expr.clone().eq(other.expr.clone()),
                None,
            ))
            .with_name(format!("({} <=> {})", self.name, other.name))
    }

    /// Kleene AND.
    pub fn and(&self, other: &Column) -> Column {
        Self::from_expr(
            self.expr.clone().and(other.expr.clone()),
            Some(format!("({} AND {})", self.name, other.name)),
        )
    }

    /// Kleene OR.
    pub fn or(&self, other: &Column) -> Column {
        Self::from_expr(
            self.expr.clone().or(other.expr.clone()),
            Some(format!("({} OR {})", self.name, other.name)),
        )
    }

    pub fn not(&self) -> Column {
        Self::from_expr(
            self.expr.clone().not(),
            Some(format!("(NOT {})", self.name)),
        )
    }

    /// Membership test against a literal Series.
    pub fn is_in(&self, values: Series) -> Column {
        Self::from_expr(
            self.expr.clone().is_in(lit(values)),
            Some(format!("({} IN (...))", self.name)),
        )
    }

    /// Trim leading and trailing whitespace (PySpark trim)
    pub fn trim(&self) -> Column {
        Self::from_expr(
            self.expr.clone().str().strip_chars(lit(" \t\n\r")),
            Some(format!("trim({})", self.name)),
        )
    }

    pub(crate) fn with_name(mut self, name: String) -> Column {
        self.name = name;
        self
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        column.into_expr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{df, IntoLazy, NamedFrom};

    fn eval_bool(frame: polars::prelude::DataFrame, column: &Column) -> Vec<Option<bool>> {
        let out = frame
            .lazy()
            .select([column.expr().clone().alias("out")])
            .collect()
            .unwrap();
        out.column("out")
            .unwrap()
            .as_materialized_series()
            .bool()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_column_names() {
        let c = Column::new("age".to_string());
        assert_eq!(c.name(), "age");
        assert_eq!(c.is_null().name(), "(age IS NULL)");
        assert_eq!(c.alias("years").name(), "years");
        assert_eq!(c.trim().name(), "trim(age)");
    }

    #[test]
    fn test_between_propagates_null() {
        let frame = df![
            "v" => [Some(5i32), None, Some(20)],
            "lo" => [Some(1i32), Some(1), None],
            "hi" => [Some(10i32), Some(10), Some(10)],
        ]
        .unwrap();
        let c = Column::new("v".into()).between(&Column::new("lo".into()), &Column::new("hi".into()));
        // 20 <= 10 is false, so the null lower bound does not matter.
        assert_eq!(eval_bool(frame, &c), vec![Some(true), None, Some(false)]);
    }

    #[test]
    fn test_eq_null_safe() {
        let frame = df![
            "a" => [Some(1i32), None, None, Some(2)],
            "b" => [Some(1i32), None, Some(3), Some(4)],
        ]
        .unwrap();
        let c = Column::new("a".into()).eq_null_safe(&Column::new("b".into()));
        assert_eq!(c.name(), "(a <=> b)");
        assert_eq!(
            eval_bool(frame, &c),
            vec![Some(true), Some(true), Some(false), Some(false)]
        );
    }

    #[test]
    fn test_is_in_series() {
        let frame = df!["s" => ["a", "b", "c"]].unwrap();
        let values = Series::new("values".into(), &["a", "c"]);
        let c = Column::new("s".into()).is_in(values);
        assert_eq!(eval_bool(frame, &c), vec![Some(true), Some(false), Some(true)]);
    }
}
