//! Convenience predicates attached to [`Column`] and Polars [`Expr`].
//!
//! Every predicate only builds an expression; evaluation happens when the
//! expression is used in [`DataFrame::with_column`](crate::DataFrame::with_column)
//! or a filter. Comparisons follow Polars' three-valued logic: a null operand
//! yields null unless the predicate documents otherwise.
//!
//! ```
//! use sparkless_quinn::{col, ColumnExt};
//!
//! let between = col("age").null_between(&col("lower_age"), &col("upper_age"));
//! let not_hobby = col("fun_thing").is_not_in(["dancing", "snowboarding"]);
//! assert_eq!(not_hobby.name(), "(fun_thing NOT IN ('dancing', 'snowboarding'))");
//! # let _ = between;
//! ```

use polars::prelude::{lit, when, Expr, NamedFrom, Series};

use crate::column::Column;

/// Whitespace stripped by [`ColumnExt::is_null_or_blank`].
const BLANK_CHARS: &str = " \t\n\r";

/// A list of literal values usable with [`ColumnExt::is_not_in`].
pub trait LiteralList {
    fn into_literal_series(self) -> Series;

    /// SQL-ish rendering used for column display names.
    fn describe(&self) -> String;
}

macro_rules! impl_literal_list {
    ($fmt:literal => $($t:ty),+) => {
        $(
            impl LiteralList for Vec<$t> {
                fn into_literal_series(self) -> Series {
                    Series::new("literal".into(), self)
                }

                fn describe(&self) -> String {
                    self.iter()
                        .map(|v| format!($fmt, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            }

            impl LiteralList for &[$t] {
                fn into_literal_series(self) -> Series {
                    Series::new("literal".into(), self)
                }

                fn describe(&self) -> String {
                    self.iter()
                        .map(|v| format!($fmt, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            }

            impl<const N: usize> LiteralList for [$t; N] {
                fn into_literal_series(self) -> Series {
                    Series::new("literal".into(), self.as_slice())
                }

                fn describe(&self) -> String {
                    self.as_slice().describe()
                }
            }
        )+
    };
}

impl_literal_list!("{}" => i32, i64, f64, bool);
impl_literal_list!("'{}'" => String, &str);

/// Null-aware predicates in the style of PySpark column extensions.
pub trait ColumnExt: Sized {
    /// Inclusive `lower <= self <= upper` where a null bound is treated as
    /// unbounded on that side.
    ///
    /// Returns `false` (never null) when `self` is null or both bounds are null.
    fn null_between(&self, lower: &Self, upper: &Self) -> Self;

    /// `true` for `false` and null.
    fn is_falsy(&self) -> Self;

    /// `true` only for `true`; null is not truthy. Never null.
    fn is_truthy(&self) -> Self;

    /// `self == false`; null stays null.
    fn is_false(&self) -> Self;

    /// `self == true`; null stays null.
    fn is_true(&self) -> Self;

    /// `true` when null, empty, or whitespace only.
    fn is_null_or_blank(&self) -> Self;

    /// Negated membership. A null input yields null.
    fn is_not_in<L: LiteralList>(&self, values: L) -> Self;
}

impl ColumnExt for Expr {
    fn null_between(&self, lower: &Expr, upper: &Expr) -> Expr {
        let value = self.clone();
        let lower_null = lower.clone().is_null();
        let upper_null = upper.clone().is_null();
        when(lower_null.clone().and(upper_null.clone()))
            .then(lit(false))
            .when(value.clone().is_null())
            .then(lit(false))
            .when(lower_null)
            .then(value.clone().lt_eq(upper.clone()))
            .when(upper_null)
            .then(value.clone().gt_eq(lower.clone()))
            .otherwise(
                value
                    .clone()
                    .gt_eq(lower.clone())
                    .and(value.lt_eq(upper.clone())),
            )
    }

    fn is_falsy(&self) -> Expr {
        self.clone().fill_null(lit(false)).not()
    }

    fn is_truthy(&self) -> Expr {
        self.clone().fill_null(lit(false))
    }

    fn is_false(&self) -> Expr {
        self.clone().eq(lit(false))
    }

    fn is_true(&self) -> Expr {
        self.clone().eq(lit(true))
    }

    fn is_null_or_blank(&self) -> Expr {
        // A null input stays null through the trim and comparison.
        self.clone()
            .str()
            .strip_chars(lit(BLANK_CHARS))
            .eq(lit(""))
            .fill_null(lit(true))
    }

    fn is_not_in<L: LiteralList>(&self, values: L) -> Expr {
        self.clone().is_in(lit(values.into_literal_series())).not()
    }
}

impl ColumnExt for Column {
    fn null_between(&self, lower: &Column, upper: &Column) -> Column {
        Column::from_expr(
            self.expr().null_between(lower.expr(), upper.expr()),
            Some(format!(
                "({} NULL BETWEEN {} AND {})",
                self.name(),
                lower.name(),
                upper.name()
            )),
        )
    }

    fn is_falsy(&self) -> Column {
        Column::from_expr(
            self.expr().is_falsy(),
            Some(format!("({} IS FALSY)", self.name())),
        )
    }

    fn is_truthy(&self) -> Column {
        Column::from_expr(
            self.expr().is_truthy(),
            Some(format!("({} IS TRUTHY)", self.name())),
        )
    }

    fn is_false(&self) -> Column {
        Column::from_expr(
            self.expr().is_false(),
            Some(format!("({} = false)", self.name())),
        )
    }

    fn is_true(&self) -> Column {
        Column::from_expr(
            self.expr().is_true(),
            Some(format!("({} = true)", self.name())),
        )
    }

    fn is_null_or_blank(&self) -> Column {
        Column::from_expr(
            self.expr().is_null_or_blank(),
            Some(format!("({} IS NULL OR BLANK)", self.name())),
        )
    }

    fn is_not_in<L: LiteralList>(&self, values: L) -> Column {
        let name = format!("({} NOT IN ({}))", self.name(), values.describe());
        Column::from_expr(self.expr().is_not_in(values), Some(name))
    }
}
