//! DataFrame transformation operations: select, filter, with_column.
//! Each one runs a lazy Polars query and preserves case sensitivity on the result.

use super::DataFrame;
use crate::error::EngineError;
use polars::prelude::{col, Expr, IntoLazy};

pub fn select(df: &DataFrame, cols: Vec<String>) -> Result<DataFrame, EngineError> {
    let exprs: Vec<Expr> = cols.iter().map(|c| col(c.as_str())).collect();
    let out = df.df.as_ref().clone().lazy().select(exprs).collect()?;
    Ok(DataFrame::from_polars_with_options(out, df.case_sensitive))
}

pub fn filter(df: &DataFrame, condition: Expr) -> Result<DataFrame, EngineError> {
    let out = df.df.as_ref().clone().lazy().filter(condition).collect()?;
    Ok(DataFrame::from_polars_with_options(out, df.case_sensitive))
}

pub fn with_column(df: &DataFrame, column_name: &str, expr: Expr) -> Result<DataFrame, EngineError> {
    tracing::debug!(column = column_name, rows = df.count(), "with_column");
    let out = df
        .df
        .as_ref()
        .clone()
        .lazy()
        .with_column(expr.alias(column_name))
        .collect()?;
    Ok(DataFrame::from_polars_with_options(out, df.case_sensitive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_ext::ColumnExt;
    use crate::functions;
    use polars::prelude::df;

    fn hobbies() -> DataFrame {
        DataFrame::from_polars_with_options(
            df![
                "name" => ["jose", "li", "luisa"],
                "fun_thing" => ["surfing", "swimming", "dancing"],
            ]
            .unwrap(),
            true,
        )
    }

    #[test]
    fn filter_with_extension_predicate() {
        let predicate = functions::col("fun_thing").is_not_in(["dancing"]);
        let out = filter(&hobbies(), predicate.into_expr()).unwrap();
        assert_eq!(out.count(), 2);
        assert!(out.is_case_sensitive());
    }

    #[test]
    fn select_keeps_requested_order() {
        let out = select(&hobbies(), vec!["fun_thing".into(), "name".into()]).unwrap();
        assert_eq!(out.columns(), vec!["fun_thing", "name"]);
    }

    #[test]
    fn with_column_unknown_input_column_errors() {
        let err = with_column(&hobbies(), "x", functions::col("nope").into_expr()).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }
}
