use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Fails with a schema error naming the first of `columns` absent from `df`.
pub(crate) fn require_columns(df: &DataFrame, columns: &[&str], stage: &'static str) -> Result<()> {
    match columns
        .iter()
        .find(|name| df.get_column_index(name).is_none())
    {
        Some(missing) => Err(PrepError::missing_column(*missing, stage)),
        None => Ok(()),
    }
}

/// Expression for `column` with floating-point NaN turned into null, so that
/// both count as missing. Non-float columns pass through unchanged.
pub(crate) fn nan_as_null(df: &DataFrame, column: &str) -> Expr {
    let is_float = df
        .column(column)
        .map(|c| c.dtype().is_float())
        .unwrap_or(false);

    if is_float {
        col(column).fill_nan(lit(NULL)).alias(column)
    } else {
        col(column)
    }
}
