//! Turns the raw orders table into an all-numeric feature table.

use super::frame::{nan_as_null, require_columns};
use super::strategy::DataStrategy;
use crate::error::Result;
use crate::schema::{
    IDENTIFIER_COLUMNS, MEDIAN_IMPUTED_COLUMNS, NO_REVIEW_SENTINEL, REVIEW_COMMENT_COLUMN,
    TIMESTAMP_COLUMNS,
};
use polars::prelude::*;

const STAGE: &str = "preprocess";

/// Prepares the raw table for numeric modelling.
///
/// In order:
/// 1. drops the order timestamp columns,
/// 2. fills missing values in the product dimension, price, freight and photo
///    count columns with each column's median,
/// 3. fills missing review comments with `"No review"`,
/// 4. keeps only numeric columns,
/// 5. drops the zip code prefix and order item id.
///
/// Missing values in numeric columns other than the seven imputed ones are left
/// in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataPreProcessStrategy;

impl DataStrategy for DataPreProcessStrategy {
    type Output = DataFrame;

    fn handle_data(&self, data: &DataFrame) -> Result<DataFrame> {
        preprocess(data).inspect_err(|e| tracing::error!("Error in preprocessing data: {e}"))
    }
}

fn preprocess(data: &DataFrame) -> Result<DataFrame> {
    let df = drop_columns(data.clone(), &TIMESTAMP_COLUMNS)?;
    let df = impute_missing(df)?;
    let df = select_numeric(&df)?;
    drop_columns(df, &IDENTIFIER_COLUMNS)
}

fn drop_columns(mut df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    require_columns(&df, columns, STAGE)?;
    for name in columns {
        df = df.drop(name)?;
    }
    Ok(df)
}

fn impute_missing(df: DataFrame) -> Result<DataFrame> {
    require_columns(&df, &MEDIAN_IMPUTED_COLUMNS, STAGE)?;
    require_columns(&df, &[REVIEW_COMMENT_COLUMN], STAGE)?;

    // Medians are taken over non-missing values of the table as it is now.
    let mut exprs: Vec<Expr> = MEDIAN_IMPUTED_COLUMNS
        .iter()
        .map(|name| {
            let values = nan_as_null(&df, name);
            values.clone().fill_null(values.median()).alias(*name)
        })
        .collect();

    exprs.push(
        col(REVIEW_COMMENT_COLUMN)
            .fill_null(lit(NO_REVIEW_SENTINEL))
            .alias(REVIEW_COMMENT_COLUMN),
    );

    Ok(df.lazy().with_columns(exprs).collect()?)
}

fn select_numeric(df: &DataFrame) -> Result<DataFrame> {
    let numeric: Vec<Column> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype().is_primitive_numeric())
        .cloned()
        .collect();

    Ok(DataFrame::new(numeric)?)
}
