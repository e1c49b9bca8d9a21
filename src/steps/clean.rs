use crate::cleaning::{
    DataCleaning, DataDivideStrategy, DataPreProcessStrategy, TrainTestSplit, nan_as_null,
};
use crate::config::SplitConfig;
use crate::error::Result;
use crate::schema::LABEL_COLUMN;
use polars::prelude::*;

/// Preprocess the raw table and divide it into train and test sets.
///
/// Feature columns still holding missing values after preprocessing are
/// filled with their median before the split. Rows without a label are
/// dropped by the split, never imputed.
///
/// # Errors
///
/// Propagates schema and data errors from either strategy, and configuration
/// errors for an invalid [`SplitConfig`].
pub fn clean_df(df: DataFrame, split: &SplitConfig) -> Result<TrainTestSplit> {
    prepare(df, split).inspect_err(|e| tracing::error!("Error in cleaning data: {e}"))
}

fn prepare(df: DataFrame, split: &SplitConfig) -> Result<TrainTestSplit> {
    let divide = DataDivideStrategy::from_config(split)?;

    let processed = DataCleaning::new(df, DataPreProcessStrategy).execute()?;
    let processed = fill_remaining_missing(processed)?;

    let result = DataCleaning::new(processed, divide).execute()?;

    tracing::info!(
        train_rows = result.train_len(),
        test_rows = result.test_len(),
        features = result.x_train.width(),
        "Data cleaning completed successfully"
    );
    Ok(result)
}

fn fill_remaining_missing(df: DataFrame) -> Result<DataFrame> {
    let features: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != LABEL_COLUMN)
        .map(|name| name.to_string())
        .collect();

    let normalized: Vec<Expr> = features
        .iter()
        .map(|name| nan_as_null(&df, name))
        .collect();
    let df = df.lazy().with_columns(normalized).collect()?;

    let incomplete: Vec<&String> = features
        .iter()
        .filter(|name| df.column(name).is_ok_and(|c| c.null_count() > 0))
        .collect();

    if incomplete.is_empty() {
        tracing::debug!("No missing values remain after preprocessing");
        return Ok(df);
    }

    tracing::warn!(
        columns = ?incomplete,
        "Missing values remain after preprocessing; imputing with column medians"
    );
    let fills: Vec<Expr> = incomplete
        .iter()
        .map(|name| {
            col(name.as_str())
                .fill_null(col(name.as_str()).median())
                .alias(name.as_str())
        })
        .collect();

    Ok(df.lazy().with_columns(fills).collect()?)
}
