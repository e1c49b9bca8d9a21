use crate::error::{PrepError, Result};
use crate::evaluation::{Evaluation, Mse, R2, Rmse};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A fitted regression model. Training happens outside this crate.
pub trait Regressor {
    /// One prediction per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot score `x`.
    fn predict(&self, x: &DataFrame) -> Result<Vec<f64>>;
}

impl<F> Regressor for F
where
    F: Fn(&DataFrame) -> Result<Vec<f64>>,
{
    fn predict(&self, x: &DataFrame) -> Result<Vec<f64>> {
        self(x)
    }
}

/// Destination for evaluation scores, such as an experiment tracker.
pub trait MetricTracker {
    fn log_metric(&mut self, name: &str, value: f64);
}

/// Records metrics as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracker;

impl MetricTracker for TracingTracker {
    fn log_metric(&mut self, name: &str, value: f64) {
        tracing::info!(metric = name, value, "Recorded metric");
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub value: f64,
}

/// Keeps every recorded metric in order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTracker {
    records: Vec<MetricRecord>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Most recent value recorded under `name`.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.records
            .iter()
            .rev()
            .find(|r| r.name == name)
            .map(|r| r.value)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MetricTracker for InMemoryTracker {
    fn log_metric(&mut self, name: &str, value: f64) {
        self.records.push(MetricRecord {
            timestamp: Utc::now(),
            name: name.to_owned(),
            value,
        });
    }
}

/// Scores returned to the caller. MSE is only sent to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationScores {
    pub r2: f64,
    pub rmse: f64,
}

/// Numeric label values of `series` as `f64`.
///
/// # Errors
///
/// Returns [`PrepError::InvalidData`] if the series has missing values or
/// values that are not numbers.
pub fn series_to_vec(series: &Series) -> Result<Vec<f64>> {
    let missing = series.null_count();
    if missing > 0 {
        return Err(PrepError::InvalidData(format!(
            "'{}' has {missing} missing values",
            series.name()
        )));
    }
    // Casting turns unparsable values into nulls.
    let values = series.cast(&DataType::Float64)?;
    let invalid = values.null_count();
    if invalid > 0 {
        return Err(PrepError::InvalidData(format!(
            "'{}' has {invalid} non-numeric values",
            series.name()
        )));
    }
    Ok(values.f64()?.into_no_null_iter().collect())
}

/// Score precomputed predictions, recording MSE, R² and RMSE.
///
/// # Errors
///
/// Returns the first metric error, see [`Evaluation::calculate`].
pub fn score_predictions<T>(
    y_true: &[f64],
    y_pred: &[f64],
    tracker: &mut T,
) -> Result<EvaluationScores>
where
    T: MetricTracker + ?Sized,
{
    let mse = Mse.calculate(y_true, y_pred)?;
    tracker.log_metric(Mse.name(), mse);

    let r2 = R2.calculate(y_true, y_pred)?;
    tracker.log_metric(R2.name(), r2);

    let rmse = Rmse.calculate(y_true, y_pred)?;
    tracker.log_metric(Rmse.name(), rmse);

    Ok(EvaluationScores { r2, rmse })
}

/// Predict on the test features and score the predictions against `y_test`.
///
/// # Errors
///
/// Propagates prediction failures and metric errors, e.g. a model returning a
/// different number of predictions than there are test rows.
pub fn evaluate_model<M, T>(
    model: &M,
    x_test: &DataFrame,
    y_test: &Series,
    tracker: &mut T,
) -> Result<EvaluationScores>
where
    M: Regressor + ?Sized,
    T: MetricTracker + ?Sized,
{
    model
        .predict(x_test)
        .and_then(|y_pred| {
            let y_true = series_to_vec(y_test)?;
            score_predictions(&y_true, &y_pred, tracker)
        })
        .inspect_err(|e| tracing::error!("Error in evaluating model: {e}"))
}
