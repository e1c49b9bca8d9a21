//! Regression metrics.
//!
//! Each metric is a unit struct implementing [`Evaluation`]. Inputs must have
//! the same non-zero length and contain only finite values.
//!
//! ```
//! use review_prep::evaluation::{Evaluation, Mse, R2, Rmse};
//!
//! let y_true = [3.0, 5.0, 4.0];
//! let y_pred = [2.0, 5.0, 4.0];
//! assert!((Mse.calculate(&y_true, &y_pred)? - 1.0 / 3.0).abs() < 1e-12);
//! assert!((Rmse.calculate(&y_true, &y_pred)? - (1.0_f64 / 3.0).sqrt()).abs() < 1e-12);
//! assert!((R2.calculate(&y_true, &y_pred)? - 0.5).abs() < 1e-12);
//! # Ok::<(), review_prep::error::PrepError>(())
//! ```

use crate::error::{PrepError, Result};

/// A score computed from true and predicted values.
pub trait Evaluation: Send + Sync {
    /// Short name used when the score is logged or tracked.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a data error if the inputs differ in length, are empty, or
    /// contain non-finite values. The error is logged before it is returned.
    fn calculate(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64>;
}

/// Mean squared error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

/// Root mean squared error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

/// Coefficient of determination.
///
/// When `y_true` is constant the ratio is undefined; the score is then `1.0`
/// for an exact prediction and `0.0` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct R2;

fn check_inputs(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(PrepError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(PrepError::EmptyInput);
    }
    if let Some(pos) = y_true.iter().chain(y_pred).position(|v| !v.is_finite()) {
        let (side, idx) = if pos < y_true.len() {
            ("y_true", pos)
        } else {
            ("y_pred", pos - y_true.len())
        };
        return Err(PrepError::InvalidData(format!(
            "{side}[{idx}] is not a finite number"
        )));
    }
    Ok(())
}

fn sum_squared_residuals(y_true: &[f64], y_pred: &[f64]) -> f64 {
    y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum()
}

fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    sum_squared_residuals(y_true, y_pred) / y_true.len() as f64
}

fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    let ss_res = sum_squared_residuals(y_true, y_pred);

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Validates the inputs, computes the score and logs any failure.
fn score(
    name: &'static str,
    y_true: &[f64],
    y_pred: &[f64],
    f: impl FnOnce(&[f64], &[f64]) -> f64,
) -> Result<f64> {
    tracing::debug!("Calculating {name} over {} values", y_true.len());
    check_inputs(y_true, y_pred)
        .map(|()| f(y_true, y_pred))
        .inspect_err(|e| tracing::error!("Error in calculating {name}: {e}"))
}

impl Evaluation for Mse {
    fn name(&self) -> &'static str {
        "mse"
    }

    fn calculate(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        score("MSE", y_true, y_pred, mean_squared_error)
    }
}

impl Evaluation for Rmse {
    fn name(&self) -> &'static str {
        "rmse"
    }

    fn calculate(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        score("RMSE", y_true, y_pred, |t, p| mean_squared_error(t, p).sqrt())
    }
}

impl Evaluation for R2 {
    fn name(&self) -> &'static str {
        "r2"
    }

    fn calculate(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        score("R2", y_true, y_pred, r2_score)
    }
}
