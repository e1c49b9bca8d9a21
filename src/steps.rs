//! Pipeline steps built on the cleaning strategies and metrics.
//!
//! ```text
//! ingest_df ──> clean_df ──> (model training, external) ──> evaluate_model
//!   CSV           preprocess + divide                         MSE, R², RMSE
//! ```
//!
//! Each step logs failures with its own context and returns the underlying
//! error unchanged.

pub mod clean;
pub mod evaluate;
pub mod ingest;

pub use clean::clean_df;
pub use evaluate::{
    EvaluationScores, InMemoryTracker, MetricRecord, MetricTracker, Regressor, TracingTracker,
    evaluate_model, score_predictions, series_to_vec,
};
pub use ingest::ingest_df;
