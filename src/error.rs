//! Error handling for the review-prep pipeline.
//!
//! Errors fall into three groups:
//!
//! - **Schema errors**: a column the dataset is required to carry is missing
//!   ([`PrepError::MissingColumn`]).
//! - **Data errors**: invalid numeric input to a metric, or a table that cannot
//!   be split ([`PrepError::LengthMismatch`], [`PrepError::EmptyInput`],
//!   [`PrepError::InvalidData`]).
//! - **I/O errors**: the raw dataset could not be loaded or written
//!   ([`PrepError::Io`]).
//!
//! Every component logs at its own boundary and hands the original error back
//! to the caller unchanged:
//!
//! ```
//! use review_prep::error::PrepError;
//!
//! fn describe(err: &PrepError) -> &'static str {
//!     if err.is_schema_error() {
//!         "dataset is missing a required column"
//!     } else if err.is_data_error() {
//!         "invalid data"
//!     } else {
//!         "other failure"
//!     }
//! }
//!
//! let err = PrepError::MissingColumn {
//!     column: "review_score".to_owned(),
//!     stage: "divide",
//! };
//! assert_eq!(describe(&err), "dataset is missing a required column");
//! ```
//!
//! ## Context Extension Trait
//!
//! The loader and configuration glue use [`ResultExt::context`] to attach a
//! message. The cleaning strategies and metrics never rewrap errors.

use std::fmt;

/// Main error type for review-prep operations.
#[derive(Debug)]
pub enum PrepError {
    /// I/O errors (reading or writing datasets and config files)
    Io(std::io::Error),

    /// A column required by a pipeline stage is absent
    MissingColumn {
        column: String,
        stage: &'static str,
    },

    /// Metric inputs of different lengths
    LengthMismatch { y_true: usize, y_pred: usize },

    /// Metric inputs or a table with no rows
    EmptyInput,

    /// Non-finite values, missing labels and similar content problems
    InvalidData(String),

    /// Errors raised by polars while transforming a table
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl PrepError {
    pub fn missing_column(column: impl Into<String>, stage: &'static str) -> Self {
        Self::MissingColumn {
            column: column.into(),
            stage,
        }
    }

    /// True for errors caused by the input table lacking a required column.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }

    /// True for errors caused by invalid values rather than structure.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::EmptyInput | Self::InvalidData(_)
        )
    }
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingColumn { column, stage } => {
                write!(f, "Schema error: column '{column}' not found ({stage})")
            }
            Self::LengthMismatch { y_true, y_pred } => write!(
                f,
                "Data error: y_true has {y_true} values but y_pred has {y_pred}"
            ),
            Self::EmptyInput => write!(f, "Data error: input is empty"),
            Self::InvalidData(msg) => write!(f, "Data error: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for PrepError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for review-prep operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PrepError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: PrepError = e.into();
            PrepError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: PrepError = e.into();
            PrepError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::missing_column("price", "preprocess");
        assert_eq!(
            err.to_string(),
            "Schema error: column 'price' not found (preprocess)"
        );

        let err = PrepError::LengthMismatch {
            y_true: 10,
            y_pred: 9,
        };
        assert_eq!(
            err.to_string(),
            "Data error: y_true has 10 values but y_pred has 9"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(PrepError::missing_column("review_score", "divide").is_schema_error());
        assert!(PrepError::EmptyInput.is_data_error());
        assert!(PrepError::InvalidData("NaN".to_owned()).is_data_error());
        assert!(!PrepError::Config("bad".to_owned()).is_data_error());
        assert!(!PrepError::EmptyInput.is_schema_error());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err: PrepError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "orders.csv").into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(matches!(err, PrepError::Io(_)));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "orders.csv",
        ));

        let result: Result<()> = result.context("Failed to read dataset");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read dataset")
        );
    }
}
