//! Pipeline configuration, stored as JSON.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! {
//!   "logging": { "level": "debug", "file_logging": true },
//!   "split": { "test_size": 0.25 }
//! }
//! ```

use crate::error::{PrepError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Also write rotating log files
    pub file_logging: bool,
    /// Directory for log files. Defaults to the platform data directory.
    pub log_dir: Option<PathBuf>,
    /// Colourised console output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file_logging: false,
            log_dir: None,
            ansi: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of labelled rows held out for testing
    pub test_size: f64,
    /// Seed for the row shuffle
    pub random_state: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            random_state: 42,
        }
    }
}

/// File format of the prepared train/test outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub logging: LoggingConfig,
    pub split: SplitConfig,
    pub output_format: OutputFormat,
}

impl PipelineConfig {
    /// # Errors
    ///
    /// Returns [`PrepError::Config`] for an out-of-range test fraction or an
    /// empty log level.
    pub fn validate(&self) -> Result<()> {
        let test_size = self.split.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(PrepError::Config(format!(
                "split.test_size must be between 0 and 1, got {test_size}"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(PrepError::Config("logging.level is empty".to_owned()));
        }
        Ok(())
    }
}

/// Read and validate a JSON config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails
/// [`PipelineConfig::validate`].
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn save_config(path: &Path, config: &PipelineConfig) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
