//! Reading and writing tables.

use crate::error::{PrepError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a CSV or Parquet file into memory.
///
/// # Errors
///
/// Returns [`PrepError::Io`] if the file does not exist or cannot be opened,
/// and a data processing error if it cannot be parsed.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    // Surface a missing file as an I/O error rather than a parser error.
    std::fs::metadata(path)?;

    let ext = extension(path);
    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .finish()?
            .collect()?,
        "parquet" => ParquetReader::new(std::fs::File::open(path)?).finish()?,
        _ => {
            return Err(PrepError::InvalidData(format!(
                "Unsupported file extension: {ext}"
            )));
        }
    };

    Ok(df)
}

/// Write a table as Parquet when the path ends in `.parquet`, CSV otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_df(df: &mut DataFrame, path: &Path) -> Result<()> {
    if extension(path) == "parquet" {
        let file = std::fs::File::create(path)?;
        ParquetWriter::new(file)
            .finish(df)
            .context("Failed to write Parquet file")?;
    } else {
        let file = std::fs::File::create(path)?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .context("Failed to write CSV file")?;
    }

    Ok(())
}
