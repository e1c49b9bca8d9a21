use crate::error::{PrepError, Result};
use crate::io::load_df;
use polars::prelude::DataFrame;
use std::path::Path;

/// Load the raw orders dataset.
///
/// # Errors
///
/// Returns [`PrepError::Io`] when the file is missing or unreadable; the
/// cleaning steps are never reached in that case.
pub fn ingest_df(path: &Path) -> Result<DataFrame> {
    let df = load_df(path).inspect_err(|e| match e {
        PrepError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!("Data file not found at {}", path.display());
        }
        other => tracing::error!("Error while ingesting {}: {other}", path.display()),
    })?;

    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "Ingested {}",
        path.display()
    );
    Ok(df)
}
