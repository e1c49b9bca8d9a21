use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use review_prep::config::PipelineConfig;
use review_prep::io::{load_df, save_df};
use review_prep::steps::{self, InMemoryTracker, MetricTracker as _, TracingTracker};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "review-prep",
    about = "Prepare the orders dataset and score review-score predictions"
)]
pub struct Cli {
    /// Path to a JSON pipeline configuration file
    #[arg(long, global = true, env = "REVIEW_PREP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a raw orders file and write the train/test split
    Prepare {
        /// Raw orders file (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving X_train, X_test, y_train and y_test
        #[arg(short, long, default_value = "prepared")]
        output_dir: PathBuf,
    },
    /// Score predictions stored next to the true labels
    Score {
        /// File holding both label and prediction columns
        #[arg(short, long)]
        input: PathBuf,

        /// Column with the true labels
        #[arg(long, default_value = "review_score")]
        truth: String,

        /// Column with the model's predictions
        #[arg(long, default_value = "prediction")]
        prediction: String,

        /// Print the recorded metrics as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_command(command: Commands, config: &PipelineConfig) -> Result<()> {
    match command {
        Commands::Prepare { input, output_dir } => handle_prepare(&input, &output_dir, config),
        Commands::Score {
            input,
            truth,
            prediction,
            json,
        } => handle_score(&input, &truth, &prediction, json),
    }
}

#[expect(clippy::print_stdout)]
fn handle_prepare(input: &Path, output_dir: &Path, config: &PipelineConfig) -> Result<()> {
    let raw = steps::ingest_df(input)?;
    let split = steps::clean_df(raw, &config.split)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let ext = config.output_format.extension();
    let (x_train, x_test, y_train, y_test) = split.into_parts();
    let outputs = [
        ("X_train", x_train),
        ("X_test", x_test),
        ("y_train", y_train.into_frame()),
        ("y_test", y_test.into_frame()),
    ];

    for (name, mut df) in outputs {
        let path = output_dir.join(format!("{name}.{ext}"));
        save_df(&mut df, &path)?;
        tracing::info!(rows = df.height(), "Wrote {}", path.display());
        println!("{name}: {} rows x {} columns -> {}", df.height(), df.width(), path.display());
    }

    Ok(())
}

#[expect(clippy::print_stdout)]
fn handle_score(input: &Path, truth: &str, prediction: &str, json: bool) -> Result<()> {
    let df = load_df(input)?;

    let column_values = |name: &str| -> Result<Vec<f64>> {
        let series = df
            .column(name)
            .with_context(|| format!("Column '{name}' not found in {}", input.display()))?
            .as_materialized_series();
        Ok(steps::series_to_vec(series)?)
    };
    let y_true = column_values(truth)?;
    let y_pred = column_values(prediction)?;

    let mut tracker = InMemoryTracker::new();
    let scores = steps::score_predictions(&y_true, &y_pred, &mut tracker)?;

    for record in tracker.records() {
        TracingTracker.log_metric(&record.name, record.value);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(tracker.records())?);
    } else {
        let mse = tracker.latest("mse").unwrap_or(f64::NAN);
        println!("MSE:  {mse:.6}");
        println!("RMSE: {:.6}", scores.rmse);
        println!("R2:   {:.6}", scores.r2);
    }

    Ok(())
}
