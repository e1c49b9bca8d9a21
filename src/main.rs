//! # review-prep command line
//!
//! ```bash
//! review-prep prepare --input data/olist_customers_dataset.csv --output-dir prepared
//! review-prep score --input predictions.csv --truth review_score --prediction prediction
//! ```
//!
//! Logging is configured from the `logging` section of `--config`; set
//! `RUST_LOG=debug` to override the level.

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;
use review_prep::config::{PipelineConfig, load_config};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    review_prep::logging::init(&config.logging)?;

    cli::run_command(cli.command, &config)
}
