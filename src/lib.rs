//! # review-prep - data preparation and evaluation for review-score regression
//!
//! review-prep cleans the orders dataset, splits it into train and test
//! partitions and scores a trained regression model. Tables are polars
//! [`DataFrame`](polars::prelude::DataFrame)s throughout.
//!
//! ## Quick Start
//!
//! ```no_run
//! use review_prep::{config::SplitConfig, steps};
//! use std::path::Path;
//!
//! # fn example() -> review_prep::error::Result<()> {
//! let raw = steps::ingest_df(Path::new("data/olist_customers_dataset.csv"))?;
//! let split = steps::clean_df(raw, &SplitConfig::default())?;
//! println!(
//!     "{} training rows, {} test rows",
//!     split.train_len(),
//!     split.test_len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`cleaning`]: the [`DataStrategy`](cleaning::DataStrategy) trait, the
//!   preprocessing and division strategies, and the
//!   [`DataCleaning`](cleaning::DataCleaning) context that runs them
//! - [`evaluation`]: MSE, RMSE and R²
//! - [`steps`]: ingest, clean and evaluate steps composed from the above
//! - [`schema`]: column names of the dataset
//! - [`error`]: error types
//! - [`config`] and [`logging`]: setup for the application composing the
//!   pipeline
//!
//! ## Strategies
//!
//! New cleaning behaviour is added by implementing
//! [`DataStrategy`](cleaning::DataStrategy); the context does not change:
//!
//! ```
//! use polars::prelude::*;
//! use review_prep::cleaning::{DataCleaning, DataStrategy};
//!
//! struct DropNulls;
//!
//! impl DataStrategy for DropNulls {
//!     type Output = DataFrame;
//!
//!     fn handle_data(&self, data: &DataFrame) -> review_prep::error::Result<DataFrame> {
//!         Ok(data.clone().lazy().drop_nulls(None).collect()?)
//!     }
//! }
//!
//! let df = DataFrame::new(vec![Column::from(Series::new("price".into(), &[Some(1.0), None]))])?;
//! let cleaned = DataCleaning::new(df, DropNulls).execute()?;
//! assert_eq!(cleaned.height(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod cleaning;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod logging;
pub mod schema;
pub mod steps;
