//! Data cleaning strategies for the orders dataset.
//!
//! Cleaning is split into interchangeable strategies that all share one
//! contract, [`DataStrategy::handle_data`]. A [`DataCleaning`] context binds a
//! table to a strategy and runs it:
//!
//! ```no_run
//! use review_prep::cleaning::{DataCleaning, DataDivideStrategy, DataPreProcessStrategy};
//! # fn run(raw: polars::prelude::DataFrame) -> review_prep::error::Result<()> {
//! let processed = DataCleaning::new(raw, DataPreProcessStrategy).execute()?;
//! let split = DataCleaning::new(processed, DataDivideStrategy::default()).execute()?;
//! println!("{} training rows", split.train_len());
//! # Ok(())
//! # }
//! ```
//!
//! Strategies never modify the table they are given; they return a new one.

pub mod divide;
mod frame;
pub mod preprocess;
pub mod strategy;

pub use divide::{DataDivideStrategy, TrainTestSplit};
pub use preprocess::DataPreProcessStrategy;
pub use strategy::{DataCleaning, DataStrategy};

pub(crate) use frame::nan_as_null;
