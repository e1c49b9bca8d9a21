//! Train/test division of the preprocessed table.

use super::frame::{nan_as_null, require_columns};
use super::strategy::DataStrategy;
use crate::config::SplitConfig;
use crate::error::{PrepError, Result};
use crate::schema::LABEL_COLUMN;
use polars::prelude::*;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;

const STAGE: &str = "divide";

/// Features and labels partitioned into training and test rows.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: Series,
    pub y_test: Series,
}

impl TrainTestSplit {
    pub fn train_len(&self) -> usize {
        self.x_train.height()
    }

    pub fn test_len(&self) -> usize {
        self.x_test.height()
    }

    /// `(X_train, X_test, y_train, y_test)`
    pub fn into_parts(self) -> (DataFrame, DataFrame, Series, Series) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }
}

/// Splits rows with a known `review_score` into shuffled train and test sets.
///
/// The shuffle is seeded, so a given table and configuration always produce
/// the same partition. The split is plain random, not stratified by label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataDivideStrategy {
    test_size: f64,
    random_state: u64,
}

impl Default for DataDivideStrategy {
    fn default() -> Self {
        let split = SplitConfig::default();
        Self {
            test_size: split.test_size,
            random_state: split.random_state,
        }
    }
}

impl DataDivideStrategy {
    /// # Errors
    ///
    /// Returns [`PrepError::Config`] unless `0 < test_size < 1`.
    pub fn new(test_size: f64, random_state: u64) -> Result<Self> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(PrepError::Config(format!(
                "test_size must be between 0 and 1, got {test_size}"
            )));
        }
        Ok(Self {
            test_size,
            random_state,
        })
    }

    /// # Errors
    ///
    /// Returns [`PrepError::Config`] if the configured test fraction is out of range.
    pub fn from_config(config: &SplitConfig) -> Result<Self> {
        Self::new(config.test_size, config.random_state)
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    pub fn random_state(&self) -> u64 {
        self.random_state
    }

    fn divide(&self, data: &DataFrame) -> Result<TrainTestSplit> {
        require_columns(data, &[LABEL_COLUMN], STAGE)?;

        let df = data
            .clone()
            .lazy()
            .with_column(nan_as_null(data, LABEL_COLUMN))
            .filter(col(LABEL_COLUMN).is_not_null())
            .collect()?;

        let (train_idx, test_idx) = self.shuffled_indices(df.height())?;

        let x = df.drop(LABEL_COLUMN)?;
        let y = df.column(LABEL_COLUMN)?.as_materialized_series();

        Ok(TrainTestSplit {
            x_train: x.take(&train_idx)?,
            x_test: x.take(&test_idx)?,
            y_train: y.take(&train_idx)?,
            y_test: y.take(&test_idx)?,
        })
    }

    /// Row indices for the train and test sides of an `n`-row table.
    ///
    /// The test side takes `ceil(n * test_size)` rows from the front of a seeded
    /// permutation; the train side takes the rest.
    fn shuffled_indices(&self, n: usize) -> Result<(IdxCa, IdxCa)> {
        if n == 0 {
            return Err(PrepError::EmptyInput);
        }

        let n_test = (n as f64 * self.test_size).ceil() as usize;
        let n_train = n.saturating_sub(n_test);
        if n_train == 0 || n_test == 0 {
            return Err(PrepError::InvalidData(format!(
                "{n} labelled rows cannot be split with test_size {}",
                self.test_size
            )));
        }

        let height = IdxSize::try_from(n)
            .map_err(|_overflow| PrepError::InvalidData(format!("{n} rows exceed index range")))?;
        let mut permutation: Vec<IdxSize> = (0..height).collect();
        permutation.shuffle(&mut StdRng::seed_from_u64(self.random_state));

        let (test, train) = permutation.split_at(n_test);
        Ok((
            IdxCa::from_vec("train".into(), train.to_vec()),
            IdxCa::from_vec("test".into(), test.to_vec()),
        ))
    }
}

impl DataStrategy for DataDivideStrategy {
    type Output = TrainTestSplit;

    fn handle_data(&self, data: &DataFrame) -> Result<TrainTestSplit> {
        self.divide(data)
            .inspect_err(|e| tracing::error!("Error in dividing data: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn labelled(n: i64, missing_every: Option<i64>) -> anyhow::Result<DataFrame> {
        let ids: Vec<i64> = (0..n).collect();
        let feature: Vec<f64> = (0..n).map(|i| i as f64 * 1.5).collect();
        let labels: Vec<Option<f64>> = (0..n)
            .map(|i| match missing_every {
                Some(k) if i % k == 0 => None,
                _ => Some((i % 5 + 1) as f64),
            })
            .collect();

        Ok(DataFrame::new(vec![
            Column::from(Series::new("id".into(), ids)),
            Column::from(Series::new("price".into(), feature)),
            Column::from(Series::new(LABEL_COLUMN.into(), labels)),
        ])?)
    }

    fn ids(df: &DataFrame) -> anyhow::Result<Vec<i64>> {
        Ok(df
            .column("id")?
            .as_materialized_series()
            .i64()?
            .into_no_null_iter()
            .collect())
    }

    #[test]
    fn test_divide_sizes_follow_test_fraction() -> anyhow::Result<()> {
        let split = DataDivideStrategy::default().handle_data(&labelled(10, None)?)?;

        assert_eq!(split.train_len(), 8);
        assert_eq!(split.test_len(), 2);
        assert_eq!(split.y_train.len(), 8);
        assert_eq!(split.y_test.len(), 2);
        assert!(split.x_train.column(LABEL_COLUMN).is_err());
        Ok(())
    }

    #[test]
    fn test_divide_is_deterministic() -> anyhow::Result<()> {
        let df = labelled(50, Some(7))?;
        let strategy = DataDivideStrategy::default();

        let a = strategy.handle_data(&df)?;
        let b = strategy.handle_data(&df)?;

        assert!(a.x_train.equals_missing(&b.x_train));
        assert!(a.x_test.equals_missing(&b.x_test));
        assert!(a.y_train.equals_missing(&b.y_train));
        assert!(a.y_test.equals_missing(&b.y_test));
        Ok(())
    }

    #[test]
    fn test_divide_seed_changes_partition() -> anyhow::Result<()> {
        let df = labelled(50, None)?;

        let a = DataDivideStrategy::new(0.2, 42)?.handle_data(&df)?;
        let b = DataDivideStrategy::new(0.2, 7)?.handle_data(&df)?;

        assert_ne!(ids(&a.x_test)?, ids(&b.x_test)?);
        Ok(())
    }

    #[test]
    fn test_divide_partitions_labelled_rows() -> anyhow::Result<()> {
        // Every third row has no label.
        let df = labelled(30, Some(3))?;
        let split = DataDivideStrategy::default().handle_data(&df)?;

        assert_eq!(split.train_len() + split.test_len(), 20);
        assert_eq!(split.y_train.null_count() + split.y_test.null_count(), 0);

        let train: BTreeSet<i64> = ids(&split.x_train)?.into_iter().collect();
        let test: BTreeSet<i64> = ids(&split.x_test)?.into_iter().collect();
        assert!(train.is_disjoint(&test), "train and test overlap");

        let expected: BTreeSet<i64> = (0..30).filter(|i| i % 3 != 0).collect();
        let all: BTreeSet<i64> = train.union(&test).copied().collect();
        assert_eq!(all, expected);
        Ok(())
    }

    #[test]
    fn test_divide_keeps_features_aligned_with_labels() -> anyhow::Result<()> {
        let split = DataDivideStrategy::default().handle_data(&labelled(20, None)?)?;

        let ids = ids(&split.x_train)?;
        let labels: Vec<f64> = split.y_train.f64()?.into_no_null_iter().collect();
        for (id, label) in ids.iter().zip(labels) {
            assert_eq!((id % 5 + 1) as f64, label, "row {id} lost its label");
        }
        Ok(())
    }

    #[test]
    fn test_divide_drops_nan_labels() -> anyhow::Result<()> {
        let df = DataFrame::new(vec![
            Column::from(Series::new("price".into(), &[1.0, 2.0, 3.0])),
            Column::from(Series::new(LABEL_COLUMN.into(), &[4.0, 5.0, f64::NAN])),
        ])?;

        let split = DataDivideStrategy::default().handle_data(&df)?;
        assert_eq!(split.train_len(), 1);
        assert_eq!(split.test_len(), 1);
        Ok(())
    }

    #[test]
    fn test_divide_missing_label_is_schema_error() -> anyhow::Result<()> {
        let df = labelled(10, None)?.drop(LABEL_COLUMN)?;
        let err = DataDivideStrategy::default().handle_data(&df).unwrap_err();

        assert!(matches!(
            &err,
            PrepError::MissingColumn { column, stage: "divide" } if column == LABEL_COLUMN
        ));
        Ok(())
    }

    #[test]
    fn test_divide_too_few_rows() -> anyhow::Result<()> {
        let err = DataDivideStrategy::default()
            .handle_data(&labelled(1, None)?)
            .unwrap_err();
        assert!(err.is_data_error());

        let err = DataDivideStrategy::default()
            .handle_data(&labelled(4, Some(1))?)
            .unwrap_err();
        assert!(matches!(err, PrepError::EmptyInput));
        Ok(())
    }

    #[test]
    fn test_divide_from_config() -> anyhow::Result<()> {
        let strategy = DataDivideStrategy::from_config(&SplitConfig {
            test_size: 0.3,
            random_state: 7,
        })?;
        assert!((strategy.test_size() - 0.3).abs() < f64::EPSILON);
        assert_eq!(strategy.random_state(), 7);

        let defaults = DataDivideStrategy::default();
        assert!((defaults.test_size() - 0.2).abs() < f64::EPSILON);
        assert_eq!(defaults.random_state(), 42);
        Ok(())
    }

    #[test]
    fn test_divide_rejects_bad_test_size() {
        assert!(DataDivideStrategy::new(0.0, 42).is_err());
        assert!(DataDivideStrategy::new(1.0, 42).is_err());
        assert!(DataDivideStrategy::new(f64::NAN, 42).is_err());
        assert!(DataDivideStrategy::new(0.25, 42).is_ok());
    }
}
