//! The strategy trait and the context that runs it.

use crate::error::Result;
use polars::prelude::*;

/// A pluggable transformation applied to a table.
///
/// Implementations must be pure: the same table always yields the same output,
/// and the input is never modified. The only permitted side effect is logging.
pub trait DataStrategy: Send + Sync {
    /// What the strategy produces: a table, a train/test split, ...
    type Output;

    /// Apply the strategy to `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` lacks the columns the strategy needs or a
    /// transformation fails. The error is logged before it is returned.
    fn handle_data(&self, data: &DataFrame) -> Result<Self::Output>;
}

impl<S: DataStrategy + ?Sized> DataStrategy for Box<S> {
    type Output = S::Output;

    fn handle_data(&self, data: &DataFrame) -> Result<Self::Output> {
        (**self).handle_data(data)
    }
}

/// Binds one table to one strategy.
#[derive(Debug, Clone)]
pub struct DataCleaning<S> {
    data: DataFrame,
    strategy: S,
}

impl<S: DataStrategy> DataCleaning<S> {
    pub fn new(data: DataFrame, strategy: S) -> Self {
        Self { data, strategy }
    }

    /// Run the bound strategy on the bound table and return its result as is.
    ///
    /// # Errors
    ///
    /// Propagates the strategy's error unchanged after logging it.
    pub fn execute(&self) -> Result<S::Output> {
        self.strategy
            .handle_data(&self.data)
            .inspect_err(|e| tracing::error!("Error in handling data: {e}"))
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;

    /// Keeps the first `n` rows.
    struct HeadStrategy(usize);

    impl DataStrategy for HeadStrategy {
        type Output = DataFrame;

        fn handle_data(&self, data: &DataFrame) -> Result<DataFrame> {
            Ok(data.head(Some(self.0)))
        }
    }

    struct FailingStrategy;

    impl DataStrategy for FailingStrategy {
        type Output = DataFrame;

        fn handle_data(&self, _data: &DataFrame) -> Result<DataFrame> {
            Err(PrepError::missing_column("price", "failing"))
        }
    }

    fn sample() -> anyhow::Result<DataFrame> {
        Ok(DataFrame::new(vec![Column::from(Series::new(
            "price".into(),
            &[1.0, 2.0, 3.0, 4.0],
        ))])?)
    }

    #[test]
    fn test_context_delegates_to_strategy() -> anyhow::Result<()> {
        let cleaning = DataCleaning::new(sample()?, HeadStrategy(2));
        let out = cleaning.execute()?;

        assert_eq!(out.height(), 2);
        assert_eq!(cleaning.data().height(), 4, "bound table must be left as is");
        Ok(())
    }

    #[test]
    fn test_context_gives_back_its_parts() -> anyhow::Result<()> {
        let cleaning = DataCleaning::new(sample()?, HeadStrategy(3));
        assert_eq!(cleaning.strategy().0, 3);

        let data = cleaning.into_data();
        assert_eq!(data.height(), 4);
        Ok(())
    }

    #[test]
    fn test_context_propagates_error_unchanged() -> anyhow::Result<()> {
        let err = DataCleaning::new(sample()?, FailingStrategy)
            .execute()
            .unwrap_err();

        assert!(matches!(
            &err,
            PrepError::MissingColumn { column, stage: "failing" } if column == "price"
        ));
        Ok(())
    }

    #[test]
    fn test_boxed_strategies_share_one_context_type() -> anyhow::Result<()> {
        let strategies: Vec<Box<dyn DataStrategy<Output = DataFrame>>> =
            vec![Box::new(HeadStrategy(1)), Box::new(HeadStrategy(3))];

        let data = sample()?;
        let heights = strategies
            .into_iter()
            .map(|s| DataCleaning::new(data.clone(), s).execute().map(|df| df.height()))
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(heights, vec![1, 3]);
        Ok(())
    }
}
