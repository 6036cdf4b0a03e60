use std::sync::Arc;

use super::{BinStrategy, ModuloBins};
use crate::error::{Error, Result};

/// An ordered set of bin strategies, one per matrix column.
///
/// Axis `i` is bound to column `i`, in the order strategies were added. Every
/// matrix operation requires the column count to equal [`Bins::num_axes`].
///
/// Strategies are immutable, so they are shared behind `Arc`: adding the same
/// strategy to several axes is cheap.
#[derive(Debug, Clone)]
pub struct Bins {
    default_strategy: Arc<dyn BinStrategy>,
    strategies: Vec<Arc<dyn BinStrategy>>,
}

impl Bins {
    /// An empty set whose default strategy is [`ModuloBins::default`].
    pub fn new() -> Self {
        Self {
            default_strategy: Arc::new(ModuloBins::default()),
            strategies: Vec::new(),
        }
    }

    /// Set the strategy [`Bins::add_axis`] falls back to.
    pub fn with_default_strategy(mut self, strategy: impl BinStrategy + 'static) -> Self {
        self.default_strategy = Arc::new(strategy);
        self
    }

    /// Append an axis with `strategy`.
    pub fn with_axis(mut self, strategy: impl BinStrategy + 'static) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Append one axis; `None` uses the default strategy.
    pub fn add_axis(&mut self, strategy: Option<Arc<dyn BinStrategy>>) {
        let strategy = strategy.unwrap_or_else(|| Arc::clone(&self.default_strategy));
        self.strategies.push(strategy);
    }

    /// Append axes in order.
    pub fn add_axes<I>(&mut self, strategies: I)
    where
        I: IntoIterator<Item = Arc<dyn BinStrategy>>,
    {
        for strategy in strategies {
            self.add_axis(Some(strategy));
        }
    }

    /// Replace every axis with `n_axes` copies of `strategy`.
    pub fn set_uniform(&mut self, n_axes: usize, strategy: Arc<dyn BinStrategy>) {
        self.strategies = vec![strategy; n_axes];
    }

    /// Remove all axes.
    pub fn clear(&mut self) {
        self.strategies.clear();
    }

    /// Number of configured axes.
    pub fn num_axes(&self) -> usize {
        self.strategies.len()
    }

    /// The strategy bound to `axis`, if any.
    pub fn strategy(&self, axis: usize) -> Option<&dyn BinStrategy> {
        self.strategies.get(axis).map(|s| s.as_ref())
    }

    /// The strategy used when [`Bins::add_axis`] receives `None`.
    pub fn default_strategy(&self) -> &dyn BinStrategy {
        self.default_strategy.as_ref()
    }

    /// Bin ids for every value, column by column.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if a row's length differs from [`Bins::num_axes`].
    pub fn value_to_id(&self, values: &[Vec<f32>]) -> Result<Vec<Vec<i64>>> {
        self.map_columns(values, |s, v| s.value_to_id(v))
    }

    /// Bin start values for every id, column by column.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if a row's length differs from [`Bins::num_axes`].
    pub fn id_to_bin_start(&self, ids: &[Vec<i64>]) -> Result<Vec<Vec<f32>>> {
        self.map_columns(ids, |s, id| s.id_to_bin_start(id))
    }

    /// Bin center values for every id, column by column.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if a row's length differs from [`Bins::num_axes`].
    pub fn id_to_bin_center(&self, ids: &[Vec<i64>]) -> Result<Vec<Vec<f32>>> {
        self.map_columns(ids, |s, id| s.id_to_bin_center(id))
    }

    fn map_columns<T, U, F>(&self, rows: &[Vec<T>], f: F) -> Result<Vec<Vec<U>>>
    where
        T: Copy,
        F: Fn(&dyn BinStrategy, T) -> U,
    {
        let n_axes = self.strategies.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n_axes) {
            return Err(Error::DimensionMismatch {
                expected: n_axes,
                found: row.len(),
            });
        }

        Ok(rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.strategies)
                    .map(|(&x, s)| f(s.as_ref(), x))
                    .collect()
            })
            .collect())
    }
}

impl Default for Bins {
    fn default() -> Self {
        Self::new()
    }
}

/// View a 1D series as a single-column matrix.
pub fn as_column<T: Copy>(values: &[T]) -> Vec<Vec<T>> {
    values.iter().map(|&v| vec![v]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::LinSpaceBins;

    fn two_axes() -> Bins {
        Bins::new()
            .with_axis(ModuloBins::new(100, 0).unwrap())
            .with_axis(ModuloBins::new(25, 0).unwrap())
    }

    #[test]
    fn test_bins_value_to_id_per_column() {
        let bins = two_axes();
        let ids = bins
            .value_to_id(&[vec![1253.0, 1253.0], vec![254.0, 60.0]])
            .unwrap();
        assert_eq!(ids, vec![vec![12, 50], vec![2, 2]]);

        let centers = bins.id_to_bin_center(&ids).unwrap();
        assert_eq!(centers, vec![vec![1250.0, 1262.5], vec![250.0, 62.5]]);

        let starts = bins.id_to_bin_start(&ids).unwrap();
        assert_eq!(starts, vec![vec![1200.0, 1250.0], vec![200.0, 50.0]]);
    }

    #[test]
    fn test_bins_shape_mismatch() {
        let bins = two_axes();
        assert!(matches!(
            bins.value_to_id(&[vec![1.0, 2.0, 3.0]]),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
        assert!(bins.id_to_bin_center(&[vec![1]]).is_err());
        assert!(bins.id_to_bin_start(&[vec![1, 2], vec![1]]).is_err());
    }

    #[test]
    fn test_bins_single_column_input() {
        let bins = Bins::new().with_axis(LinSpaceBins::new(0.0, 3000.0, 3).unwrap());
        let ids = bins
            .value_to_id(&as_column(&[1253.0, 254.0, 3098.0, 490.0]))
            .unwrap();
        assert_eq!(ids, vec![vec![1], vec![0], vec![3], vec![0]]);
    }

    #[test]
    fn test_bins_add_axis_default() {
        let mut bins = Bins::new().with_default_strategy(ModuloBins::new(10, 0).unwrap());
        bins.add_axis(None);
        bins.add_axis(Some(Arc::new(ModuloBins::default())));
        assert_eq!(bins.num_axes(), 2);
        assert_eq!(bins.strategy(0).unwrap().value_to_id(25.0), 2);
        assert_eq!(bins.strategy(1).unwrap().value_to_id(25.0), 0);
        assert!(bins.strategy(2).is_none());
    }

    #[test]
    fn test_bins_add_axes_order_and_uniform_replace() {
        let mut bins = Bins::new();
        let strategies: Vec<Arc<dyn BinStrategy>> = vec![
            Arc::new(ModuloBins::new(10, 0).unwrap()),
            Arc::new(ModuloBins::new(1000, 0).unwrap()),
        ];
        bins.add_axes(strategies);
        let ids = bins.value_to_id(&[vec![2500.0, 2500.0]]).unwrap();
        assert_eq!(ids, vec![vec![250, 2]]);

        bins.set_uniform(3, Arc::new(ModuloBins::default()));
        assert_eq!(bins.num_axes(), 3);
        bins.clear();
        assert_eq!(bins.num_axes(), 0);
    }

    #[test]
    fn test_bins_empty_matrix() {
        let bins = two_axes();
        assert!(bins.value_to_id(&[]).unwrap().is_empty());
    }
}
