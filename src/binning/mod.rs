//! Per-axis binning: map continuous values to discrete bin ids and back.
//!
//! A [`BinStrategy`] is a small numerical contract over one axis:
//!
//! - `value_to_id`: which bin a value falls into,
//! - `id_to_bin_start`: the inclusive lower edge of a bin,
//! - `id_to_bin_center`: the representative value substituted for every raw
//!   value in that bin.
//!
//! Three strategies are provided:
//!
//! | strategy          | bins                                  | out-of-range ids       |
//! |-------------------|---------------------------------------|------------------------|
//! | [`ModuloBins`]    | `mod`-wide classes offset by `rem`    | unbounded, no clamping |
//! | [`LinSpaceBins`]  | `n_bins` equal bins over `[min, max)` | clamped to edge bins   |
//! | [`ArrangeBins`]   | `step`-wide bins over `[min, max)`    | clamped to edge bins   |
//!
//! [`Bins`] binds one strategy to each column of a matrix. Columns are binned
//! independently, so a `d`-dimensional grid never has to be enumerated.
//!
//! ```rust
//! use calico::binning::{BinStrategy, Bins, LinSpaceBins, ModuloBins};
//!
//! let modulo = ModuloBins::new(100, 0).unwrap();
//! assert_eq!(modulo.value_to_id(1253.0), 12);
//! assert_eq!(modulo.id_to_bin_center(12), 1250.0);
//!
//! let bins = Bins::new()
//!     .with_axis(modulo)
//!     .with_axis(LinSpaceBins::new(0.0, 3000.0, 3).unwrap());
//! let ids = bins.value_to_id(&[vec![1253.0, 490.0], vec![254.0, 3098.0]]).unwrap();
//! assert_eq!(ids, vec![vec![12, 0], vec![2, 3]]);
//! ```

use std::fmt;

mod axes;
mod linear;
mod modulo;

pub use axes::{as_column, Bins};
pub use linear::{ArrangeBins, LinSpaceBins, DEFAULT_N_BINS};
pub use modulo::ModuloBins;

/// A per-axis mapping between values, bin ids, and representative bin values.
///
/// Implementations are immutable after construction and total over finite
/// input: no value or id makes them fail.
pub trait BinStrategy: fmt::Debug + Send + Sync {
    /// The id of the bin containing `value`.
    fn value_to_id(&self, value: f32) -> i64;

    /// The inclusive lower edge of bin `id`.
    fn id_to_bin_start(&self, id: i64) -> f32;

    /// The representative (center) value of bin `id`.
    fn id_to_bin_center(&self, id: i64) -> f32;

    /// Element-wise [`BinStrategy::value_to_id`].
    fn values_to_ids(&self, values: &[f32]) -> Vec<i64> {
        values.iter().map(|&v| self.value_to_id(v)).collect()
    }

    /// Element-wise [`BinStrategy::id_to_bin_start`].
    fn ids_to_bin_starts(&self, ids: &[i64]) -> Vec<f32> {
        ids.iter().map(|&id| self.id_to_bin_start(id)).collect()
    }

    /// Element-wise [`BinStrategy::id_to_bin_center`].
    fn ids_to_bin_centers(&self, ids: &[i64]) -> Vec<f32> {
        ids.iter().map(|&id| self.id_to_bin_center(id)).collect()
    }
}
