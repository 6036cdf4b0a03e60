//! Clustering on coarse-grained data.
//!
//! Coarse-graining replaces every point by the center of the grid cell it falls
//! into and keeps one copy of each occupied cell. Many raw samples collapse
//! onto one cell, so the clustering input shrinks while its overall shape is
//! preserved.
//!
//! ```text
//! X ──value_to_id──▶ ids ──dedup──▶ unique ids ──id_to_bin_center──▶ coarse X
//! ```
//!
//! Two wrappers consume it:
//!
//! - [`CgCluster`]: fits any [`Estimator`](crate::cluster::Estimator) on the
//!   coarse data.
//! - [`KmCalico`]: iterative clustering assisted by coarse-graining. A centroid
//!   model is fit on the coarse data; its centers seed a single-restart fit on
//!   the full-resolution data.
//!
//! ## Axis configuration
//!
//! Both wrappers share the [`CoarseGrain`] behavior:
//!
//! - no axes configured: every column gets [`ModuloBins::default`] and a notice
//!   is logged;
//! - fewer axes than columns (but at least one): [`Error::AmbiguousBinning`];
//! - more axes than columns: [`Error::DimensionMismatch`] from the binning step.
//!
//! ## Usage
//!
//! ```rust
//! use calico::binning::{Bins, LinSpaceBins};
//! use calico::cluster::Kmeans;
//! use calico::coarse::{KmCalico, ModelKind};
//!
//! let data = vec![
//!     vec![0.1, 0.2],
//!     vec![0.3, 0.1],
//!     vec![0.2, 0.4],
//!     vec![9.1, 9.3],
//!     vec![9.4, 9.2],
//!     vec![9.3, 9.6],
//! ];
//! let bins = Bins::new()
//!     .with_axis(LinSpaceBins::new(0.0, 10.0, 10).unwrap())
//!     .with_axis(LinSpaceBins::new(0.0, 10.0, 10).unwrap());
//!
//! let mut calico = KmCalico::new(Kmeans::new(2).with_seed(0)).with_bins(bins);
//! calico.fit(&data).unwrap();
//! let labels = calico.predict(&data, ModelKind::Fine).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[3]);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::binning::{BinStrategy, Bins, ModuloBins};
use crate::cluster::util::check_dims;
use crate::error::{Error, Result};
use crate::metrics::{completeness_score, homogeneity_score, rand_score};

mod calico;
mod cg_cluster;

pub use calico::KmCalico;
pub use cg_cluster::CgCluster;

/// Which model a wrapper predicts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// The model fit on coarse-grained data.
    Coarse,
    /// The full-resolution model seeded from the coarse one ([`KmCalico`] only).
    Fine,
    /// A fresh fit of the caller's template on the raw data, ignoring fitted state.
    Default,
}

impl ModelKind {
    /// The selector string accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Coarse => "coarse",
            ModelKind::Fine => "fine",
            ModelKind::Default => "default",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "coarse" => Ok(ModelKind::Coarse),
            "fine" => Ok(ModelKind::Fine),
            "default" => Ok(ModelKind::Default),
            other => Err(Error::InvalidModelSelection {
                requested: other.to_string(),
                allowed: "coarse, fine, default",
            }),
        }
    }
}

/// Supervised scores of a predicted labeling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scores {
    /// Rand index in `[0, 1]`.
    pub rand_score: f64,
    /// See [`homogeneity_score`].
    pub homogeneity_score: f64,
    /// See [`completeness_score`].
    pub completeness_score: f64,
    /// `len(y_true) * (1 - rand_score)`.
    pub n_misclassified: f64,
}

impl Scores {
    /// Score `y_pred` against `y_true`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the label slices differ in length.
    pub fn compute(y_true: &[usize], y_pred: &[usize]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(Error::DimensionMismatch {
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }
        let rand = rand_score(y_true, y_pred);
        Ok(Self {
            rand_score: rand,
            homogeneity_score: homogeneity_score(y_true, y_pred),
            completeness_score: completeness_score(y_true, y_pred),
            n_misclassified: y_true.len() as f64 * (1.0 - rand),
        })
    }
}

/// Coarse-graining over a configurable [`Bins`].
///
/// Implementors only expose their axis set; the binning policy lives here.
pub trait CoarseGrain {
    /// The configured axes.
    fn bins(&self) -> &Bins;

    /// Mutable access to the configured axes.
    fn bins_mut(&mut self) -> &mut Bins;

    /// Replace all axes with `n_features` copies of `strategy`
    /// ([`ModuloBins::default`] when `None`).
    fn fit_uniform_coarse_grain(
        &mut self,
        n_features: usize,
        strategy: Option<Arc<dyn BinStrategy>>,
    ) {
        let strategy = strategy.unwrap_or_else(|| Arc::new(ModuloBins::default()));
        self.bins_mut().set_uniform(n_features, strategy);
    }

    /// The distinct bin centers occupied by `data`.
    ///
    /// Rows come back sorted by bin id; the row count never exceeds `data.len()`.
    ///
    /// # Errors
    ///
    /// - `AmbiguousBinning` if between 1 and `n_features - 1` axes are configured.
    /// - `DimensionMismatch` for ragged rows or more axes than columns.
    fn coarse_grain(&mut self, data: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        let n_features = check_dims(data)?;
        let configured = self.bins().num_axes();
        if configured == 0 {
            log::info!(
                "no axes defined, using default ModuloBins bins for coarse-graining {n_features} features"
            );
            self.fit_uniform_coarse_grain(n_features, None);
        } else if configured < n_features {
            return Err(Error::AmbiguousBinning {
                configured,
                n_features,
            });
        }

        let ids = self.bins().value_to_id(data)?;
        let unique: Vec<Vec<i64>> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        log::debug!(
            "coarse-grained {} samples into {} occupied bins",
            data.len(),
            unique.len()
        );
        self.bins().id_to_bin_center(&unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_parse() {
        assert_eq!("coarse".parse::<ModelKind>().unwrap(), ModelKind::Coarse);
        assert_eq!("fine".parse::<ModelKind>().unwrap(), ModelKind::Fine);
        assert_eq!("default".parse::<ModelKind>().unwrap(), ModelKind::Default);
        assert!(matches!(
            "fancy".parse::<ModelKind>(),
            Err(Error::InvalidModelSelection { .. })
        ));
        assert_eq!(ModelKind::Fine.to_string(), "fine");
    }

    #[test]
    fn test_scores_bundle() {
        let scores = Scores::compute(&[0, 0, 1, 1], &[0, 0, 0, 1]).unwrap();
        assert_eq!(scores.rand_score, 0.5);
        assert_eq!(scores.n_misclassified, 2.0);
        assert!(scores.homogeneity_score > 0.0 && scores.homogeneity_score < 1.0);
        assert!(Scores::compute(&[0, 1], &[0]).is_err());
    }
}
