//! Coarse-graining for clustering.
//!
//! `calico` discretizes continuous data into per-axis bins, deduplicates the
//! occupied bins, and uses their centers either as the clustering input or as
//! the starting point of a full-resolution k-means run.
//!
//! - [`binning`]: bin strategies ([`ModuloBins`], [`LinSpaceBins`], [`ArrangeBins`])
//!   and the per-column axis set [`Bins`].
//! - [`coarse`]: [`CgCluster`] (cluster the coarse data) and [`KmCalico`]
//!   (iterative clustering assisted by coarse-graining).
//! - [`cluster`]: the model traits the wrappers drive, plus k-means and DBSCAN.
//! - [`metrics`]: Rand index, homogeneity and completeness.

#![forbid(unsafe_code)]

pub mod binning;
pub mod cluster;
pub mod coarse;
pub mod error;
pub mod metrics;

pub use binning::{ArrangeBins, BinStrategy, Bins, LinSpaceBins, ModuloBins};
pub use cluster::{
    CentroidEstimator, Centroids, Clustering, Dbscan, DbscanFit, Estimator, Init, Kmeans,
    KmeansFit, NInit, Predict,
};
pub use coarse::{CgCluster, CoarseGrain, KmCalico, ModelKind, Scores};
pub use error::{Error, Result};
