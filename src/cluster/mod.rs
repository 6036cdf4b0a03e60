//! Clustering models consumed by the coarse-graining wrappers.
//!
//! The wrappers in [`crate::coarse`] never implement clustering themselves; they
//! drive any model that implements the traits in this module:
//!
//! - [`Clustering`]: one-shot `fit_predict`.
//! - [`Estimator`]: `fit` returns a separate fitted model implementing [`Predict`].
//!   The configuration is a snapshot and is never mutated by fitting.
//! - [`CentroidEstimator`]: an estimator whose fitted model exposes [`Centroids`]
//!   and whose restart count ([`NInit`]) and initial centers ([`Init`]) can be set.
//!
//! ## Algorithms (implemented)
//!
//! ### K-means
//!
//! Assign each point to the nearest centroid, then move centroids to the mean
//! of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! K-means is sensitive to where it starts, which is what seeding from
//! coarse-grained centers addresses.
//!
//! ### DBSCAN
//!
//! Density-based clustering that can discover non-convex clusters and identify
//! outliers (noise points). DBSCAN does not require specifying the number of
//! clusters in advance.
//!
//! ## Usage
//!
//! ```rust
//! use calico::cluster::{Centroids, Clustering, Dbscan, Estimator, Kmeans, Predict};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let fit = Kmeans::new(2).with_seed(42).fit(&data).unwrap();
//! assert_eq!(fit.centroids().len(), 2);
//! assert_eq!(fit.predict(&[vec![9.9, 9.9]]).unwrap()[0], labels[2]);
//!
//! let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
//! assert_eq!(labels.len(), data.len());
//! ```

mod dbscan;
mod kmeans;
mod traits;
pub(crate) mod util;

pub use dbscan::{Dbscan, DbscanFit};
pub use kmeans::{Kmeans, KmeansFit};
pub use traits::{CentroidEstimator, Centroids, Clustering, Estimator, Init, NInit, Predict};
