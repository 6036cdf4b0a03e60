//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN is a density-based clustering algorithm that groups points based on
//! neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors.
//! - **MinPts**: Minimum neighbors within ε for a point to be "core".
//! - **Core point**: Has at least MinPts neighbors within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Prediction on new points
//!
//! A fitted [`DbscanFit`] keeps the core points. A new point takes the label of
//! the nearest core point within ε; anything else lands in the noise cluster.
//! Used on coarse-grained data this means the bin centers define the density
//! structure and raw points are attached to it afterwards.
//!
//! ## Labels
//!
//! Labels form a partition: clusters are `0..n_clusters` and noise points are
//! placed in one extra cluster with id `n_clusters`.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use super::traits::{Clustering, Estimator, Predict};
use super::util::{check_dims, squared_euclidean};
use crate::error::{Error, Result};

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    epsilon: f32,
    /// Minimum points for core point classification.
    min_pts: usize,
}

// Internal label encoding.
// - UNCLASSIFIED: never assigned yet
// - NOISE_LABEL: visited, but not density-reachable from any core point (may be promoted later)
const UNCLASSIFIED: i32 = -2;
const NOISE_LABEL: i32 = -1;

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum number of points to form a dense region.
    ///
    /// When clustering bin centers, `epsilon` should be at least the bin width
    /// so adjacent occupied bins connect.
    pub fn new(epsilon: f32, min_pts: usize) -> Self {
        Self { epsilon, min_pts }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Find all neighbors within epsilon.
    fn region_query(&self, data: &[Vec<f32>], point_idx: usize) -> Vec<usize> {
        let point = &data[point_idx];
        let eps_sq = self.epsilon * self.epsilon;
        data.iter()
            .enumerate()
            .filter(|(idx, other)| *idx != point_idx && squared_euclidean(point, other) <= eps_sq)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Expand cluster from a core point.
    #[allow(clippy::too_many_arguments)]
    fn expand_cluster(
        &self,
        data: &[Vec<f32>],
        point_idx: usize,
        neighbors: &[usize],
        labels: &mut [i32],
        cluster_id: i32,
        visited: &mut [bool],
        is_core: &mut [bool],
    ) {
        labels[point_idx] = cluster_id;

        // Use a queue for iterative expansion (avoid deep recursion)
        let mut to_process: Vec<usize> = neighbors.to_vec();

        while let Some(neighbor_idx) = to_process.pop() {
            // A point previously labeled NOISE can later become a border point,
            // so labels are assigned before checking `visited`.
            if labels[neighbor_idx] == UNCLASSIFIED || labels[neighbor_idx] == NOISE_LABEL {
                labels[neighbor_idx] = cluster_id;
            }

            if visited[neighbor_idx] {
                continue;
            }
            visited[neighbor_idx] = true;

            let neighbor_neighbors = self.region_query(data, neighbor_idx);

            // MinPts includes the point itself
            if neighbor_neighbors.len() + 1 >= self.min_pts {
                is_core[neighbor_idx] = true;
                for nn in neighbor_neighbors {
                    if !visited[nn] {
                        to_process.push(nn);
                    }
                }
            }
        }
    }

    fn validate(&self, data: &[Vec<f32>]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        if self.epsilon <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be positive",
            });
        }

        if self.min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }

        check_dims(data)?;
        Ok(())
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}

impl Estimator for Dbscan {
    type Model = DbscanFit;

    fn fit(&self, data: &[Vec<f32>]) -> Result<DbscanFit> {
        self.validate(data)?;
        let n = data.len();

        let mut labels = vec![UNCLASSIFIED; n];
        let mut visited = vec![false; n];
        let mut is_core = vec![false; n];
        let mut cluster_id: i32 = 0;

        for point_idx in 0..n {
            if visited[point_idx] {
                continue;
            }
            visited[point_idx] = true;

            let neighbors = self.region_query(data, point_idx);

            // MinPts includes the point itself, so we need >= min_pts - 1 other neighbors
            if neighbors.len() + 1 < self.min_pts {
                // Not enough neighbors: mark as noise (might be border later)
                labels[point_idx] = NOISE_LABEL;
                continue;
            }

            is_core[point_idx] = true;
            self.expand_cluster(
                data,
                point_idx,
                &neighbors,
                &mut labels,
                cluster_id,
                &mut visited,
                &mut is_core,
            );
            cluster_id += 1;
        }

        let n_clusters = cluster_id as usize;
        let labels: Vec<usize> = labels
            .into_iter()
            .map(|l| if l >= 0 { l as usize } else { n_clusters })
            .collect();

        let mut core_points = Vec::new();
        let mut core_labels = Vec::new();
        for (i, point) in data.iter().enumerate() {
            if is_core[i] {
                core_points.push(point.clone());
                core_labels.push(labels[i]);
            }
        }

        Ok(DbscanFit {
            epsilon: self.epsilon,
            core_points,
            core_labels,
            labels,
            n_clusters,
        })
    }
}

impl Clustering for Dbscan {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    /// DBSCAN discovers clusters dynamically, so this returns 0.
    ///
    /// To get the actual number of clusters, fit and inspect [`DbscanFit::n_clusters`].
    fn n_clusters(&self) -> usize {
        0 // Unknown until fit
    }
}

/// A fitted DBSCAN model.
#[derive(Debug, Clone)]
pub struct DbscanFit {
    epsilon: f32,
    core_points: Vec<Vec<f32>>,
    core_labels: Vec<usize>,
    labels: Vec<usize>,
    n_clusters: usize,
}

impl DbscanFit {
    /// Labels of the training points (noise as [`DbscanFit::noise_label`]).
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of clusters found, excluding noise.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// The label used for noise points.
    pub fn noise_label(&self) -> usize {
        self.n_clusters
    }

    /// Number of core points retained for prediction.
    pub fn n_core_points(&self) -> usize {
        self.core_points.len()
    }
}

impl Predict for DbscanFit {
    fn predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let eps_sq = self.epsilon * self.epsilon;
        let d = self.core_points.first().map(Vec::len);

        data.iter()
            .map(|point| {
                if let Some(d) = d.filter(|&d| d != point.len()) {
                    return Err(Error::DimensionMismatch {
                        expected: d,
                        found: point.len(),
                    });
                }
                let mut best: Option<(usize, f32)> = None;
                for (core, &label) in self.core_points.iter().zip(&self.core_labels) {
                    let dist = squared_euclidean(point, core);
                    if dist <= eps_sq && best.map_or(true, |(_, b)| dist < b) {
                        best = Some((label, dist));
                    }
                }
                Ok(best.map_or(self.noise_label(), |(label, _)| label))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;

    fn two_clusters() -> Vec<Vec<f32>> {
        vec![
            // Cluster 1: around (0, 0)
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![0.1, 0.1],
            vec![0.05, 0.05],
            // Cluster 2: around (5, 5)
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
            vec![5.1, 5.1],
            vec![5.05, 5.05],
        ]
    }

    #[test]
    fn test_dbscan_two_clusters() {
        let data = two_clusters();
        let dbscan = Dbscan::new(0.3, 3);
        let labels = dbscan.fit_predict(&data).unwrap();

        assert_eq!(labels.len(), 10);

        let cluster1 = labels[0];
        for label in &labels[1..5] {
            assert_eq!(*label, cluster1);
        }

        let cluster2 = labels[5];
        for label in &labels[6..10] {
            assert_eq!(*label, cluster2);
        }

        assert_ne!(cluster1, cluster2);
    }

    #[test]
    fn test_dbscan_noise_cluster() {
        let mut data = two_clusters();
        data.push(vec![100.0, 100.0]);

        let fit = Dbscan::new(0.3, 3).fit(&data).unwrap();
        assert_eq!(fit.n_clusters(), 2);
        assert_eq!(fit.labels()[10], fit.noise_label());
        for i in 0..10 {
            assert!(fit.labels()[i] < 2);
        }
    }

    #[test]
    fn test_dbscan_predict_new_points() {
        let data = two_clusters();
        let fit = Dbscan::new(0.3, 3).fit(&data).unwrap();

        let query = vec![vec![0.02, 0.02], vec![5.08, 5.02], vec![2.5, 2.5]];
        let labels = fit.predict(&query).unwrap();
        assert_eq!(labels[0], fit.labels()[0]);
        assert_eq!(labels[1], fit.labels()[5]);
        assert_eq!(labels[2], fit.noise_label());
    }

    #[test]
    fn test_dbscan_all_noise_predicts_noise() {
        let data = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ];

        let fit = Dbscan::new(0.5, 3).fit(&data).unwrap();
        assert_eq!(fit.n_clusters(), 0);
        assert_eq!(fit.n_core_points(), 0);
        assert_eq!(fit.predict(&data).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_dbscan_chain() {
        // Chain of points - DBSCAN should connect them
        let data: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32 * 0.3, 0.0]).collect();

        let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();

        let cluster = labels[0];
        for label in labels {
            assert_eq!(label, cluster);
        }
    }

    #[test]
    fn test_dbscan_invalid_params() {
        let data = vec![vec![0.0, 0.0]];

        assert!(Dbscan::new(0.0, 3).fit(&data).is_err());
        assert!(Dbscan::new(-1.0, 3).fit(&data).is_err());
        assert!(Dbscan::new(0.5, 0).fit(&data).is_err());

        let empty: Vec<Vec<f32>> = vec![];
        assert!(matches!(
            Dbscan::default().fit(&empty),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_dbscan_predict_dimension_mismatch() {
        let fit = Dbscan::new(0.3, 3).fit(&two_clusters()).unwrap();
        assert!(fit.predict(&[vec![0.0]]).is_err());
    }
}
