//! K-means: Lloyd iterations with k-means++ seeding.
//!
//! # The Algorithm
//!
//! 1. Place `k` initial centers (k-means++, random points, or caller-provided).
//! 2. Assign every point to its nearest center.
//! 3. Move every center to the mean of its assigned points.
//! 4. Repeat 2-3 until no center moves more than `tol`, or `max_iter` is reached.
//!
//! With several restarts (`n_init`), the run with the lowest inertia
//! (within-cluster sum of squares) wins.
//!
//! ## Explicit seeding
//!
//! `Init::Centroids` skips the random placement entirely. This is what the
//! Calico procedure relies on: centers found on coarse-grained data become the
//! starting point of a single full-resolution run.
//!
//! ## References
//!
//! Arthur & Vassilvitskii (2007). "k-means++: The Advantages of Careful Seeding." SODA.

use super::traits::{CentroidEstimator, Centroids, Clustering, Estimator, Init, NInit, Predict};
use super::util::{check_dims, nearest, squared_euclidean};
use crate::error::{Error, Result};
use rand::prelude::*;

/// Restarts used by [`NInit::Auto`] with random initialization.
const AUTO_RANDOM_RESTARTS: usize = 10;

/// K-means configuration.
///
/// This is an immutable snapshot of hyperparameters; [`Estimator::fit`] returns a
/// separate [`KmeansFit`].
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    tol: f32,
    seed: Option<u64>,
    n_init: NInit,
    init: Init,
}

impl Kmeans {
    /// Create a k-means configuration for `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            seed: None,
            n_init: NInit::Auto,
            init: Init::KmeansPlusPlus,
        }
    }

    /// Set the maximum number of Lloyd iterations per run.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance (maximum center shift).
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Set the RNG seed for reproducible initialization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of runs this configuration will perform.
    fn restarts(&self) -> Result<usize> {
        match (&self.n_init, &self.init) {
            (NInit::Fixed(0), _) => Err(Error::InvalidParameter {
                name: "n_init",
                message: "must be at least 1",
            }),
            (NInit::Fixed(n), Init::Centroids(_)) => {
                if *n > 1 {
                    log::warn!("explicit initial centroids given; running 1 restart instead of {n}");
                }
                Ok(1)
            }
            (NInit::Fixed(n), _) => Ok(*n),
            (NInit::Auto, Init::Random) => Ok(AUTO_RANDOM_RESTARTS),
            (NInit::Auto, _) => Ok(1),
        }
    }

    fn validate(&self, data: &[Vec<f32>]) -> Result<usize> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.k > data.len() {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: data.len(),
            });
        }
        let d = check_dims(data)?;

        if let Init::Centroids(centers) = &self.init {
            if centers.len() != self.k {
                return Err(Error::InvalidParameter {
                    name: "init",
                    message: "number of initial centroids must equal k",
                });
            }
            for c in centers {
                if c.len() != d {
                    return Err(Error::DimensionMismatch {
                        expected: d,
                        found: c.len(),
                    });
                }
            }
        }
        Ok(d)
    }

    fn initial_centers(&self, data: &[Vec<f32>], rng: &mut StdRng) -> Vec<Vec<f32>> {
        match &self.init {
            Init::Centroids(centers) => centers.clone(),
            Init::Random => rand::seq::index::sample(rng, data.len(), self.k)
                .iter()
                .map(|i| data[i].clone())
                .collect(),
            Init::KmeansPlusPlus => kmeans_plus_plus(data, self.k, rng),
        }
    }

    /// One Lloyd run from the given starting centers.
    fn lloyd(&self, data: &[Vec<f32>], mut centers: Vec<Vec<f32>>) -> KmeansFit {
        let d = centers[0].len();
        let tol_sq = self.tol * self.tol;
        let mut labels = vec![0usize; data.len()];
        let mut n_iter = 0;

        for _ in 0..self.max_iter {
            n_iter += 1;
            for (label, point) in labels.iter_mut().zip(data) {
                *label = nearest(point, &centers).0;
            }

            let mut sums = vec![vec![0.0f32; d]; self.k];
            let mut counts = vec![0usize; self.k];
            for (point, &label) in data.iter().zip(&labels) {
                counts[label] += 1;
                for (s, x) in sums[label].iter_mut().zip(point) {
                    *s += x;
                }
            }

            let mut max_shift = 0.0f32;
            for (c, (sum, &count)) in sums.into_iter().zip(&counts).enumerate() {
                // Empty clusters keep their previous center.
                if count == 0 {
                    continue;
                }
                let mean: Vec<f32> = sum.into_iter().map(|s| s / count as f32).collect();
                max_shift = max_shift.max(squared_euclidean(&centers[c], &mean));
                centers[c] = mean;
            }

            if max_shift <= tol_sq {
                break;
            }
        }

        let mut inertia = 0.0;
        for (label, point) in labels.iter_mut().zip(data) {
            let (c, dist) = nearest(point, &centers);
            *label = c;
            inertia += dist;
        }

        KmeansFit {
            centroids: centers,
            labels,
            inertia,
            n_iter,
        }
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(8)
    }
}

/// k-means++ seeding: each next center is drawn with probability proportional
/// to its squared distance from the nearest center chosen so far.
fn kmeans_plus_plus(data: &[Vec<f32>], k: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let n = data.len();
    let mut centers: Vec<Vec<f32>> = Vec::with_capacity(k);
    centers.push(data[rng.random_range(0..n)].clone());

    let mut min_dist: Vec<f32> = data
        .iter()
        .map(|p| squared_euclidean(p, &centers[0]))
        .collect();

    while centers.len() < k {
        let total: f32 = min_dist.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.random::<f32>() * total;
            let mut chosen = n - 1;
            for (i, &w) in min_dist.iter().enumerate() {
                if target < w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        } else {
            // All remaining points coincide with a center.
            rng.random_range(0..n)
        };

        let center = data[next].clone();
        for (m, p) in min_dist.iter_mut().zip(data) {
            *m = m.min(squared_euclidean(p, &center));
        }
        centers.push(center);
    }
    centers
}

impl Estimator for Kmeans {
    type Model = KmeansFit;

    fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        self.validate(data)?;
        let restarts = self.restarts()?;

        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut best: Option<KmeansFit> = None;
        for _ in 0..restarts {
            let start = self.initial_centers(data, &mut rng);
            let fit = self.lloyd(data, start);
            match &best {
                Some(b) if b.inertia <= fit.inertia => {}
                _ => best = Some(fit),
            }
        }
        best.ok_or(Error::InvalidParameter {
            name: "n_init",
            message: "must be at least 1",
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

impl CentroidEstimator for Kmeans {
    fn with_n_init(mut self, n_init: NInit) -> Self {
        self.n_init = n_init;
        self
    }

    fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    fn init(&self) -> &Init {
        &self.init
    }

    fn n_init(&self) -> &NInit {
        &self.n_init
    }
}

/// A fitted k-means model.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    centroids: Vec<Vec<f32>>,
    labels: Vec<usize>,
    inertia: f32,
    n_iter: usize,
}

impl KmeansFit {
    /// Labels of the training points.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Within-cluster sum of squared distances on the training points.
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Lloyd iterations run by the winning restart.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }
}

impl Centroids for KmeansFit {
    fn centroids(&self) -> &[Vec<f32>] {
        &self.centroids
    }
}

impl Predict for KmeansFit {
    fn predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let d = self.centroids.first().map_or(0, Vec::len);
        data.iter()
            .map(|point| {
                if point.len() != d {
                    return Err(Error::DimensionMismatch {
                        expected: d,
                        found: point.len(),
                    });
                }
                Ok(nearest(point, &self.centroids).0)
            })
            .collect()
    }
}
