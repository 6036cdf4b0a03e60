use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    ///
    /// For algorithms that discover the number of clusters dynamically (e.g. DBSCAN),
    /// this returns 0.
    fn n_clusters(&self) -> usize;
}

/// A clustering configuration that can be fit into a reusable model.
///
/// Implementors are configuration snapshots: `fit` never mutates `self`, it builds
/// a fresh fitted value. Fitting the same configuration twice yields two independent
/// models.
pub trait Estimator: Clustering {
    /// The fitted model.
    type Model: Predict;

    /// Fit on `data` and return the fitted model.
    fn fit(&self, data: &[Vec<f32>]) -> Result<Self::Model>;
}

/// A fitted model that assigns labels to new points.
pub trait Predict {
    /// Assign one label per input point.
    fn predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;
}

/// A fitted model with explicit cluster centers.
pub trait Centroids {
    /// One center per cluster, in label order.
    fn centroids(&self) -> &[Vec<f32>];
}

/// How many independent restarts a centroid model runs (best result kept).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NInit {
    /// Pick from the initialization: 1 run for k-means++ or explicit centroids,
    /// 10 runs for random initialization.
    #[default]
    Auto,
    /// Exactly this many runs.
    Fixed(usize),
}

/// Initial center placement for a centroid model.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Init {
    /// k-means++ seeding.
    #[default]
    KmeansPlusPlus,
    /// Distinct data points chosen uniformly at random.
    Random,
    /// Caller-provided centers, one row per cluster.
    Centroids(Vec<Vec<f32>>),
}

/// A centroid model configuration: restart count and initial centers are configurable.
pub trait CentroidEstimator: Estimator<Model: Centroids> + Clone {
    /// Set the restart policy.
    fn with_n_init(self, n_init: NInit) -> Self;

    /// Set the initialization.
    fn with_init(self, init: Init) -> Self;

    /// The configured initialization.
    fn init(&self) -> &Init;

    /// The configured restart policy.
    fn n_init(&self) -> &NInit;
}
