use super::{CoarseGrain, ModelKind, Scores};
use crate::binning::{Bins, ModuloBins};
use crate::cluster::{Dbscan, Estimator, Predict};
use crate::error::{Error, Result};

/// Coarse-grained clustering around any [`Estimator`].
///
/// `fit` trains a fresh model on the coarse-grained data. The caller's template
/// is never fit in place; it is only used for [`ModelKind::Default`] predictions,
/// which fit it anew on the raw data.
///
/// Training on bin centers makes small clusters as visible as large ones, at the
/// cost of resolution near decision boundaries.
#[derive(Debug, Clone)]
pub struct CgCluster<M: Estimator> {
    bins: Bins,
    model: M,
    coarse_model: Option<M::Model>,
}

impl<M: Estimator> CgCluster<M> {
    /// Wrap `model` with an empty axis set.
    pub fn new(model: M) -> Self {
        Self {
            bins: Bins::new(),
            model,
            coarse_model: None,
        }
    }

    /// Use `bins` for coarse-graining.
    pub fn with_bins(mut self, bins: Bins) -> Self {
        self.bins = bins;
        self
    }

    /// The caller's template model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The model fit on coarse-grained data, if `fit` has run.
    pub fn coarse_model(&self) -> Option<&M::Model> {
        self.coarse_model.as_ref()
    }

    /// Coarse-grain `data` and fit a fresh model on the result.
    ///
    /// # Errors
    ///
    /// Binning errors (see [`CoarseGrain::coarse_grain`]) and model errors.
    pub fn fit(&mut self, data: &[Vec<f32>]) -> Result<()> {
        let centers = self.coarse_grain(data)?;
        self.coarse_model = Some(self.model.fit(&centers)?);
        Ok(())
    }

    /// Predict labels for `data`.
    ///
    /// - [`ModelKind::Coarse`]: the fitted coarse model.
    /// - [`ModelKind::Default`]: a fresh fit-predict of the template on `data`.
    ///
    /// # Errors
    ///
    /// `InvalidModelSelection` for [`ModelKind::Fine`], `NotFitted` for a coarse
    /// prediction before `fit`, and model errors.
    pub fn predict(&self, data: &[Vec<f32>], kind: ModelKind) -> Result<Vec<usize>> {
        match kind {
            ModelKind::Coarse => self
                .coarse_model
                .as_ref()
                .ok_or(Error::NotFitted { model: "coarse" })?
                .predict(data),
            ModelKind::Default => self.model.fit_predict(data),
            ModelKind::Fine => Err(Error::InvalidModelSelection {
                requested: kind.to_string(),
                allowed: "coarse, default",
            }),
        }
    }

    /// Predict with `kind` and score the labels against `y_true`.
    ///
    /// # Errors
    ///
    /// As [`CgCluster::predict`], plus `DimensionMismatch` if `y_true` and `data`
    /// differ in length.
    pub fn scores(&self, data: &[Vec<f32>], y_true: &[usize], kind: ModelKind) -> Result<Scores> {
        let y_pred = self.predict(data, kind)?;
        Scores::compute(y_true, &y_pred)
    }
}

impl<M: Estimator> CoarseGrain for CgCluster<M> {
    fn bins(&self) -> &Bins {
        &self.bins
    }

    fn bins_mut(&mut self) -> &mut Bins {
        &mut self.bins
    }
}

impl Default for CgCluster<Dbscan> {
    /// DBSCAN with a radius of 1.5 default bin widths, so bin centers that are
    /// orthogonal or diagonal neighbours under the auto-filled [`ModuloBins`] axes
    /// link up.
    fn default() -> Self {
        let width = ModuloBins::default().modulus() as f32;
        Self::new(Dbscan::new(1.5 * width, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{BinStrategy, LinSpaceBins, ModuloBins};
    use crate::cluster::{CentroidEstimator, Clustering, Kmeans, NInit};
    use approx::assert_abs_diff_eq;

    fn three_blobs() -> (Vec<Vec<f32>>, Vec<usize>) {
        let mut data = Vec::new();
        let mut labels = Vec::new();
        for (label, (cx, cy)) in [(120.0, 130.0), (820.0, 150.0), (450.0, 880.0)]
            .into_iter()
            .enumerate()
        {
            for i in 0..12 {
                let dx = (i % 4) as f32 * 9.0;
                let dy = (i / 4) as f32 * 11.0;
                data.push(vec![cx + dx, cy + dy]);
                labels.push(label);
            }
        }
        (data, labels)
    }

    #[test]
    fn test_coarse_grain_dedups_rows() {
        let mut cg = CgCluster::new(Kmeans::new(2))
            .with_bins(Bins::new().with_axis(ModuloBins::default()));
        let data = vec![vec![1253.0], vec![1299.0], vec![254.0], vec![1201.0]];
        let centers = cg.coarse_grain(&data).unwrap();
        assert_eq!(centers, vec![vec![250.0], vec![1250.0]]);
    }

    #[test]
    fn test_coarse_grain_auto_fills_zero_axes() {
        let mut cg = CgCluster::new(Kmeans::new(2));
        let (data, _) = three_blobs();
        let centers = cg.coarse_grain(&data).unwrap();

        assert_eq!(cg.bins().num_axes(), 2);
        for axis in 0..2 {
            let s = cg.bins().strategy(axis).unwrap();
            assert_eq!(s.value_to_id(1253.0), 12);
            assert_eq!(s.id_to_bin_center(12), 1250.0);
        }
        assert!(centers.len() <= data.len());
        assert!(centers.contains(&vec![150.0, 150.0]));
    }

    #[test]
    fn test_coarse_grain_rejects_partial_axes() {
        let mut cg = CgCluster::new(Kmeans::new(2))
            .with_bins(Bins::new().with_axis(ModuloBins::default()));
        let data = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        assert!(matches!(
            cg.coarse_grain(&data),
            Err(Error::AmbiguousBinning {
                configured: 1,
                n_features: 3
            })
        ));
        // The failed call must not have touched the axes.
        assert_eq!(cg.bins().num_axes(), 1);
    }

    #[test]
    fn test_coarse_grain_too_many_axes() {
        let bins = Bins::new()
            .with_axis(ModuloBins::default())
            .with_axis(ModuloBins::default());
        let mut cg = CgCluster::new(Kmeans::new(1)).with_bins(bins);
        assert!(matches!(
            cg.coarse_grain(&[vec![1.0]]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_uniform_overrides_existing_axes() {
        let mut cg = CgCluster::new(Kmeans::new(2)).with_bins(
            Bins::new()
                .with_axis(LinSpaceBins::new(0.0, 1.0, 2).unwrap())
                .with_axis(LinSpaceBins::new(0.0, 1.0, 2).unwrap()),
        );
        cg.fit_uniform_coarse_grain(3, None);
        assert_eq!(cg.bins().num_axes(), 3);
        assert_eq!(cg.bins().strategy(0).unwrap().value_to_id(250.0), 2);
    }

    #[test]
    fn test_fit_and_predict_coarse() {
        let (data, y_true) = three_blobs();
        let bins = Bins::new()
            .with_axis(ModuloBins::new(50, 0).unwrap())
            .with_axis(ModuloBins::new(50, 0).unwrap());
        let model = Kmeans::new(3).with_seed(5).with_n_init(NInit::Fixed(10));
        let mut cg = CgCluster::new(model).with_bins(bins);

        assert!(matches!(
            cg.predict(&data, ModelKind::Coarse),
            Err(Error::NotFitted { .. })
        ));

        cg.fit(&data).unwrap();
        assert!(cg.coarse_model().is_some());

        let scores = cg.scores(&data, &y_true, ModelKind::Coarse).unwrap();
        assert_eq!(scores.rand_score, 1.0);
        assert_eq!(scores.n_misclassified, 0.0);
        assert_abs_diff_eq!(scores.homogeneity_score, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scores.completeness_score, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_mode_ignores_coarse_state() {
        let (data, _) = three_blobs();
        let template = Kmeans::new(3).with_seed(9);
        let cg = CgCluster::new(template.clone());
        let labels = cg.predict(&data, ModelKind::Default).unwrap();
        assert_eq!(labels, template.fit_predict(&data).unwrap());
        assert!(cg.coarse_model().is_none());
    }

    #[test]
    fn test_fine_mode_is_rejected() {
        let (data, _) = three_blobs();
        let cg = CgCluster::new(Kmeans::new(3));
        assert!(matches!(
            cg.predict(&data, ModelKind::Fine),
            Err(Error::InvalidModelSelection { .. })
        ));
    }

    #[test]
    fn test_density_model_on_bin_centers() {
        assert_eq!(CgCluster::<Dbscan>::default().model().n_clusters(), 0);

        let (data, y_true) = three_blobs();
        let mut cg = CgCluster::new(Dbscan::new(30.0, 2)).with_bins(
            Bins::new()
                .with_axis(ModuloBins::new(20, 0).unwrap())
                .with_axis(ModuloBins::new(20, 0).unwrap()),
        );
        cg.fit(&data).unwrap();
        let scores = cg.scores(&data, &y_true, ModelKind::Coarse).unwrap();
        assert_eq!(scores.rand_score, 1.0);
    }

    #[test]
    fn test_default_links_adjacent_bins() {
        // Two 6x5 grids with 60 spacing, far apart; each spans several 100-wide bins.
        let mut data = Vec::new();
        let mut y_true = Vec::new();
        for (label, origin) in [(0usize, 0.0f32), (1, 2000.0)] {
            for i in 0..30 {
                data.push(vec![origin + (i % 6) as f32 * 60.0, origin + (i / 6) as f32 * 60.0]);
                y_true.push(label);
            }
        }

        let mut cg = CgCluster::<Dbscan>::default();
        cg.fit(&data).unwrap();
        let fit = cg.coarse_model().unwrap();
        assert_eq!(fit.n_clusters(), 2);

        let labels = cg.predict(&data, ModelKind::Coarse).unwrap();
        assert!(labels.iter().all(|&l| l != fit.noise_label()));
        let scores = cg.scores(&data, &y_true, ModelKind::Coarse).unwrap();
        assert_eq!(scores.rand_score, 1.0);
    }

    #[test]
    fn test_scores_length_mismatch() {
        let (data, _) = three_blobs();
        let cg = CgCluster::new(Kmeans::new(3).with_seed(1));
        assert!(matches!(
            cg.scores(&data, &[0, 1], ModelKind::Default),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
