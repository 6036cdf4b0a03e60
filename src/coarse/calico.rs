use super::{CoarseGrain, ModelKind, Scores};
use crate::binning::Bins;
use crate::cluster::{CentroidEstimator, Centroids, Init, Kmeans, NInit, Predict};
use crate::error::{Error, Result};

/// Iterative clustering assisted by coarse-graining (Calico) for centroid models.
///
/// `fit` runs two stages:
///
/// 1. a centroid model with automatic restarts is fit on the coarse-grained data;
/// 2. its centers seed a single-restart model that is fit on the **raw** data.
///
/// Coarse-graining only decides where the fine model starts; the fine model
/// still trains on every original sample.
///
/// The coarse and fine configurations are clones of the caller's template with
/// their restart policy (and, for the fine stage, initial centers) overridden.
/// The template itself is never changed.
#[derive(Debug, Clone)]
pub struct KmCalico<M: CentroidEstimator> {
    bins: Bins,
    model: M,
    coarse_config: M,
    fine_config: M,
    coarse_model: Option<M::Model>,
    fine_model: Option<M::Model>,
}

impl<M: CentroidEstimator> KmCalico<M> {
    /// Wrap the centroid model `model` with an empty axis set.
    pub fn new(model: M) -> Self {
        let coarse_config = model.clone().with_n_init(NInit::Auto);
        let fine_config = model.clone().with_n_init(NInit::Fixed(1));
        Self {
            bins: Bins::new(),
            model,
            coarse_config,
            fine_config,
            coarse_model: None,
            fine_model: None,
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

    /// Configuration used for the coarse stage.
    pub fn coarse_config(&self) -> &M {
        &self.coarse_config
    }

    /// Configuration used for the fine stage.
    ///
    /// After `fit`, its initialization holds the centers of the coarse model.
    pub fn fine_config(&self) -> &M {
        &self.fine_config
    }

    /// The model fit on coarse-grained data, if `fit` has run.
    pub fn coarse_model(&self) -> Option<&M::Model> {
        self.coarse_model.as_ref()
    }

    /// The model fit on raw data from the coarse centers, if `fit` has run.
    pub fn fine_model(&self) -> Option<&M::Model> {
        self.fine_model.as_ref()
    }

    /// Fit the coarse model on coarse-grained `data`, then the fine model on `data`
    /// starting from the coarse centers.
    ///
    /// State is only replaced once both stages succeed.
    ///
    /// # Errors
    ///
    /// Binning errors (see [`CoarseGrain::coarse_grain`]) and model errors, e.g.
    /// fewer occupied bins than clusters.
    pub fn fit(&mut self, data: &[Vec<f32>]) -> Result<()> {
        let centers = self.coarse_grain(data)?;
        let coarse = self.coarse_config.fit(&centers)?;

        let seeds = coarse.centroids().to_vec();
        log::debug!(
            "seeding fine model with {} centers from {} coarse points",
            seeds.len(),
            centers.len()
        );
        let fine_config = self.fine_config.clone().with_init(Init::Centroids(seeds));
        let fine = fine_config.fit(data)?;

        self.fine_config = fine_config;
        self.coarse_model = Some(coarse);
        self.fine_model = Some(fine);
        Ok(())
    }

    /// Predict labels for `data` with the model selected by `kind`.
    ///
    /// [`ModelKind::Default`] fits the template afresh on `data` and ignores
    /// both fitted models.
    ///
    /// # Errors
    ///
    /// `NotFitted` for the coarse or fine model before `fit`, and model errors.
    pub fn predict(&self, data: &[Vec<f32>], kind: ModelKind) -> Result<Vec<usize>> {
        match kind {
            ModelKind::Default => self.model.fit_predict(data),
            _ => self.fitted(kind)?.predict(data),
        }
    }

    /// Like [`KmCalico::predict`], also returning the selected model's centers.
    ///
    /// # Errors
    ///
    /// As [`KmCalico::predict`].
    pub fn predict_with_centers(
        &self,
        data: &[Vec<f32>],
        kind: ModelKind,
    ) -> Result<(Vec<usize>, Vec<Vec<f32>>)> {
        match kind {
            ModelKind::Default => {
                let fit = self.model.fit(data)?;
                Ok((fit.predict(data)?, fit.centroids().to_vec()))
            }
            _ => {
                let fit = self.fitted(kind)?;
                Ok((fit.predict(data)?, fit.centroids().to_vec()))
            }
        }
    }

    /// Predict with `kind` and score the labels against `y_true`.
    ///
    /// # Errors
    ///
    /// As [`KmCalico::predict`], plus `DimensionMismatch` if `y_true` and `data`
    /// differ in length.
    pub fn scores(&self, data: &[Vec<f32>], y_true: &[usize], kind: ModelKind) -> Result<Scores> {
        let y_pred = self.predict(data, kind)?;
        Scores::compute(y_true, &y_pred)
    }

    fn fitted(&self, kind: ModelKind) -> Result<&M::Model> {
        let (model, name) = match kind {
            ModelKind::Coarse => (&self.coarse_model, "coarse"),
            ModelKind::Fine => (&self.fine_model, "fine"),
            ModelKind::Default => {
                return Err(Error::InvalidModelSelection {
                    requested: kind.to_string(),
                    allowed: "coarse, fine",
                })
            }
        };
        model.as_ref().ok_or(Error::NotFitted { model: name })
    }
}

impl<M: CentroidEstimator> CoarseGrain for KmCalico<M> {
    fn bins(&self) -> &Bins {
        &self.bins
    }

    fn bins_mut(&mut self) -> &mut Bins {
        &mut self.bins
    }
}

impl Default for KmCalico<Kmeans> {
    fn default() -> Self {
        Self::new(Kmeans::default())
    }
}
