use thiserror::Error;

/// Errors returned by binning, clustering and the coarse-graining wrappers.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Data shape does not match what the caller configured.
    ///
    /// Raised when a matrix has a different column count than the configured
    /// axes, when rows are ragged, or when label slices differ in length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Some, but not enough, bin strategies are configured for the data.
    #[error(
        "ambiguous bins definition: {configured} axes defined for bins but there are {n_features} total axes"
    )]
    AmbiguousBinning {
        /// Number of configured bin strategies.
        configured: usize,
        /// Number of columns in the data.
        n_features: usize,
    },

    /// A model selector outside the set the wrapper supports.
    #[error("invalid model selection {requested:?}: must be one of {allowed}")]
    InvalidModelSelection {
        /// What the caller asked for.
        requested: String,
        /// The accepted selectors.
        allowed: &'static str,
    },

    /// A fitted model was requested before `fit` was called.
    #[error("{model} model is not fitted; call fit() first")]
    NotFitted {
        /// Which model was requested.
        model: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
