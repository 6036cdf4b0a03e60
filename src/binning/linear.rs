use super::BinStrategy;
use crate::error::{Error, Result};

/// Bins used by [`LinSpaceBins::with_range`].
pub const DEFAULT_N_BINS: usize = 100;

/// Equal-width bins over `[min, max)` plus one overflow id.
///
/// Shared evaluation for [`LinSpaceBins`] and [`ArrangeBins`]; they only differ in
/// how `step` and `n_bins` are derived.
///
/// - `value <= min` maps to id 0, `value > max` to the overflow id `n_bins`.
///   Everything else maps to `floor((value - min) / step)`, capped at `n_bins - 1`
///   so that `max` itself stays in the last bin.
/// - Ids `>= n_bins` evaluate to the last bin's geometry, ids `< 0` to the first's.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearGrid {
    min: f64,
    max: f64,
    step: f64,
    n_bins: i64,
}

impl LinearGrid {
    fn check_range(min: f64, max: f64) -> Result<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidParameter {
                name: "min/max",
                message: "must be finite",
            });
        }
        if min >= max {
            return Err(Error::InvalidParameter {
                name: "min/max",
                message: "min must be less than max",
            });
        }
        Ok(())
    }

    /// Validate the derived `step` and bin count.
    ///
    /// The count must be representable as an `i64` id and as a `usize`. The step
    /// and `max - min` must be positive and finite.
    fn new(min: f64, max: f64, step: f64, n_bins: u128) -> Result<Self> {
        let n_bins = i64::try_from(n_bins)
            .ok()
            .filter(|&n| n > 0 && usize::try_from(n).is_ok())
            .ok_or(Error::InvalidParameter {
                name: "n_bins",
                message: "must be between 1 and i64::MAX",
            })?;
        if !(step.is_finite() && step > 0.0) || !(max - min).is_finite() {
            return Err(Error::InvalidParameter {
                name: "step",
                message: "range and bin width must be positive and finite",
            });
        }
        Ok(Self {
            min,
            max,
            step,
            n_bins,
        })
    }

    fn value_to_id(&self, value: f32) -> i64 {
        let value = f64::from(value);
        if value <= self.min {
            0
        } else if value > self.max {
            self.n_bins
        } else {
            let id = ((value - self.min) / self.step).floor() as i64;
            id.min(self.n_bins - 1)
        }
    }

    fn id_to_bin_start(&self, id: i64) -> f32 {
        let start = if id >= self.n_bins {
            self.max - self.step
        } else if id < 0 {
            self.min
        } else {
            self.min + id as f64 * self.step
        };
        start as f32
    }

    fn id_to_bin_center(&self, id: i64) -> f32 {
        let center = if id >= self.n_bins {
            self.max - self.step / 2.0
        } else if id < 0 {
            self.min + self.step / 2.0
        } else {
            self.min + id as f64 * self.step + self.step / 2.0
        };
        center as f32
    }
}

/// `n_bins` equal-width bins spanning `[min, max)`.
///
/// Values at or below `min` fall into bin 0. Values above `max` get the overflow
/// id `n_bins`, which evaluates back to the last bin's start and center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinSpaceBins {
    grid: LinearGrid,
}

impl LinSpaceBins {
    /// Create `n_bins` bins between `min` and `max`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_bins` is zero or exceeds `i64::MAX`, a bound is not
    /// finite, or `min >= max`.
    pub fn new(min: f64, max: f64, n_bins: usize) -> Result<Self> {
        LinearGrid::check_range(min, max)?;
        let step = (max - min) / n_bins as f64;
        Ok(Self {
            grid: LinearGrid::new(min, max, step, n_bins as u128)?,
        })
    }

    /// Create [`DEFAULT_N_BINS`] bins between `min` and `max`.
    pub fn with_range(min: f64, max: f64) -> Result<Self> {
        Self::new(min, max, DEFAULT_N_BINS)
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> f64 {
        self.grid.min
    }

    /// Exclusive upper bound.
    pub fn max(&self) -> f64 {
        self.grid.max
    }

    /// Bin width.
    pub fn step(&self) -> f64 {
        self.grid.step
    }

    /// Number of regular bins; also the overflow id.
    pub fn n_bins(&self) -> usize {
        // Checked against usize at construction.
        self.grid.n_bins as usize
    }
}

impl BinStrategy for LinSpaceBins {
    fn value_to_id(&self, value: f32) -> i64 {
        self.grid.value_to_id(value)
    }

    fn id_to_bin_start(&self, id: i64) -> f32 {
        self.grid.id_to_bin_start(id)
    }

    fn id_to_bin_center(&self, id: i64) -> f32 {
        self.grid.id_to_bin_center(id)
    }
}

/// Bins of width `step` starting at `min`, for every start strictly below `max`.
///
/// The bin starts are the half-open range `min, min + step, ...` below `max`,
/// and `n_bins` is its length. Evaluation is the same as [`LinSpaceBins`] with
/// that `step` and `n_bins`; when `step` does not divide the range the last bin
/// is narrower than the others, yet overflow ids still evaluate to `max - step`.
///
/// The length is `ceil((max - min) / step)`. For steps that are not exactly
/// representable this can come out one larger than the equivalent
/// [`LinSpaceBins`] count: `1.0..1.3` by `0.1` yields 4 bins, not 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrangeBins {
    grid: LinearGrid,
}

impl ArrangeBins {
    /// Create bins of width `step` over `[min, max)`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `step` is not positive and finite, a bound is not
    /// finite, `min >= max`, or the step is so small that the bin count exceeds
    /// `i64::MAX`.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        LinearGrid::check_range(min, max)?;
        // Saturating cast: an overflowing count is rejected by `LinearGrid::new`.
        let n_bins = ((max - min) / step).ceil() as u128;
        Ok(Self {
            grid: LinearGrid::new(min, max, step, n_bins)?,
        })
    }

    /// The start of every regular bin, `min, min + step, ...`, computed on demand.
    pub fn grid(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.grid.n_bins).map(move |i| self.grid.min + i as f64 * self.grid.step)
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> f64 {
        self.grid.min
    }

    /// Exclusive upper bound.
    pub fn max(&self) -> f64 {
        self.grid.max
    }

    /// Bin width.
    pub fn step(&self) -> f64 {
        self.grid.step
    }

    /// Number of regular bins; also the overflow id.
    pub fn n_bins(&self) -> usize {
        // Checked against usize at construction.
        self.grid.n_bins as usize
    }
}

impl BinStrategy for ArrangeBins {
    fn value_to_id(&self, value: f32) -> i64 {
        self.grid.value_to_id(value)
    }

    fn id_to_bin_start(&self, id: i64) -> f32 {
        self.grid.id_to_bin_start(id)
    }

    fn id_to_bin_center(&self, id: i64) -> f32 {
        self.grid.id_to_bin_center(id)
    }
}
