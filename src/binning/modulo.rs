use super::BinStrategy;
use crate::error::{Error, Result};

/// Bins that behave like the modulo operator: bin `id` covers
/// `[id * modulus + rem, (id + 1) * modulus + rem)`.
///
/// There is no domain restriction: ids can be negative or arbitrarily large.
/// Suited to unbounded or periodic integer-like measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuloBins {
    modulus: i64,
    rem: i64,
}

impl ModuloBins {
    /// Create modulo bins of width `modulus`, shifted by `rem`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `modulus` is not positive.
    pub fn new(modulus: i64, rem: i64) -> Result<Self> {
        if modulus <= 0 {
            return Err(Error::InvalidParameter {
                name: "modulus",
                message: "must be positive",
            });
        }
        Ok(Self { modulus, rem })
    }

    /// Bin width.
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Offset of bin 0.
    pub fn rem(&self) -> i64 {
        self.rem
    }

    fn start(&self, id: i64) -> f64 {
        id as f64 * self.modulus as f64 + self.rem as f64
    }
}

impl Default for ModuloBins {
    /// Width 100, no offset.
    fn default() -> Self {
        Self {
            modulus: 100,
            rem: 0,
        }
    }
}

impl BinStrategy for ModuloBins {
    fn value_to_id(&self, value: f32) -> i64 {
        ((f64::from(value) - self.rem as f64) / self.modulus as f64).floor() as i64
    }

    fn id_to_bin_start(&self, id: i64) -> f32 {
        self.start(id) as f32
    }

    fn id_to_bin_center(&self, id: i64) -> f32 {
        (self.start(id) + self.modulus as f64 / 2.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulo_example_value() {
        let bins = ModuloBins::new(100, 0).unwrap();
        let id = bins.value_to_id(1253.0);
        assert_eq!(id, 12);
        assert_eq!(bins.id_to_bin_start(id), 1200.0);
        assert_eq!(bins.id_to_bin_center(id), 1250.0);
    }

    #[test]
    fn test_modulo_floor_for_negative_values() {
        let bins = ModuloBins::default();
        assert_eq!(bins.value_to_id(-1.0), -1);
        assert_eq!(bins.value_to_id(-100.0), -1);
        assert_eq!(bins.value_to_id(-100.5), -2);
        assert_eq!(bins.id_to_bin_start(-1), -100.0);
        assert_eq!(bins.id_to_bin_center(-1), -50.0);
    }

    #[test]
    fn test_modulo_with_remainder() {
        let bins = ModuloBins::new(25, 5).unwrap();
        assert_eq!(bins.value_to_id(5.0), 0);
        assert_eq!(bins.value_to_id(29.9), 0);
        assert_eq!(bins.value_to_id(30.0), 1);
        assert_eq!(bins.value_to_id(4.0), -1);
        assert_eq!(bins.id_to_bin_start(1), 30.0);
        assert_eq!(bins.id_to_bin_center(1), 42.5);
    }

    #[test]
    fn test_modulo_vectorized() {
        let bins = ModuloBins::default();
        let ids = bins.values_to_ids(&[1253.0, 254.0, 3098.0, 490.0]);
        assert_eq!(ids, vec![12, 2, 30, 4]);
        assert_eq!(
            bins.ids_to_bin_centers(&ids),
            vec![1250.0, 250.0, 3050.0, 450.0]
        );
        assert_eq!(bins.ids_to_bin_starts(&ids), vec![1200.0, 200.0, 3000.0, 400.0]);
    }

    #[test]
    fn test_modulo_rejects_non_positive_modulus() {
        assert!(ModuloBins::new(0, 0).is_err());
        assert!(ModuloBins::new(-5, 0).is_err());
    }
}
