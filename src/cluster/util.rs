use crate::error::{Error, Result};

#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Index of the closest center and its squared distance.
///
/// Ties go to the lowest index. `centers` must be non-empty.
pub(crate) fn nearest(point: &[f32], centers: &[Vec<f32>]) -> (usize, f32) {
    let mut best = (0, f32::INFINITY);
    for (i, c) in centers.iter().enumerate() {
        let d = squared_euclidean(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Check that all rows share one dimensionality and return it.
pub(crate) fn check_dims(data: &[Vec<f32>]) -> Result<usize> {
    let d = data.first().map_or(0, Vec::len);
    for point in data.iter().skip(1) {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let centers = vec![vec![1.0], vec![-1.0]];
        assert_eq!(nearest(&[0.0], &centers), (0, 1.0));
        assert_eq!(nearest(&[-0.9], &centers).0, 1);
    }

    #[test]
    fn test_check_dims() {
        assert_eq!(check_dims(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(), 2);
        assert_eq!(check_dims(&[]).unwrap(), 0);
        assert!(check_dims(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }
}
