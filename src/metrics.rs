//! External-label agreement scores for clusterings.
//!
//! All scores compare a predicted labeling against ground truth and are
//! invariant under renaming of either side's labels. They are computed from a
//! contingency table, so only the partition matters, not the label values.

use std::collections::HashMap;

/// Contingency table between two labelings.
struct Contingency {
    n: usize,
    /// `counts[i][j]`: points with the i-th true class and j-th predicted cluster.
    counts: Vec<Vec<usize>>,
    class_sizes: Vec<usize>,
    cluster_sizes: Vec<usize>,
}

impl Contingency {
    fn new(y_true: &[usize], y_pred: &[usize]) -> Self {
        assert_eq!(y_true.len(), y_pred.len(), "Label slices must have same length");

        let classes = dense_ids(y_true);
        let clusters = dense_ids(y_pred);
        let n_classes = classes.values().max().map_or(0, |&m| m + 1);
        let n_clusters = clusters.values().max().map_or(0, |&m| m + 1);

        let mut counts = vec![vec![0usize; n_clusters]; n_classes];
        let mut class_sizes = vec![0usize; n_classes];
        let mut cluster_sizes = vec![0usize; n_clusters];
        for (t, p) in y_true.iter().zip(y_pred) {
            let (i, j) = (classes[t], clusters[p]);
            counts[i][j] += 1;
            class_sizes[i] += 1;
            cluster_sizes[j] += 1;
        }

        Self {
            n: y_true.len(),
            counts,
            class_sizes,
            cluster_sizes,
        }
    }

    fn mutual_information(&self) -> f64 {
        let n = self.n as f64;
        let mut mi = 0.0;
        for (i, row) in self.counts.iter().enumerate() {
            for (j, &nij) in row.iter().enumerate() {
                if nij == 0 {
                    continue;
                }
                let nij = nij as f64;
                let outer = self.class_sizes[i] as f64 * self.cluster_sizes[j] as f64;
                mi += nij / n * (n * nij / outer).ln();
            }
        }
        mi.max(0.0)
    }
}

/// Map arbitrary labels to `0..k` in first-seen order.
fn dense_ids(labels: &[usize]) -> HashMap<usize, usize> {
    let mut ids = HashMap::new();
    for &l in labels {
        let next = ids.len();
        ids.entry(l).or_insert(next);
    }
    ids
}

fn entropy(sizes: &[usize], n: usize) -> f64 {
    let n = n as f64;
    -sizes
        .iter()
        .filter(|&&s| s > 0)
        .map(|&s| {
            let p = s as f64 / n;
            p * p.ln()
        })
        .sum::<f64>()
}

fn pairs(k: usize) -> f64 {
    let k = k as f64;
    k * (k - 1.0) / 2.0
}

/// Rand index: the fraction of point pairs on which both labelings agree
/// (same cluster in both, or different clusters in both).
///
/// Ranges over `[0, 1]`. Fewer than two points, or two identical partitions
/// into singletons, score 1.0.
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Examples
///
/// ```
/// use calico::metrics::rand_score;
///
/// assert_eq!(rand_score(&[0, 0, 1, 1], &[5, 5, 2, 2]), 1.0);
/// assert!((rand_score(&[0, 0, 1, 1], &[0, 1, 0, 1]) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn rand_score(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let table = Contingency::new(y_true, y_pred);
    let total = pairs(table.n);
    if total == 0.0 {
        return 1.0;
    }

    let same_both: f64 = table.counts.iter().flatten().map(|&c| pairs(c)).sum();
    let same_true: f64 = table.class_sizes.iter().map(|&c| pairs(c)).sum();
    let same_pred: f64 = table.cluster_sizes.iter().map(|&c| pairs(c)).sum();

    let agreements = total + 2.0 * same_both - same_true - same_pred;
    agreements / total
}

/// Homogeneity: 1.0 when every predicted cluster contains members of a single class.
///
/// Computed as `I(C; K) / H(C)`; a labeling with a single true class scores 1.0.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn homogeneity_score(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let table = Contingency::new(y_true, y_pred);
    let h_true = entropy(&table.class_sizes, table.n);
    if h_true == 0.0 {
        return 1.0;
    }
    (table.mutual_information() / h_true).min(1.0)
}

/// Completeness: 1.0 when all members of each class land in the same predicted cluster.
///
/// Computed as `I(C; K) / H(K)`; a prediction with a single cluster scores 1.0.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn completeness_score(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let table = Contingency::new(y_true, y_pred);
    let h_pred = entropy(&table.cluster_sizes, table.n);
    if h_pred == 0.0 {
        return 1.0;
    }
    (table.mutual_information() / h_pred).min(1.0)
}
