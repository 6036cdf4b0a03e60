//! Coarse-grained clustering and k-means Calico on a 2D dataset with one small cluster.

use calico::binning::{ArrangeBins, Bins, ModuloBins};
use calico::cluster::{Centroids, Dbscan, Kmeans};
use calico::coarse::{CgCluster, CoarseGrain, KmCalico, ModelKind};

fn main() -> calico::Result<()> {
    // Two large clusters and one small one.
    let mut data: Vec<Vec<f32>> = Vec::new();
    let mut y_true: Vec<usize> = Vec::new();
    for (label, (cx, cy, count)) in [(120.0f32, 140.0f32, 200), (840.0, 160.0, 200), (480.0, 860.0, 12)]
        .into_iter()
        .enumerate()
    {
        for i in 0..count {
            let dx = ((i * 37) % 60) as f32;
            let dy = ((i * 53) % 60) as f32;
            data.push(vec![cx + dx, cy + dy]);
            y_true.push(label);
        }
    }

    let bins = Bins::new()
        .with_axis(ArrangeBins::new(0.0, 1000.0, 50.0)?)
        .with_axis(ModuloBins::new(50, 0)?);

    // --- K-means Calico ---
    let mut km = KmCalico::new(Kmeans::new(3).with_seed(42)).with_bins(bins.clone());
    let coarse = km.coarse_grain(&data)?;
    println!("=== coarse-graining ===");
    println!("  {} samples -> {} occupied bins", data.len(), coarse.len());

    km.fit(&data)?;
    println!("\n=== KmCalico ===");
    for kind in [ModelKind::Coarse, ModelKind::Fine, ModelKind::Default] {
        let scores = km.scores(&data, &y_true, kind)?;
        println!(
            "  {:7} rand={:.3} homogeneity={:.3} completeness={:.3} misclassified~{:.1}",
            kind.to_string(),
            scores.rand_score,
            scores.homogeneity_score,
            scores.completeness_score,
            scores.n_misclassified
        );
    }
    if let Some(fine) = km.fine_model() {
        for (i, c) in fine.centroids().iter().enumerate() {
            println!("  fine center {}: ({:6.1}, {:6.1})", i, c[0], c[1]);
        }
    }

    // --- Density clustering on bin centers ---
    let mut cg = CgCluster::new(Dbscan::new(75.0, 2)).with_bins(bins);
    cg.fit(&data)?;
    let scores = cg.scores(&data, &y_true, ModelKind::Coarse)?;
    println!("\n=== CgCluster (DBSCAN eps=75, min_pts=2) ===");
    println!(
        "  rand={:.3} homogeneity={:.3} completeness={:.3}",
        scores.rand_score, scores.homogeneity_score, scores.completeness_score
    );

    Ok(())
}
