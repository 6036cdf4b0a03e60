use calico::binning::{Bins, LinSpaceBins};
use calico::cluster::{Clustering, Kmeans};
use calico::coarse::{CoarseGrain, KmCalico};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

fn blobs(n: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let centers = [[10.0f32, 10.0], [60.0, 20.0], [35.0, 80.0], [85.0, 70.0]];
    (0..n)
        .map(|i| {
            let c = centers[i % centers.len()];
            vec![
                c[0] + rng.random::<f32>() * 8.0 - 4.0,
                c[1] + rng.random::<f32>() * 8.0 - 4.0,
            ]
        })
        .collect()
}

fn grid() -> Bins {
    Bins::new()
        .with_axis(LinSpaceBins::new(0.0, 100.0, 50).unwrap())
        .with_axis(LinSpaceBins::new(0.0, 100.0, 50).unwrap())
}

fn bench_coarse(c: &mut Criterion) {
    let mut group = c.benchmark_group("coarse");

    let mut rng = StdRng::seed_from_u64(42);
    let data = blobs(5000, &mut rng);

    group.bench_function("coarse_grain_n5000_d2", |b| {
        let mut calico = KmCalico::new(Kmeans::new(4)).with_bins(grid());
        b.iter(|| calico.coarse_grain(black_box(&data)).unwrap())
    });

    group.bench_function("calico_fit_n5000_k4", |b| {
        b.iter(|| {
            let mut calico =
                KmCalico::new(Kmeans::new(4).with_max_iter(20).with_seed(42)).with_bins(grid());
            calico.fit(black_box(&data)).unwrap();
        })
    });

    group.bench_function("kmeans_fit_predict_n5000_k4", |b| {
        b.iter(|| {
            let model = Kmeans::new(4).with_max_iter(20).with_seed(42);
            model.fit_predict(black_box(&data)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_coarse);
criterion_main!(benches);
