use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gridnear::{survey, BoundingBox, NeighborQuery, QueryConfig};

const NUM_POINTS: usize = 2_000;
const RESOLUTIONS: [usize; 5] = [5, 15, 45, 100, 200];

fn benchmark_resolution(c: &mut Criterion) {
    let bounds = BoundingBox::from_size(100.0, 100.0);

    // Accuracy side of the trade-off, printed once per resolution
    for &res in &RESOLUTIONS {
        let report = survey(QueryConfig::new(NUM_POINTS, bounds, res, res), 8, 0).unwrap();
        println!(
            "Grid: {:3}x{:3}, mismatch rate: {:.4}, comparison ratio: {:.4}, unresolved: {:.1}",
            res,
            res,
            report.mismatch_rate(),
            report.comparison_ratio(),
            report.mean_unresolved
        );
    }

    let mut group = c.benchmark_group("resolution");
    group.sample_size(10);

    for &res in &RESOLUTIONS {
        let query = NeighborQuery::new(QueryConfig::new(NUM_POINTS, bounds, res, res)).unwrap();
        group.bench_with_input(BenchmarkId::new("query", res), &query, |b, q| {
            b.iter(|| q.run_seeded(7).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_resolution);
criterion_main!(benches);
