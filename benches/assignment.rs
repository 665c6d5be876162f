use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use itertools::Itertools;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use sjoin::{AssignmentEngine, EngineConfig, LatLon, RegionLocator, Registry};

const LAT: (f64, f64) = (-18., 0.);
const LON: (f64, f64) = (-81., -68.);

/// Cuts the bounding box into an `n` by `n` grid of named square regions.
fn grid(n: usize) -> (Vec<String>, Vec<String>) {
    let dlat = (LAT.1 - LAT.0) / n as f64;
    let dlon = (LON.1 - LON.0) / n as f64;
    (0..n)
        .cartesian_product(0..n)
        .map(|(i, j)| {
            let (lat0, lon0) = (LAT.0 + i as f64 * dlat, LON.0 + j as f64 * dlon);
            let (lat1, lon1) = (lat0 + dlat, lon0 + dlon);
            let wkt = format!(
                "POLYGON(({lon0} {lat0}, {lon1} {lat0}, {lon1} {lat1}, {lon0} {lat1}, {lon0} {lat0}))"
            );
            (format!("region-{i}-{j}"), wkt)
        })
        .unzip()
}

fn query(count: usize) -> Vec<LatLon> {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    (0..count)
        .map(|_| {
            LatLon::new(
                rng.gen_range(LAT.0 - 2.0..LAT.1 + 2.0),
                rng.gen_range(LON.0 - 2.0..LON.1 + 2.0),
            )
        })
        .collect()
}

pub fn build_registry(c: &mut Criterion) {
    for n in [5, 10, 25] {
        let (names, boundaries) = grid(n);

        c.bench_with_input(
            BenchmarkId::new("Build registry", n * n),
            &(names, boundaries),
            |b, (names, boundaries)| {
                b.iter(|| Registry::build(names, boundaries).unwrap());
            },
        );
    }
}

pub fn assign_points(c: &mut Criterion) {
    let points = query(42_000);

    let mut group = c.benchmark_group("Assign points");
    for n in [5, 10, 25] {
        let (names, boundaries) = grid(n);
        let sequential = Registry::build(&names, &boundaries).unwrap();
        let engine =
            AssignmentEngine::from_wkt(&names, &boundaries, EngineConfig::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("Sequential", n * n), &points, |b, q| {
            b.iter(|| sequential.locate_many(q));
        });
        group.bench_with_input(BenchmarkId::new("Engine", n * n), &points, |b, q| {
            b.iter(|| engine.assign(q));
        });
    }
    group.finish();
}

criterion_group!(benches, build_registry, assign_points);
criterion_main!(benches);
