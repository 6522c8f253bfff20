use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lunaquake_oracle::MeeusOracle;
use lunaquake_search::{ForecastConfig, estimate_perigee, find_syzygies, forecast};
use lunaquake_time::Instant;

fn start() -> Instant {
    Instant::from_ymd_hms(2024, 1, 1, 0, 0, 0).expect("valid date")
}

fn syzygy_bench(c: &mut Criterion) {
    let oracle = MeeusOracle::new();
    let t0 = start();

    let mut group = c.benchmark_group("search_syzygy");
    group.sample_size(20);
    group.bench_function("find_full_moons_60d", |b| {
        b.iter(|| {
            find_syzygies(black_box(&oracle), black_box(t0), 60.0, 0.5, 2)
                .expect("search should succeed")
        })
    });
    group.finish();
}

fn perigee_bench(c: &mut Criterion) {
    let oracle = MeeusOracle::new();
    let t0 = start();

    let mut group = c.benchmark_group("search_perigee");
    group.bench_function("estimate_perigee", |b| {
        b.iter(|| estimate_perigee(black_box(&oracle), black_box(t0)).expect("scan should succeed"))
    });
    group.finish();
}

fn forecast_bench(c: &mut Criterion) {
    let oracle = MeeusOracle::new();
    let t0 = start();
    let config = ForecastConfig::default();

    let mut group = c.benchmark_group("search_forecast");
    group.sample_size(10);
    group.bench_function("forecast_default", |b| {
        b.iter(|| {
            forecast(black_box(&oracle), black_box(t0), black_box(&config))
                .expect("forecast should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, syzygy_bench, perigee_bench, forecast_bench);
criterion_main!(benches);
