use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spread_checker::comparison::{compare, validate, RateComparisonInput, RawComparisonInput};
use spread_checker::data::{filter_centered, filter_window_at, generate_at, nearest};

const NOW: i64 = 1_704_110_400_000;

fn benchmark_compare(c: &mut Criterion) {
    let input = RateComparisonInput::new(1.3550, 1.3540, 500_000.0, 52).with_margin_pips(20);

    c.bench_function("compare", |b| b.iter(|| compare(black_box(&input))));

    let raw = RawComparisonInput::new("1.3550", "1.3540", "500000", "52");
    c.bench_function("validate_and_compare", |b| {
        b.iter(|| {
            let input = validate(black_box(&raw)).unwrap();
            compare(&input)
        })
    });
}

fn benchmark_series(c: &mut Criterion) {
    c.bench_function("generate_90_days", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            generate_at("GBPUSD", black_box(1.3550), 90, NOW, &mut rng)
        })
    });

    let series = generate_at("GBPUSD", 1.3550, 90, NOW, &mut StdRng::seed_from_u64(42)).unwrap();

    c.bench_function("nearest_90_days", |b| {
        b.iter(|| nearest(black_box(&series), black_box(NOW - 45 * 86_400_000)))
    });

    c.bench_function("filter_window_30_days", |b| {
        b.iter(|| filter_window_at(black_box(&series), 30, NOW))
    });

    c.bench_function("filter_centered_5_days", |b| {
        b.iter(|| filter_centered(black_box(&series), NOW - 20 * 86_400_000, 5))
    });
}

criterion_group!(benches, benchmark_compare, benchmark_series);
criterion_main!(benches);
