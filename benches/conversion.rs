//! Benchmarks for price conversion and row formatting

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metal_prices::convert::round_currency;
use metal_prices::observation::{MetalQuote, Observation};
use metal_prices::record::record_fields;
use metal_prices::source::{Metal, Rate, SpotPrice};

fn benchmark_metal_quote(c: &mut Criterion) {
    c.bench_function("metal_quote_convert", |b| {
        b.iter(|| MetalQuote::convert(black_box(3743.50), black_box(48.13)))
    });
}

fn benchmark_round_currency(c: &mut Criterion) {
    c.bench_function("round_currency", |b| {
        b.iter(|| round_currency(black_box(5792.749670994981)))
    });
}

fn benchmark_record_fields(c: &mut Criterion) {
    let now = Utc::now();
    let obs = Observation::from_quotes(
        now,
        &SpotPrice {
            metal: Metal::Gold,
            usd_per_ounce: 3743.50,
            fetched_at: now,
        },
        &SpotPrice {
            metal: Metal::Silver,
            usd_per_ounce: 44.99,
            fetched_at: now,
        },
        &Rate {
            value: 48.13,
            fetched_at: now,
        },
    )
    .unwrap();

    c.bench_function("record_fields", |b| {
        b.iter(|| record_fields(black_box(&obs)))
    });
}

criterion_group!(
    benches,
    benchmark_metal_quote,
    benchmark_round_currency,
    benchmark_record_fields
);
criterion_main!(benches);
