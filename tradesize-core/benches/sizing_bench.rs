//! Criterion benchmarks for the per-render hot path.
//!
//! The front-ends recompute both cards on every frame, so these measure:
//! 1. A single direction through the sizing engine
//! 2. Both cards through a full session (registry lookup included)

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tradesize_core::domain::{CandleData, Instrument, TradeDirection};
use tradesize_core::session::CalculatorSession;
use tradesize_core::sizing::{compute_both, compute_required_lots};

fn bench_sizing(c: &mut Criterion) {
    let candle = CandleData::default();
    let inst = Instrument::new("eth", "ETH Futures", 0.01);

    c.bench_function("compute_required_lots/long", |b| {
        b.iter(|| compute_required_lots(TradeDirection::Long, black_box(&candle), black_box(&inst), black_box(1.0)))
    });

    c.bench_function("compute_both", |b| {
        b.iter(|| compute_both(black_box(&candle), black_box(&inst), black_box(250.0)))
    });
}

fn bench_session(c: &mut Criterion) {
    let session = CalculatorSession::default();
    c.bench_function("session/results", |b| b.iter(|| black_box(&session).results()));
}

criterion_group!(benches, bench_sizing, bench_session);
criterion_main!(benches);
