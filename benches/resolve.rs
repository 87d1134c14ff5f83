//! Benchmarks for symbol-to-row resolution

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sheet_ticker::market::TickerEntry;
use sheet_ticker::resolve::resolve;

fn snapshot(size: usize) -> Vec<TickerEntry> {
    (0..size)
        .map(|i| TickerEntry {
            symbol: format!("SYM{}", i),
            price_usd: format!("{}.5", i),
            market_cap_usd: format!("{}e9", i),
            percent_change_24h: "1.2".to_string(),
        })
        .collect()
}

fn benchmark_resolve_sparse(c: &mut Criterion) {
    // A typical sheet: a few dozen symbols against the full universe
    let snapshot = snapshot(2000);
    let symbols: Vec<String> = (0..40).map(|i| format!("SYM{}", i * 37)).collect();

    c.bench_function("resolve_sparse", |b| {
        b.iter(|| resolve(black_box(&symbols), black_box(&snapshot)))
    });
}

fn benchmark_resolve_all_missing(c: &mut Criterion) {
    let snapshot = snapshot(2000);
    let symbols: Vec<String> = (0..40).map(|i| format!("MISSING{}", i)).collect();

    c.bench_function("resolve_all_missing", |b| {
        b.iter(|| resolve(black_box(&symbols), black_box(&snapshot)))
    });
}

criterion_group!(benches, benchmark_resolve_sparse, benchmark_resolve_all_missing);
criterion_main!(benches);
