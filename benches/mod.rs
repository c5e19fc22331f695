//! Benchmarks for option-delta-hedger library.
//!
//! - **restriction_bench**: Rule matching and universe filtering
//! - **optimizer_bench**: Greedy planning over growing candidate sets


use criterion::{criterion_group, criterion_main};

// RestrictionRegistry benchmarks
criterion_group!(
    restriction_benches,
    restriction_bench::registry_operations,
    restriction_bench::registry_scaling,
);

// AdjustmentOptimizer benchmarks
criterion_group!(
    optimizer_benches,
    optimizer_bench::optimizer_operations,
    optimizer_bench::optimizer_scaling,
);

criterion_main!(restriction_benches, optimizer_benches);
