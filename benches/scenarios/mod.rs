//! Scenario benchmarks: whole demos scheduled and mixed.

mod demos;

pub use demos::bench_demos;
