//! Benchmarks for mixing demo batches block by block.
//!
//! Each iteration dispatches a demo on a fresh offline engine and renders
//! until it has finished, so the cost includes scheduling and voice release.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musica_dsp::{engine::Scheduler, DemoConfig, EngineConfig, OfflineDriver};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const DEMOS: &[(&str, &str)] = &[
    ("rhythm", "simple"),
    ("melody", "asc"),
    ("harmony", "cadencia"),
    ("texture", "homo"),
];

pub fn bench_demos(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/demos");
    group.sample_size(20);

    for &(category, variant) in DEMOS {
        for &size in BLOCK_SIZES {
            let id = BenchmarkId::new(format!("{category}/{variant}"), size);
            group.bench_with_input(id, &size, |b, &size| {
                b.iter(|| {
                    let config = EngineConfig {
                        noise_seed: Some(3),
                        ..Default::default()
                    };
                    let mut scheduler = Scheduler::new(
                        OfflineDriver::new(SAMPLE_RATE),
                        config,
                        DemoConfig::default(),
                    );
                    let Ok(report) = scheduler.dispatch_demo(category, variant) else {
                        return;
                    };

                    let total = ((report.span + 0.05) * SAMPLE_RATE as f64) as usize;
                    let driver = scheduler.engine_mut().driver_mut();
                    let mut rendered = 0;
                    while rendered < total {
                        black_box(driver.render(size));
                        rendered += size;
                    }
                })
            });
        }
    }

    group.finish();
}
