//! Benchmarks for evaluating the attack/release curve per sample.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musica_dsp::dsp::EnvelopeShaper;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = EnvelopeShaper::new(0.0, 0.01, 0.2, 0.15);
    let sr = SAMPLE_RATE as f64;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack starts at frame 0, release is mostly past the attack
        for (phase, first_frame) in [("attack", 0usize), ("release", 2_400)] {
            group.bench_with_input(BenchmarkId::new(phase, size), &size, |b, _| {
                b.iter(|| {
                    for (i, sample) in buffer.iter_mut().enumerate() {
                        *sample = env.gain_at(black_box((first_frame + i) as f64 / sr));
                    }
                })
            });
        }
    }

    group.finish();
}
