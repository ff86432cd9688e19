//! Benchmarks for the phase-accumulating oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use musica_dsp::dsp::{Oscillator, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in [Waveform::Sine, Waveform::Square, Waveform::Sawtooth] {
            let mut osc = Oscillator::new(waveform, 440.0, SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| osc.render(black_box(&mut buffer)))
            });
        }
    }

    group.finish();
}
