//! Benchmark for rendering one decaying noise burst.

use std::hint::black_box;

use criterion::Criterion;
use musica_dsp::dsp::noise::{fill_burst, DEFAULT_DECAY_SHAPE, NOISE_BUFFER_LEN};
use rand::{rngs::StdRng, SeedableRng};

pub fn bench_noise(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut buffer = [0.0f32; NOISE_BUFFER_LEN];

    c.bench_function("dsp/noise/burst", |b| {
        b.iter(|| {
            fill_burst(
                &mut rng,
                black_box(&mut buffer),
                black_box(0.3),
                DEFAULT_DECAY_SHAPE,
            )
        })
    });
}
