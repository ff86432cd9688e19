//! Noise generator: short decaying bursts used as percussive clicks.

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::EngineConfig,
    dsp::noise::{fill_burst, NOISE_BUFFER_LEN},
    error::EngineError,
    synth::{message::VoiceSender, voice::Voice},
};

/// Renders noise bursts on the control thread and queues them as voices.
///
/// The burst itself is always `NOISE_BUFFER_LEN` samples long. The requested
/// duration only decides how long the voice holds its slot before release.
pub struct NoiseGenerator {
    sample_rate: f32,
    tail: f64,
    rng: StdRng,
}

impl NoiseGenerator {
    pub fn new(sample_rate: f32, config: &EngineConfig) -> Self {
        let rng = match config.noise_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            sample_rate,
            tail: config.noise_tail,
            rng,
        }
    }

    /// Schedule a burst at `start_time` (absolute clock seconds).
    pub fn burst<S: VoiceSender + ?Sized>(
        &mut self,
        out: &mut S,
        start_time: f64,
        duration_seconds: f64,
        peak_gain: f32,
        decay_shape: f32,
    ) -> Result<(), EngineError> {
        let mut buffer = [0.0f32; NOISE_BUFFER_LEN];
        fill_burst(&mut self.rng, &mut buffer, peak_gain, decay_shape);

        let start_time = if start_time.is_finite() {
            start_time.max(0.0)
        } else {
            0.0
        };
        let hold = if duration_seconds.is_finite() {
            duration_seconds.max(0.0)
        } else {
            0.0
        };

        out.send(Voice::noise(
            buffer,
            start_time,
            start_time + hold + self.tail,
            self.sample_rate,
        ))
    }
}
