//! Tone generator: one oscillator per call, shaped by its own envelope.

use crate::{
    config::EngineConfig,
    dsp::{EnvelopeShaper, Oscillator, Waveform},
    error::EngineError,
    synth::{message::VoiceSender, voice::Voice},
};

/// Builds enveloped oscillator voices and queues them for playback.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    sample_rate: f32,
    attack_time: f64,
    tail: f64,
}

impl ToneGenerator {
    pub fn new(sample_rate: f32, config: &EngineConfig) -> Self {
        Self {
            sample_rate,
            attack_time: config.attack_time,
            tail: config.tone_tail,
        }
    }

    /// Schedule a tone starting at `start_time` (absolute clock seconds).
    ///
    /// The envelope decays to its floor at `start_time + duration_seconds`;
    /// the oscillator keeps running for the configured tail after that and
    /// is then released.
    pub fn play<S: VoiceSender + ?Sized>(
        &self,
        out: &mut S,
        frequency_hz: f64,
        waveform: Waveform,
        start_time: f64,
        duration_seconds: f64,
        peak_gain: f32,
    ) -> Result<(), EngineError> {
        if !(frequency_hz > 0.0) || !frequency_hz.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "frequency_hz",
                value: frequency_hz,
            });
        }
        if !(duration_seconds > 0.0) || !duration_seconds.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "duration_seconds",
                value: duration_seconds,
            });
        }
        if !(peak_gain > 0.0 && peak_gain <= 1.0) {
            return Err(EngineError::InvalidParameter {
                name: "peak_gain",
                value: peak_gain as f64,
            });
        }
        if !(start_time >= 0.0) || !start_time.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "start_time",
                value: start_time,
            });
        }

        let stop_time = start_time + duration_seconds;
        let envelope = EnvelopeShaper::new(start_time, self.attack_time, peak_gain, stop_time);
        let oscillator = Oscillator::new(waveform, frequency_hz, self.sample_rate);

        out.send(Voice::tone(
            oscillator,
            envelope,
            start_time,
            stop_time + self.tail,
            self.sample_rate,
        ))
    }
}
