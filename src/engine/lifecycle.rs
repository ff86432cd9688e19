//! Clock and output lifecycle.
//!
//! The engine starts inactive. The first `activate()` creates the shared
//! clock, the voice queue and the mixer, and hands the mixer to the platform
//! driver. From then on the clock lives as long as the engine; further
//! activations are no-ops.

use std::sync::Arc;

use rtrb::{Producer, RingBuffer};
use tracing::{info, warn};

use crate::{
    config::EngineConfig,
    engine::{
        clock::SampleClock,
        mixer::{Mixer, MixerStats},
    },
    error::EngineError,
    synth::voice::Voice,
};

/// Platform side of audio output.
pub trait OutputDriver {
    /// Sample rate the output runs at.
    fn sample_rate(&self) -> f32;

    /// Take ownership of the mixer and start pulling audio from it.
    ///
    /// Platforms that refuse to start (no device, no user gesture) return
    /// `EngineError::ClockActivationFailed`.
    fn start(&mut self, mixer: Mixer) -> Result<(), EngineError>;
}

/// Handles that exist only while the output is running.
pub struct ActiveOutput {
    clock: SampleClock,
    voices: Producer<Voice>,
    stats: Arc<MixerStats>,
}

impl ActiveOutput {
    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    /// Control-thread end of the voice queue
    pub fn voices(&mut self) -> &mut Producer<Voice> {
        &mut self.voices
    }

    pub fn stats(&self) -> &MixerStats {
        &self.stats
    }
}

/// Owns the output driver and, once active, the shared clock.
pub struct AudioEngine<D: OutputDriver> {
    driver: D,
    config: EngineConfig,
    output: Option<ActiveOutput>,
}

impl<D: OutputDriver> AudioEngine<D> {
    pub fn new(driver: D, config: EngineConfig) -> Self {
        Self {
            driver,
            config,
            output: None,
        }
    }

    /// Start output if it is not running yet. Idempotent.
    pub fn activate(&mut self) -> Result<&mut ActiveOutput, EngineError> {
        let output = match self.output.take() {
            Some(output) => output,
            None => self.start_output()?,
        };
        Ok(self.output.insert(output))
    }

    fn start_output(&mut self) -> Result<ActiveOutput, EngineError> {
        let sample_rate = self.driver.sample_rate();
        if !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return Err(EngineError::ClockActivationFailed {
                reason: format!("invalid output sample rate {}", sample_rate),
            });
        }

        let clock = SampleClock::new(sample_rate);
        let (tx, rx) = RingBuffer::<Voice>::new(self.config.queue_capacity.max(1));
        let stats = Arc::new(MixerStats::default());
        let mixer = Mixer::new(clock.clone(), rx, self.config.max_voices, stats.clone());

        if let Err(err) = self.driver.start(mixer) {
            warn!(error = %err, "audio output refused to start");
            return Err(match err {
                EngineError::ClockActivationFailed { .. } => err,
                other => EngineError::ClockActivationFailed {
                    reason: other.to_string(),
                },
            });
        }

        info!(
            sample_rate,
            max_voices = self.config.max_voices,
            started_at = clock.now(),
            "audio clock active"
        );

        Ok(ActiveOutput {
            clock,
            voices: tx,
            stats,
        })
    }

    pub fn is_active(&self) -> bool {
        self.output.is_some()
    }

    /// The shared clock, once active.
    pub fn clock(&self) -> Option<&SampleClock> {
        self.output.as_ref().map(ActiveOutput::clock)
    }

    /// Current clock time, once active.
    pub fn now(&self) -> Option<f64> {
        self.clock().map(SampleClock::now)
    }

    pub fn stats(&self) -> Option<&MixerStats> {
        self.output.as_ref().map(ActiveOutput::stats)
    }

    pub fn sample_rate(&self) -> f32 {
        self.driver.sample_rate()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

/// In-process driver: keeps the mixer and renders only when asked.
///
/// Used for tests, benches and offline rendering. It can refuse to start
/// (modelling a platform that denies audio without a user gesture) and can
/// pre-roll frames on start so activation does not happen at time zero.
pub struct OfflineDriver {
    sample_rate: f32,
    mixer: Option<Mixer>,
    refusal: Option<String>,
    preroll_frames: usize,
}

impl OfflineDriver {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            mixer: None,
            refusal: None,
            preroll_frames: 0,
        }
    }

    /// A driver whose `start` fails with `reason` until `allow` is called.
    pub fn refusing(sample_rate: f32, reason: impl Into<String>) -> Self {
        Self {
            refusal: Some(reason.into()),
            ..Self::new(sample_rate)
        }
    }

    /// Render `frames` of output as part of starting.
    pub fn with_preroll(mut self, frames: usize) -> Self {
        self.preroll_frames = frames;
        self
    }

    /// Stop refusing to start.
    pub fn allow(&mut self) {
        self.refusal = None;
    }

    /// Render `frames` of output in blocks; empty if not started.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let Some(mixer) = self.mixer.as_mut() else {
            return Vec::new();
        };

        let mut out = vec![0.0f32; frames];
        for block in out.chunks_mut(crate::MAX_BLOCK_SIZE) {
            mixer.render_block(block);
        }
        out
    }
}

impl OutputDriver for OfflineDriver {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn start(&mut self, mixer: Mixer) -> Result<(), EngineError> {
        if let Some(reason) = &self.refusal {
            return Err(EngineError::ClockActivationFailed {
                reason: reason.clone(),
            });
        }

        self.mixer = Some(mixer);
        let preroll = self.preroll_frames;
        self.render(preroll);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        let engine = AudioEngine::new(OfflineDriver::new(48_000.0), EngineConfig::default());
        assert!(!engine.is_active());
        assert!(engine.clock().is_none());
        assert!(engine.now().is_none());
    }

    #[test]
    fn activation_is_idempotent() {
        let mut engine = AudioEngine::new(OfflineDriver::new(48_000.0), EngineConfig::default());

        let first = engine.activate().unwrap().clock().clone();
        let second = engine.activate().unwrap().clock().clone();

        assert!(engine.is_active());
        assert!(first.same_as(&second));
    }

    #[test]
    fn refused_activation_leaves_engine_inactive() {
        let driver = OfflineDriver::refusing(48_000.0, "needs a user gesture");
        let mut engine = AudioEngine::new(driver, EngineConfig::default());

        let err = engine.activate().err().unwrap();
        assert_eq!(
            err,
            EngineError::ClockActivationFailed {
                reason: "needs a user gesture".into()
            }
        );
        assert!(!engine.is_active());

        engine.driver_mut().allow();
        assert!(engine.activate().is_ok());
        assert!(engine.is_active());
    }

    #[test]
    fn zero_sample_rate_cannot_activate() {
        let mut engine = AudioEngine::new(OfflineDriver::new(0.0), EngineConfig::default());
        assert!(matches!(
            engine.activate(),
            Err(EngineError::ClockActivationFailed { .. })
        ));
    }

    #[test]
    fn preroll_moves_clock_before_activation_returns() {
        let driver = OfflineDriver::new(1_000.0).with_preroll(250);
        let mut engine = AudioEngine::new(driver, EngineConfig::default());

        engine.activate().unwrap();
        assert!((engine.now().unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn offline_render_advances_shared_clock() {
        let mut engine = AudioEngine::new(OfflineDriver::new(1_000.0), EngineConfig::default());
        engine.activate().unwrap();

        let out = engine.driver_mut().render(5_000);
        assert_eq!(out.len(), 5_000);
        assert_eq!(engine.clock().unwrap().frames(), 5_000);
    }
}
