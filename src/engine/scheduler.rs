use tracing::{debug, error, warn};

use crate::{
    config::{DemoConfig, EngineConfig},
    engine::lifecycle::{AudioEngine, OutputDriver},
    error::EngineError,
    sequencing::{
        event::{EventBatch, SoundEvent, SoundKind},
        pattern::{self, Category},
    },
    synth::{noise::NoiseGenerator, tone::ToneGenerator},
};

/// Outcome of one dispatched batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchReport {
    /// Clock time every offset in the batch was resolved against
    pub anchor: f64,
    /// Events handed to a generator
    pub scheduled: usize,
    /// Events dropped because their generator failed
    pub skipped: usize,
    /// Latest nominal end offset in the batch
    pub span: f64,
}

/// Resolves event batches against the shared clock and drives the generators.
///
/// Dispatch is schedule-and-return: every event becomes a voice queued for
/// the audio thread with an absolute start time, and the call returns before
/// any of them sounds.
pub struct Scheduler<D: OutputDriver> {
    engine: AudioEngine<D>,
    demos: DemoConfig,
    tones: ToneGenerator,
    noise: NoiseGenerator,
    dropped_seen: u64,
}

impl<D: OutputDriver> Scheduler<D> {
    pub fn new(driver: D, config: EngineConfig, demos: DemoConfig) -> Self {
        let sample_rate = driver.sample_rate();
        Self {
            tones: ToneGenerator::new(sample_rate, &config),
            noise: NoiseGenerator::new(sample_rate, &config),
            engine: AudioEngine::new(driver, config),
            demos,
            dropped_seen: 0,
        }
    }

    /// Explicit activation, e.g. from an "enable audio" control.
    pub fn activate_clock(&mut self) -> Result<(), EngineError> {
        self.engine.activate().map(|_| ())
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Schedule every event in `batch` relative to the current clock time.
    ///
    /// Activates the clock first if needed; a refused activation abandons the
    /// whole batch. Individual events that fail are logged and skipped
    /// without affecting the rest of the batch.
    pub fn dispatch(&mut self, batch: &EventBatch) -> Result<DispatchReport, EngineError> {
        let output = self.engine.activate()?;

        let dropped = output.stats().dropped_voices();
        if dropped > self.dropped_seen {
            warn!(
                dropped = dropped - self.dropped_seen,
                "mixer dropped voices: all slots were busy"
            );
            self.dropped_seen = dropped;
        }

        let anchor = output.clock().now();
        let mut report = DispatchReport {
            anchor,
            scheduled: 0,
            skipped: 0,
            span: batch.span(),
        };

        for event in batch {
            let start = anchor + event.start_offset();
            let result = match event.kind() {
                SoundKind::Tone {
                    frequency_hz,
                    waveform,
                    peak_gain,
                } => self.tones.play(
                    output.voices(),
                    frequency_hz,
                    waveform,
                    start,
                    event.duration_seconds(),
                    peak_gain,
                ),
                SoundKind::Noise {
                    peak_gain,
                    decay_shape,
                } => self.noise.burst(
                    output.voices(),
                    start,
                    event.duration_seconds(),
                    peak_gain,
                    decay_shape,
                ),
            };

            match result {
                Ok(()) => {
                    report.scheduled += 1;
                    debug!(start, event = ?event.kind(), "scheduled");
                }
                Err(err) => {
                    report.skipped += 1;
                    log_skipped(event, &err);
                }
            }
        }

        Ok(report)
    }

    /// Build the demo batch for `(category, variant)` and dispatch it.
    pub fn dispatch_demo(
        &mut self,
        category: &str,
        variant: &str,
    ) -> Result<DispatchReport, EngineError> {
        let category: Category = category.parse()?;
        let batch = pattern::build(&self.demos, category, variant);
        if batch.is_empty() {
            debug!(%category, variant, "demo variant has no events");
        }
        self.dispatch(&batch)
    }

    pub fn now(&self) -> Option<f64> {
        self.engine.now()
    }

    pub fn engine(&self) -> &AudioEngine<D> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AudioEngine<D> {
        &mut self.engine
    }

    pub fn demo_config(&self) -> &DemoConfig {
        &self.demos
    }
}

fn log_skipped(event: &SoundEvent, err: &EngineError) {
    match err {
        EngineError::InvalidParameter { .. } => {
            error!(error = %err, event = ?event, "malformed sound event skipped")
        }
        _ => warn!(error = %err, offset = event.start_offset(), "sound event dropped"),
    }
}
