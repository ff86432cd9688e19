pub mod config;
pub mod dsp; // Envelope, oscillator and noise primitives
pub mod engine; // Clock, output mixer and scheduler
pub mod error;
pub mod sequencing; // Sound events and the demo pattern library
pub mod synth; // Tone/noise generators and voices

pub use config::{DemoConfig, EngineConfig};
pub use engine::{DispatchReport, OfflineDriver, OutputDriver, Scheduler};
pub use error::EngineError;
pub use sequencing::{Category, EventBatch, SoundEvent, SoundKind};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f64 = 1.0 / 48_000.0;
