//! Low-level DSP primitives used by the voices.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! so they can live inside voices that are rendered on the audio thread.
//! They stay focused on signal math; timing and lifetime belong to
//! `synth::voice`.

/// Linear-attack, exponential-release gain curve.
pub mod envelope;
/// Decaying white-noise bursts.
pub mod noise;
/// Sine, square and sawtooth oscillators.
pub mod oscillator;

pub use envelope::{EnvelopeShaper, GainPoint, Ramp, ENVELOPE_FLOOR};
pub use oscillator::{Oscillator, Waveform};
