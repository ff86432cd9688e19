//! Named configuration parameters with documented defaults.
//!
//! Nothing here is read from disk: the demo page treats these as fixed
//! constants, but exposing them lets the front-end and tests override them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Musical constants used by the pattern library.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Tempo of the rhythm demos (beats per minute)
    pub bpm: f64,
    /// Reference pitch of the melody demos (A4)
    pub melody_reference_hz: f64,
    /// Root of the harmony demos (C4)
    pub harmony_reference_hz: f64,
    /// Pitch of the timbre demo (G4)
    pub timbre_reference_hz: f64,
    /// Reference pitch of the texture demos (G4)
    pub texture_reference_hz: f64,
}

impl DemoConfig {
    /// Length of one beat in seconds (96 BPM = 0.625 s).
    pub fn beat(&self) -> f64 {
        60.0 / self.bpm
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bpm: 96.0,
            melody_reference_hz: 440.0,
            harmony_reference_hz: 261.63,
            timbre_reference_hz: 392.0,
            texture_reference_hz: 392.0,
        }
    }
}

/// Engine sizing and generator timing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Voice slots in the output mixer
    pub max_voices: usize,
    /// Capacity of the control → audio voice queue
    pub queue_capacity: usize,
    /// Linear attack time of every tone (seconds)
    pub attack_time: f64,
    /// Extra time a tone oscillator keeps running after its release reaches the floor
    pub tone_tail: f64,
    /// Extra time a noise burst keeps its voice after `duration_seconds`
    pub noise_tail: f64,
    /// Fixed seed for the noise generator (None = seeded from entropy)
    pub noise_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_voices: 64,
            queue_capacity: 256,
            attack_time: 0.01,
            tone_tail: 0.02,
            noise_tail: 0.025,
            noise_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_beat_is_96_bpm() {
        assert!((DemoConfig::default().beat() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn beat_follows_bpm() {
        let config = DemoConfig {
            bpm: 120.0,
            ..Default::default()
        };
        assert!((config.beat() - 0.5).abs() < 1e-12);
    }
}
