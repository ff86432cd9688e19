#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Periodic Oscillator
===================

A phase accumulator: `phase` walks from 0.0 to 1.0 once per cycle and each
waveform is a function of that phase.

  Sine      sin(2π·phase)         pure tone, fundamental only
  Square    +1 for the first half, -1 for the second
                                  hollow, odd harmonics only
  Sawtooth  2·phase - 1           bright and buzzy, every harmonic

The increment per sample is `frequency / sample_rate`. Phase is kept in f64 so
long tones do not drift in pitch as the accumulator grows.

The shapes are naive (not band-limited). At the pitches the demos use the
aliasing is far below the level of the waveform itself.
*/

/// Waveform of a tone event.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

impl Waveform {
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }
}

/// Fixed-frequency periodic signal source.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    increment: f64,
    phase: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f32) -> Self {
        Self {
            waveform,
            increment: frequency / sample_rate as f64,
            phase: 0.0,
        }
    }

    /// Produce the next sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let phase = self.phase;

        self.phase += self.increment;
        self.phase -= self.phase.floor();

        let value = match self.waveform {
            Waveform::Sine => (phase * std::f64::consts::TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
        };
        value as f32
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}
