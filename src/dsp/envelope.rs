use crate::MIN_TIME;

/*
Envelope Shaper
===============

Every sound event is gain-shaped by a two-segment envelope: a short linear
attack followed by an exponential release.

  Gain
  peak ┐  ╱╲
       │ ╱  ╲
       │╱    ╲_
       │       ╲__
 floor └──────────╲______→ Time
     start  │         stop
        attack_end

Why two different ramp shapes?
------------------------------

  attack   LINEAR from 0. Starting a waveform at full gain puts a step into
           the signal, which is heard as a click. Ten milliseconds of linear
           ramp is too short to hear as a fade but long enough to remove it.

  release  EXPONENTIAL towards a small floor. Exponential decay is how struck
           and plucked sounds die away, and it keeps shrinking smoothly right
           up to the point where the oscillator is stopped.

The exponential segment cannot reach 0 (0 is never a multiple of the peak),
so it targets FLOOR (-80 dB). The curve holds the floor after `stop` until the
owning voice hard-stops its source a few milliseconds later.

Exponential ramp formula
------------------------

    gain(t) = peak * (floor / peak) ^ ((t - attack_end) / (stop - attack_end))

At t = attack_end the exponent is 0 and gain = peak; at t = stop it is 1 and
gain = floor. Every value in between is a positive multiple of the peak,
so the curve can never go negative.

Clamping
--------

If the attack would take the whole event (attack >= stop - start), the attack
is shortened to half the event so some release always happens. Non-finite or
negative inputs are sanitised so the curve never yields NaN or negative gain.
*/

/// Gain the exponential release aims for instead of 0.
pub const ENVELOPE_FLOOR: f32 = 1.0e-4;

/// How the gain moves from the previous point to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    /// Jump to the value at the point's time
    Set,
    /// Straight line from the previous point
    Linear,
    /// Constant-ratio curve from the previous point
    Exponential,
}

/// One time-stamped breakpoint of an envelope curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainPoint {
    /// Absolute time in seconds on the shared clock
    pub time: f64,
    pub gain: f32,
    pub ramp: Ramp,
}

/// Attack/release gain curve anchored to absolute clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShaper {
    start: f64,
    attack_end: f64,
    stop: f64,
    peak: f32,
    floor: f32,
}

impl EnvelopeShaper {
    /// Build the curve for an event sounding from `start_time` to `stop_time`.
    pub fn new(start_time: f64, attack_time: f64, peak_gain: f32, stop_time: f64) -> Self {
        let start = if start_time.is_finite() { start_time } else { 0.0 };
        let span = if stop_time.is_finite() {
            (stop_time - start).max(MIN_TIME)
        } else {
            MIN_TIME
        };

        let mut attack = if attack_time.is_finite() {
            attack_time.max(0.0)
        } else {
            0.0
        };
        if attack >= span {
            attack = span * 0.5;
        }

        let peak = if peak_gain.is_finite() {
            peak_gain.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            start,
            attack_end: start + attack,
            stop: start + span,
            peak,
            floor: ENVELOPE_FLOOR.min(peak),
        }
    }

    /// The curve as automation breakpoints: silence, attack peak, release floor.
    pub fn curve(&self) -> [GainPoint; 3] {
        [
            GainPoint {
                time: self.start,
                gain: 0.0,
                ramp: Ramp::Set,
            },
            GainPoint {
                time: self.attack_end,
                gain: self.peak,
                ramp: Ramp::Linear,
            },
            GainPoint {
                time: self.stop,
                gain: self.floor,
                ramp: Ramp::Exponential,
            },
        ]
    }

    /// Gain at an absolute clock time.
    pub fn gain_at(&self, time: f64) -> f32 {
        if !(time >= self.start) {
            // Before onset (or NaN)
            return 0.0;
        }

        if time < self.attack_end {
            let progress = (time - self.start) / (self.attack_end - self.start);
            return (self.peak as f64 * progress) as f32;
        }

        if time < self.stop {
            if self.peak <= self.floor {
                return self.peak;
            }
            let progress = (time - self.attack_end) / (self.stop - self.attack_end);
            let ratio = (self.floor / self.peak) as f64;
            return (self.peak as f64 * ratio.powf(progress)) as f32;
        }

        self.floor
    }

    /// The same curve moved `seconds` later on the clock.
    pub fn shifted(&self, seconds: f64) -> Self {
        Self {
            start: self.start + seconds,
            attack_end: self.attack_end + seconds,
            stop: self.stop + seconds,
            ..*self
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start
    }

    pub fn attack_end(&self) -> f64 {
        self.attack_end
    }

    pub fn stop_time(&self) -> f64 {
        self.stop
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn sample_times(env: &EnvelopeShaper, steps: usize) -> impl Iterator<Item = f64> + '_ {
        let span = env.stop_time() - env.start_time();
        (0..=steps).map(move |i| env.start_time() + span * i as f64 / steps as f64)
    }

    #[test]
    fn starts_silent_and_reaches_peak_after_attack() {
        let env = EnvelopeShaper::new(1.0, 0.01, 0.2, 1.15);

        assert_eq!(env.gain_at(1.0), 0.0);
        assert!((env.gain_at(1.005) - 0.1).abs() < 1e-4, "halfway through attack");
        assert!((env.gain_at(1.01) - 0.2).abs() < 1e-4);
    }

    #[test]
    fn release_decays_towards_floor() {
        let env = EnvelopeShaper::new(0.0, 0.01, 0.5, 0.5);

        let mut previous = env.gain_at(0.01);
        for t in [0.1, 0.2, 0.3, 0.4, 0.49] {
            let gain = env.gain_at(t);
            assert!(gain < previous, "release must keep decaying at {t}");
            assert!(gain > 0.0, "release never reaches zero");
            previous = gain;
        }

        assert!((env.gain_at(0.5) - ENVELOPE_FLOOR).abs() < EPSILON);
        assert!((env.gain_at(10.0) - ENVELOPE_FLOOR).abs() < EPSILON);
    }

    #[test]
    fn gain_stays_within_zero_and_peak() {
        for &(peak, attack, duration) in &[
            (0.35f32, 0.01, 0.02),
            (0.16, 0.01, 0.9),
            (1.0, 0.01, 0.15),
            (0.00005, 0.01, 0.3),
        ] {
            let env = EnvelopeShaper::new(2.0, attack, peak, 2.0 + duration);
            for t in sample_times(&env, 1000) {
                let gain = env.gain_at(t);
                assert!(!gain.is_nan());
                assert!(gain >= 0.0, "negative gain {gain} at {t}");
                assert!(gain <= peak + EPSILON, "gain {gain} above peak {peak} at {t}");
            }
        }
    }

    #[test]
    fn attack_is_clamped_when_longer_than_event() {
        let env = EnvelopeShaper::new(0.0, 0.5, 0.3, 0.1);

        assert!((env.attack_end() - 0.05).abs() < 1e-12);
        assert!(env.gain_at(0.08) < env.peak(), "some decay must still occur");
    }

    #[test]
    fn degenerate_inputs_never_produce_nan() {
        let env = EnvelopeShaper::new(f64::NAN, f64::INFINITY, f32::NAN, f64::NAN);
        for t in [-1.0, 0.0, 1e-6, 1.0, f64::NAN] {
            let gain = env.gain_at(t);
            assert!(gain.is_finite() && gain >= 0.0);
        }

        let inverted = EnvelopeShaper::new(1.0, 0.01, 0.2, 0.5);
        assert!(inverted.stop_time() > inverted.start_time());
    }

    #[test]
    fn curve_lists_three_breakpoints() {
        let env = EnvelopeShaper::new(0.5, 0.01, 0.18, 0.65);
        let [onset, peak, tail] = env.curve();

        assert_eq!(onset.ramp, Ramp::Set);
        assert_eq!(onset.gain, 0.0);
        assert_eq!(peak.ramp, Ramp::Linear);
        assert!((peak.time - 0.51).abs() < 1e-12);
        assert_eq!(peak.gain, 0.18);
        assert_eq!(tail.ramp, Ramp::Exponential);
        assert!((tail.time - 0.65).abs() < 1e-12);
        assert_eq!(tail.gain, ENVELOPE_FLOOR);
    }
}
