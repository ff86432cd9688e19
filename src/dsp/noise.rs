//! Decaying white-noise bursts for percussive clicks.
//!
//! A burst is a fixed, short buffer of uniform white noise multiplied by an
//! exponential decay:
//!
//! ```text
//! sample[i] = (u * 2 - 1) * exp(-i / decay)      u uniform in [0, 1)
//! ```
//!
//! With the default decay constant of 24 samples the burst has faded by
//! ~80 dB well before the end of the 256-sample buffer, which is what makes
//! it sound like a click rather than a hiss. The buffer length does not
//! depend on the event duration: a click is always this short.

use rand::Rng;

/// Length of every noise burst in samples.
pub const NOISE_BUFFER_LEN: usize = 256;

/// Default steepness of the burst decay, in samples.
pub const DEFAULT_DECAY_SHAPE: f32 = 24.0;

/// Fill `out` with a decaying noise burst scaled by `gain`.
///
/// A non-positive or non-finite decay constant collapses the burst to silence.
pub fn fill_burst<R: Rng + ?Sized>(rng: &mut R, out: &mut [f32], gain: f32, decay_shape: f32) {
    if !(decay_shape > 0.0) || !decay_shape.is_finite() {
        out.fill(0.0);
        return;
    }

    for (i, sample) in out.iter_mut().enumerate() {
        let white: f32 = rng.gen::<f32>() * 2.0 - 1.0;
        *sample = white * (-(i as f32) / decay_shape).exp() * gain;
    }
}
