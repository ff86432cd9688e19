/// Equal-tempered transposition: `reference * 2^(semitones / 12)`.
#[inline]
pub fn transpose(reference_hz: f64, semitones: i32) -> f64 {
    reference_hz * 2.0_f64.powf(semitones as f64 / 12.0)
}

/// Semitone offsets of a major scale, tonic to octave.
pub const MAJOR_SCALE: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

/// Root, major third, fifth.
pub const MAJOR_TRIAD: [i32; 3] = [0, 4, 7];
