use crate::dsp::{noise::NOISE_BUFFER_LEN, EnvelopeShaper, Oscillator};

/// What a voice is doing relative to a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// Start time not reached yet
    Pending,
    /// Producing samples
    Sounding,
    /// Lifetime over; the slot can be released
    Finished,
}

/// The signal source owned by a voice.
#[derive(Debug, Clone)]
pub enum VoiceSource {
    Tone {
        oscillator: Oscillator,
        envelope: EnvelopeShaper,
    },
    Noise {
        burst: [f32; NOISE_BUFFER_LEN],
    },
}

/// One scheduled sound: a signal source bound to a frame window on the clock.
///
/// The voice owns its source for exactly `[start_frame, end_frame)`. When the
/// mixer renders past `end_frame` the voice reports `Finished` and its slot
/// is cleared, which releases the source. No timers are involved.
#[derive(Debug, Clone)]
pub struct Voice {
    source: VoiceSource,
    start_frame: u64,
    end_frame: u64,
    sample_rate: f32,
}

/// Convert clock seconds to the nearest frame index.
#[inline]
pub fn seconds_to_frame(seconds: f64, sample_rate: f32) -> u64 {
    (seconds * sample_rate as f64).round().max(0.0) as u64
}

impl Voice {
    /// A tone sounding from `start_time` until `end_time` (both absolute seconds).
    pub fn tone(
        oscillator: Oscillator,
        envelope: EnvelopeShaper,
        start_time: f64,
        end_time: f64,
        sample_rate: f32,
    ) -> Self {
        Self::new(
            VoiceSource::Tone {
                oscillator,
                envelope,
            },
            start_time,
            end_time,
            sample_rate,
        )
    }

    /// A pre-rendered noise burst played once from `start_time`; the voice is
    /// held until `end_time`.
    pub fn noise(
        burst: [f32; NOISE_BUFFER_LEN],
        start_time: f64,
        end_time: f64,
        sample_rate: f32,
    ) -> Self {
        Self::new(VoiceSource::Noise { burst }, start_time, end_time, sample_rate)
    }

    fn new(source: VoiceSource, start_time: f64, end_time: f64, sample_rate: f32) -> Self {
        let start_frame = seconds_to_frame(start_time, sample_rate);
        let end_frame = seconds_to_frame(end_time, sample_rate).max(start_frame + 1);
        Self {
            source,
            start_frame,
            end_frame,
            sample_rate,
        }
    }

    /// Add this voice's output for the block beginning at `block_start` into `out`.
    pub fn render_add(&mut self, out: &mut [f32], block_start: u64) -> VoiceState {
        let block_end = block_start + out.len() as u64;
        if block_end <= self.start_frame {
            return VoiceState::Pending;
        }

        let first = self.start_frame.saturating_sub(block_start) as usize;
        let last = (self.end_frame.min(block_end) - block_start) as usize;

        if first < last {
            match &mut self.source {
                VoiceSource::Tone {
                    oscillator,
                    envelope,
                } => {
                    let sr = self.sample_rate as f64;
                    for (i, sample) in out[first..last].iter_mut().enumerate() {
                        let frame = block_start + (first + i) as u64;
                        let gain = envelope.gain_at(frame as f64 / sr);
                        *sample += oscillator.next_sample() * gain;
                    }
                }
                VoiceSource::Noise { burst } => {
                    for (i, sample) in out[first..last].iter_mut().enumerate() {
                        let index = (block_start + (first + i) as u64 - self.start_frame) as usize;
                        match burst.get(index) {
                            Some(value) => *sample += value,
                            None => break,
                        }
                    }
                }
            }
        }

        if block_end >= self.end_frame {
            VoiceState::Finished
        } else {
            VoiceState::Sounding
        }
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn end_frame(&self) -> u64 {
        self.end_frame
    }

    pub fn is_tone(&self) -> bool {
        matches!(self.source, VoiceSource::Tone { .. })
    }

    /// Move a voice whose start frame has already passed so it begins at
    /// `frame`, keeping its length and attack.
    pub fn delay_to(&mut self, frame: u64) {
        if frame <= self.start_frame {
            return;
        }

        let delta = frame - self.start_frame;
        self.start_frame = frame;
        self.end_frame += delta;
        if let VoiceSource::Tone { envelope, .. } = &mut self.source {
            *envelope = envelope.shifted(delta as f64 / self.sample_rate as f64);
        }
    }

    /// Envelope of a tone voice; `None` for noise.
    pub fn envelope(&self) -> Option<&EnvelopeShaper> {
        match &self.source {
            VoiceSource::Tone { envelope, .. } => Some(envelope),
            VoiceSource::Noise { .. } => None,
        }
    }
}
