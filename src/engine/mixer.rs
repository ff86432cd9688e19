use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};

use crate::{
    engine::clock::SampleClock,
    synth::{
        message::VoiceReceiver,
        voice::{Voice, VoiceState},
    },
};

/// Counters the audio thread publishes for the control side.
#[derive(Debug, Default)]
pub struct MixerStats {
    active: AtomicUsize,
    dropped: AtomicU64,
}

impl MixerStats {
    /// Voices sounding or waiting to start after the last block
    pub fn active_voices(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// Voices discarded because every slot was taken
    pub fn dropped_voices(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// The output sink: sums every live voice into the output buffer.
///
/// Runs on the audio thread. The voice pool is allocated once up front; new
/// voices arrive through the queue and occupy a free slot until their
/// lifetime ends. Mixing is plain addition, so voices never need to
/// coordinate with each other.
pub struct Mixer<R: VoiceReceiver = rtrb::Consumer<Voice>> {
    voices: Vec<Option<Voice>>,
    rx: R,
    clock: SampleClock,
    stats: Arc<MixerStats>,
}

impl<R: VoiceReceiver> Mixer<R> {
    pub fn new(clock: SampleClock, rx: R, max_voices: usize, stats: Arc<MixerStats>) -> Self {
        Self {
            voices: (0..max_voices.max(1)).map(|_| None).collect(),
            rx,
            clock,
            stats,
        }
    }

    /// Render the next block and advance the clock by its length.
    ///
    /// The clock is advanced before the voices are summed, so while a block
    /// is being rendered `now()` already names the boundary at which newly
    /// queued voices will be picked up.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let block_start = self.clock.frames();
        self.accept_voices(block_start);
        self.clock.advance(out.len() as u64);

        out.fill(0.0);

        let mut active = 0;
        for slot in self.voices.iter_mut() {
            let state = match slot {
                Some(voice) => voice.render_add(out, block_start),
                None => continue,
            };
            match state {
                // Dropping the voice releases its source
                VoiceState::Finished => *slot = None,
                VoiceState::Pending | VoiceState::Sounding => active += 1,
            }
        }

        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.stats.active.store(active, Ordering::Relaxed);
    }

    /// Move queued voices into free slots. A voice whose start frame is
    /// already behind `block_start` starts at `block_start` instead.
    fn accept_voices(&mut self, block_start: u64) {
        while let Some(mut voice) = self.rx.pop() {
            voice.delay_to(block_start);
            match self.voices.iter_mut().find(|slot| slot.is_none()) {
                Some(slot) => *slot = Some(voice),
                None => {
                    self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Voices currently holding a slot
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }
}
