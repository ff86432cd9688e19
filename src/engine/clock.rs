use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

#[derive(Debug)]
struct ClockInner {
    frames: AtomicU64,
    sample_rate: f32,
}

/// Shared audio clock: seconds since the output started rendering.
///
/// Time is a frame counter that only the mixer advances, so the clock moves
/// exactly as fast as audio is produced and never drifts from it. Clones are
/// handles to the same counter.
#[derive(Debug, Clone)]
pub struct SampleClock {
    inner: Arc<ClockInner>,
}

impl SampleClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            inner: Arc::new(ClockInner {
                frames: AtomicU64::new(0),
                sample_rate,
            }),
        }
    }

    /// Current time in seconds.
    pub fn now(&self) -> f64 {
        self.frames() as f64 / self.inner.sample_rate as f64
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.inner.frames.load(Ordering::Acquire)
    }

    pub fn sample_rate(&self) -> f32 {
        self.inner.sample_rate
    }

    /// True when both handles refer to the same clock instance.
    pub fn same_as(&self, other: &SampleClock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Called by the mixer once a block has been rendered.
    pub(crate) fn advance(&self, frames: u64) {
        self.inner.frames.fetch_add(frames, Ordering::AcqRel);
    }
}
