use crate::dsp::Waveform;

/// What kind of sound an event makes, with the parameters only that kind has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundKind {
    /// Periodic waveform at a pitch
    Tone {
        frequency_hz: f64,
        waveform: Waveform,
        peak_gain: f32,
    },
    /// Decaying noise click
    Noise { peak_gain: f32, decay_shape: f32 },
}

/// The atomic schedulable unit: a sound at an offset from the batch's dispatch.
///
/// Fields are read-only once built; the scheduler only derives absolute
/// timing from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundEvent {
    start_offset: f64,
    duration_seconds: f64,
    kind: SoundKind,
}

impl SoundEvent {
    pub fn tone(
        start_offset: f64,
        duration_seconds: f64,
        frequency_hz: f64,
        waveform: Waveform,
        peak_gain: f32,
    ) -> Self {
        Self {
            start_offset,
            duration_seconds,
            kind: SoundKind::Tone {
                frequency_hz,
                waveform,
                peak_gain,
            },
        }
    }

    pub fn noise(start_offset: f64, duration_seconds: f64, peak_gain: f32, decay_shape: f32) -> Self {
        Self {
            start_offset,
            duration_seconds,
            kind: SoundKind::Noise {
                peak_gain,
                decay_shape,
            },
        }
    }

    /// Seconds after the dispatch moment
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn kind(&self) -> SoundKind {
        self.kind
    }

    pub fn peak_gain(&self) -> f32 {
        match self.kind {
            SoundKind::Tone { peak_gain, .. } | SoundKind::Noise { peak_gain, .. } => peak_gain,
        }
    }

    /// Pitch of a tone; `None` for noise.
    pub fn frequency_hz(&self) -> Option<f64> {
        match self.kind {
            SoundKind::Tone { frequency_hz, .. } => Some(frequency_hz),
            SoundKind::Noise { .. } => None,
        }
    }

    pub fn waveform(&self) -> Option<Waveform> {
        match self.kind {
            SoundKind::Tone { waveform, .. } => Some(waveform),
            SoundKind::Noise { .. } => None,
        }
    }

    pub fn is_noise(&self) -> bool {
        matches!(self.kind, SoundKind::Noise { .. })
    }

    /// Offset at which this event's nominal duration ends
    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.duration_seconds
    }
}

/// One demo invocation's worth of sound events.
///
/// Created per interaction, consumed by a single dispatch, then dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    events: Vec<SoundEvent>,
}

impl EventBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SoundEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SoundEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Latest nominal end offset of any event (0 for an empty batch)
    pub fn span(&self) -> f64 {
        self.events
            .iter()
            .map(SoundEvent::end_offset)
            .fold(0.0, f64::max)
    }
}

impl FromIterator<SoundEvent> for EventBatch {
    fn from_iter<I: IntoIterator<Item = SoundEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EventBatch {
    type Item = &'a SoundEvent;
    type IntoIter = std::slice::Iter<'a, SoundEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
