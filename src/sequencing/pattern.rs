/*
Pattern Library
===============

Pure functions from a demo `(category, variant)` to an `EventBatch`. Nothing
here touches the audio engine: the output is plain data that the scheduler
anchors to the clock later.

Each category illustrates one musical concept:

  rhythm    pulses in time        noise clicks on a beat grid
  melody    pitches in sequence   one tone after another
  harmony   pitches at once       stacked tones (chords)
  timbre    tone colour           the same pitch with different waveforms
  texture   how lines combine     one line, line + accompaniment, two lines

Timing
------

All offsets are seconds from the moment the batch is dispatched. Rhythm
offsets derive from the tempo (beat = 60 / bpm); the melodic demos use fixed
spacings that are quick enough to hear as a phrase.

    rhythm "simple" at 96 BPM (beat = 0.625 s)

    0.0     0.625   1.25    1.875
    X       x       x       x          X = accented click

    rhythm "claves" (3-2 son clave over two bars)

    0     1.5b  2.5b     4b          6b
    X      X     X       x           x

Pitch
-----

Pitches are semitone offsets from a reference frequency, converted with
equal temperament (see `tuning::transpose`). Offsets may be negative: the
cadence's dominant chord voices B3 and D4 below and above the tonic C4.
*/

use std::str::FromStr;

use crate::{
    config::DemoConfig,
    dsp::{noise::DEFAULT_DECAY_SHAPE, Waveform},
    error::EngineError,
    sequencing::{
        event::{EventBatch, SoundEvent},
        tuning::{transpose, MAJOR_SCALE, MAJOR_TRIAD},
    },
};

/// Length of a percussive click event
pub const CLICK_DURATION: f64 = 0.02;
/// Length of a melodic note
pub const NOTE_DURATION: f64 = 0.15;
/// Length of each chord in the harmony demos
pub const CHORD_DURATION: f64 = 0.9;
/// Length of the timbre demo tone
pub const TIMBRE_DURATION: f64 = 0.6;
/// Length of the accompaniment notes in the homophonic texture
pub const PEDAL_DURATION: f64 = 0.2;

const ACCENT_GAIN: f32 = 0.35;
const PULSE_GAIN: f32 = 0.22;
const CLAVE_STRONG_GAIN: f32 = 0.32;
const CLAVE_WEAK_GAIN: f32 = 0.26;
const CLAVE_BEATS: [f64; 5] = [0.0, 1.5, 2.5, 4.0, 6.0];

const MOTIF: [i32; 7] = [0, 2, 4, 2, 0, -2, 0];
const DOMINANT_FROM_TONIC: [i32; 3] = [-2, 2, 7];
const TEXTURE_LINE: [i32; 8] = [0, 2, 4, 5, 7, 5, 4, 2];
const RISING_VOICE: [i32; 6] = [0, 2, 4, 5, 7, 9];
const FALLING_VOICE: [i32; 6] = [12, 10, 9, 7, 5, 4];

/// Demo categories, one per musical concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Rhythm,
    Melody,
    Harmony,
    Timbre,
    Texture,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Rhythm,
        Category::Melody,
        Category::Harmony,
        Category::Timbre,
        Category::Texture,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Rhythm => "rhythm",
            Category::Melody => "melody",
            Category::Harmony => "harmony",
            Category::Timbre => "timbre",
            Category::Texture => "texture",
        }
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Accepts English and Spanish category names, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rhythm" | "ritmo" => Ok(Category::Rhythm),
            "melody" | "melodia" | "melodía" => Ok(Category::Melody),
            "harmony" | "armonia" | "armonía" => Ok(Category::Harmony),
            "timbre" => Ok(Category::Timbre),
            "texture" | "textura" => Ok(Category::Texture),
            _ => Err(EngineError::UnknownDemo {
                category: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A demo "button": what it plays and how it is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoEntry {
    pub category: Category,
    pub variant: &'static str,
    pub label: &'static str,
}

/// Every demo the library knows, in presentation order.
pub const CATALOG: &[DemoEntry] = &[
    DemoEntry { category: Category::Rhythm, variant: "simple", label: "Steady pulse, accent on 1" },
    DemoEntry { category: Category::Rhythm, variant: "claves", label: "3-2 son clave" },
    DemoEntry { category: Category::Melody, variant: "asc", label: "Ascending major scale" },
    DemoEntry { category: Category::Melody, variant: "motivo", label: "Short melodic motif" },
    DemoEntry { category: Category::Harmony, variant: "triada", label: "Major triad" },
    DemoEntry { category: Category::Harmony, variant: "cadencia", label: "Cadence I-V-I" },
    DemoEntry { category: Category::Timbre, variant: "sine", label: "Sine wave" },
    DemoEntry { category: Category::Timbre, variant: "square", label: "Square wave" },
    DemoEntry { category: Category::Timbre, variant: "sawtooth", label: "Sawtooth wave" },
    DemoEntry { category: Category::Texture, variant: "mono", label: "Monophony: one line" },
    DemoEntry { category: Category::Texture, variant: "homo", label: "Homophony: melody + chord" },
    DemoEntry { category: Category::Texture, variant: "poli", label: "Polyphony: two voices" },
];

/// Build the batch for a demo.
pub fn build(config: &DemoConfig, category: Category, variant: &str) -> EventBatch {
    match category {
        Category::Rhythm => rhythm(config, variant),
        Category::Melody => melody(config, variant),
        Category::Harmony => harmony(config, variant),
        Category::Timbre => timbre(config, variant),
        Category::Texture => texture(config, variant),
    }
}

/// Noise clicks on a beat grid.
pub fn rhythm(config: &DemoConfig, variant: &str) -> EventBatch {
    let beat = config.beat();
    match variant {
        "simple" => (0..4)
            .map(|i| {
                let gain = if i == 0 { ACCENT_GAIN } else { PULSE_GAIN };
                click(i as f64 * beat, gain)
            })
            .collect(),
        "claves" => CLAVE_BEATS
            .iter()
            .enumerate()
            .map(|(i, &beats)| {
                let gain = if i < 3 {
                    CLAVE_STRONG_GAIN
                } else {
                    CLAVE_WEAK_GAIN
                };
                click(beats * beat, gain)
            })
            .collect(),
        _ => EventBatch::new(),
    }
}

/// A single line of sine tones from the melody reference pitch.
pub fn melody(config: &DemoConfig, variant: &str) -> EventBatch {
    let reference = config.melody_reference_hz;
    match variant {
        "asc" => line(reference, &MAJOR_SCALE, 0.15, 0.0, 0.18).collect(),
        "motivo" => line(reference, &MOTIF, 0.14, 0.0, 0.2).collect(),
        _ => EventBatch::new(),
    }
}

/// Chords built on the harmony reference root.
pub fn harmony(config: &DemoConfig, variant: &str) -> EventBatch {
    let root = config.harmony_reference_hz;
    match variant {
        "triada" => chord(root, &MAJOR_TRIAD, 0.0).collect(),
        // I - V - I, the dominant voiced relative to the tonic root
        "cadencia" => chord(root, &MAJOR_TRIAD, 0.0)
            .chain(chord(root, &DOMINANT_FROM_TONIC, 0.8))
            .chain(chord(root, &MAJOR_TRIAD, 1.6))
            .collect(),
        _ => EventBatch::new(),
    }
}

/// One tone whose waveform depends on the variant (sine when unrecognised).
pub fn timbre(config: &DemoConfig, variant: &str) -> EventBatch {
    let waveform = match variant {
        "sawtooth" | "saw" | "sierra" => Waveform::Sawtooth,
        "square" | "cuadrada" => Waveform::Square,
        _ => Waveform::Sine,
    };

    std::iter::once(SoundEvent::tone(
        0.0,
        TIMBRE_DURATION,
        config.timbre_reference_hz,
        waveform,
        0.22,
    ))
    .collect()
}

/// Monophonic, homophonic and polyphonic textures on the texture reference.
pub fn texture(config: &DemoConfig, variant: &str) -> EventBatch {
    let reference = config.texture_reference_hz;
    match variant {
        "mono" => line(reference, &TEXTURE_LINE, 0.12, 0.0, 0.18).collect(),
        "homo" => {
            // Each melody note with a tonic + third pedal an octave below
            let tonic = transpose(reference, -12);
            let third = transpose(reference, -8);
            TEXTURE_LINE
                .iter()
                .enumerate()
                .flat_map(|(i, &st)| {
                    let t = i as f64 * 0.14;
                    [
                        SoundEvent::tone(t, NOTE_DURATION, transpose(reference, st), Waveform::Sine, 0.18),
                        SoundEvent::tone(t, PEDAL_DURATION, tonic, Waveform::Sine, 0.10),
                        SoundEvent::tone(t, PEDAL_DURATION, third, Waveform::Sine, 0.08),
                    ]
                })
                .collect()
        }
        "poli" => line(reference, &RISING_VOICE, 0.16, 0.0, 0.16)
            .chain(line(reference, &FALLING_VOICE, 0.16, 0.08, 0.14))
            .collect(),
        _ => EventBatch::new(),
    }
}

fn click(offset: f64, gain: f32) -> SoundEvent {
    SoundEvent::noise(offset, CLICK_DURATION, gain, DEFAULT_DECAY_SHAPE)
}

/// Evenly spaced sine notes, one per semitone offset.
fn line<'a>(
    reference: f64,
    semitones: &'a [i32],
    spacing: f64,
    delay: f64,
    gain: f32,
) -> impl Iterator<Item = SoundEvent> + 'a {
    semitones.iter().enumerate().map(move |(i, &st)| {
        SoundEvent::tone(
            delay + i as f64 * spacing,
            NOTE_DURATION,
            transpose(reference, st),
            Waveform::Sine,
            gain,
        )
    })
}

/// Simultaneous sine tones at `time`.
fn chord(root: f64, semitones: &[i32], time: f64) -> impl Iterator<Item = SoundEvent> + '_ {
    semitones
        .iter()
        .map(move |&st| SoundEvent::tone(time, CHORD_DURATION, transpose(root, st), Waveform::Sine, 0.16))
}
