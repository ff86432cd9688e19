// Purpose: turn resolved sound events into self-releasing voices
// This layer sits between the scheduler and the output mixer

pub mod message;
pub mod noise;
pub mod tone;
pub mod voice;

pub use message::{VoiceReceiver, VoiceSender};
pub use noise::NoiseGenerator;
pub use tone::ToneGenerator;
pub use voice::{Voice, VoiceState};
