use rtrb::{Consumer, Producer};

use crate::{error::EngineError, synth::voice::Voice};

/// Control-thread side of the voice queue.
///
/// Generators hand finished voices to a sender and return immediately; the
/// audio thread picks them up at its next block boundary.
pub trait VoiceSender {
    fn send(&mut self, voice: Voice) -> Result<(), EngineError>;
}

/// Audio-thread side of the voice queue.
pub trait VoiceReceiver {
    fn pop(&mut self) -> Option<Voice>;
}

impl VoiceSender for Producer<Voice> {
    fn send(&mut self, voice: Voice) -> Result<(), EngineError> {
        self.push(voice).map_err(|_| EngineError::ResourceExhausted {
            resource: "voice queue slot",
        })
    }
}

impl VoiceReceiver for Consumer<Voice> {
    fn pop(&mut self) -> Option<Voice> {
        Consumer::pop(self).ok()
    }
}

/// Collect voices without an audio thread (offline inspection).
impl VoiceSender for Vec<Voice> {
    fn send(&mut self, voice: Voice) -> Result<(), EngineError> {
        self.push(voice);
        Ok(())
    }
}
