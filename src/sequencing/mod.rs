pub mod event;
pub mod pattern;
pub mod tuning;

pub use event::{EventBatch, SoundEvent, SoundKind};
pub use pattern::{Category, DemoEntry, CATALOG};
pub use tuning::transpose;
