pub mod clock;
pub mod lifecycle;
pub mod mixer;
pub mod scheduler;

pub use self::{
    clock::SampleClock,
    lifecycle::{ActiveOutput, AudioEngine, OfflineDriver, OutputDriver},
    mixer::{Mixer, MixerStats},
    scheduler::{DispatchReport, Scheduler},
};
