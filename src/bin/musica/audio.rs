//! cpal output driver
//!
//! The device and its config are opened up front so the sample rate is known
//! before activation. The stream itself is only built when the scheduler
//! activates the clock.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, Stream, StreamConfig,
};
use musica_dsp::{
    engine::{Mixer, OutputDriver},
    EngineError, MAX_BLOCK_SIZE,
};
use rtrb::{Consumer, Producer, RingBuffer};
use tracing::error;

pub struct CpalDriver {
    device: Device,
    config: StreamConfig,
    /// Mono copy of the output for the visualizers
    tap: Option<Producer<f32>>,
    stream: Option<Stream>,
}

impl CpalDriver {
    /// Open the default output device. Returns the driver and the read end of
    /// its audio tap.
    pub fn open(tap_capacity: usize) -> EyreResult<(Self, Consumer<f32>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let (tap, tap_rx) = RingBuffer::new(tap_capacity);
        let driver = Self {
            device,
            config: config.into(),
            tap: Some(tap),
            stream: None,
        };
        Ok((driver, tap_rx))
    }
}

impl OutputDriver for CpalDriver {
    fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }

    fn start(&mut self, mut mixer: Mixer) -> Result<(), EngineError> {
        let channels = self.config.channels as usize;
        let mut tap = self.tap.take();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames];
                        mixer.render_block(block);

                        // Mono to all channels
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                            if let Some(tap) = tap.as_mut() {
                                // Visualizer lagging behind; drop the sample
                                let _ = tap.push(s);
                            }
                        }

                        frames_written += frames;
                    }
                },
                |err| error!(error = %err, "audio stream error"),
                None,
            )
            .map_err(|err| EngineError::ClockActivationFailed {
                reason: err.to_string(),
            })?;

        stream
            .play()
            .map_err(|err| EngineError::ClockActivationFailed {
                reason: err.to_string(),
            })?;

        self.stream = Some(stream);
        Ok(())
    }
}
