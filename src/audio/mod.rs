use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, error, info};

use crate::audio_api::AudioCommand;

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;
#[cfg(test)]
pub(crate) use sample_buffer::wav_bytes;

use engine::Engine;

const COMMAND_QUEUE: usize = 1024;
const FALLBACK_RATE: u32 = 44100;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    output_stream: Option<cpal::Stream>, // None when muted or no device, dropping it stops playback
}

impl AudioHandle {
    // A handle with nothing listening on the other end. Every command is
    // dropped, which is exactly what a blocked or missing device should do.
    pub fn muted() -> Self {
        let (tx, _) = crossbeam_channel::bounded(1);
        Self {
            tx,
            sample_rate: FALLBACK_RATE,
            output_stream: None,
        }
    }

    // fire and forget: a full or closed queue just loses the command
    pub fn send(&self, cmd: AudioCommand) {
        if let Err(e) = self.tx.try_send(cmd) {
            debug!("audio command dropped: {e}");
        }
    }

    // for the loader thread, which registers clips as they finish decoding
    pub fn sender(&self) -> Sender<AudioCommand> {
        self.tx.clone()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_muted(&self) -> bool {
        self.output_stream.is_none()
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(COMMAND_QUEUE);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream = build_output_stream_f32(&device, &config.into(), rx, channels)?;
            output_stream.play().context("failed to play output stream")?;
            info!(sample_rate, channels, "audio output started");

            Ok(AudioHandle {
                tx,
                sample_rate,
                output_stream: Some(output_stream),
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();
    let mut scratch: Vec<StereoFrame> = Vec::with_capacity(4096);

    let err_fn = |err| error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels.max(1);
            scratch.resize(n_frames, StereoFrame::zero());
            engine.render_block(&mut scratch);
            write_interleaved(&scratch, data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// Spread stereo frames over however many channels the device wants.
// Mono devices get the average, extra channels stay silent.
fn write_interleaved(frames: &[StereoFrame], data: &mut [f32], channels: usize) {
    match channels {
        0 => {}
        1 => {
            for (out, f) in data.iter_mut().zip(frames) {
                *out = 0.5 * (f.left + f.right);
            }
        }
        n => {
            for (chunk, f) in data.chunks_exact_mut(n).zip(frames) {
                chunk[0] = f.left;
                chunk[1] = f.right;
                chunk[2..].fill(0.0);
            }
        }
    }
}
