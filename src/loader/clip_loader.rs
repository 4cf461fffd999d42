use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context;
use crossbeam_channel::Sender;
use tracing::{info, warn};

use crate::audio::SampleBuffer;
use crate::audio_api::AudioCommand;
use crate::shared::{Pad, PadId};

// Where a pad's clip lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClipSource {
    Remote(String),
    Local(PathBuf),
}

impl ClipSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            ClipSource::Remote(source.to_string())
        } else if let Some(path) = source.strip_prefix("file://") {
            ClipSource::Local(PathBuf::from(path))
        } else {
            ClipSource::Local(PathBuf::from(source))
        }
    }

    // "Heater-1.mp3" -> "mp3"; query strings and fragments don't count
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            ClipSource::Remote(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url.as_str());
                path.rsplit('/').next().unwrap_or(path).to_string()
            }
            ClipSource::Local(path) => path.file_name()?.to_string_lossy().into_owned(),
        };
        Path::new(&name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    fn fetch(&self, client: &reqwest::blocking::Client) -> anyhow::Result<Vec<u8>> {
        match self {
            ClipSource::Remote(url) => {
                let bytes = client
                    .get(url)
                    .send()
                    .with_context(|| format!("request for {url} failed"))?
                    .error_for_status()?
                    .bytes()?;
                Ok(bytes.to_vec())
            }
            ClipSource::Local(path) => std::fs::read(path)
                .with_context(|| format!("could not read {}", path.display())),
        }
    }
}

pub fn http_client(timeout: Duration) -> anyhow::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("padboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")
}

// Fetch and decode one clip at the engine's sample rate
pub fn load_clip(
    source: &str,
    target_rate: u32,
    client: &reqwest::blocking::Client,
) -> anyhow::Result<SampleBuffer> {
    let source = ClipSource::parse(source);
    let bytes = source.fetch(client)?;
    SampleBuffer::decode(bytes, source.extension().as_deref(), target_rate)
}

// Load every pad's clip in the background, in pad order, registering each
// one with the engine as soon as it decodes. A pad whose clip fails is
// logged and left silent.
pub fn spawn_preload(
    pads: &'static [Pad],
    target_rate: u32,
    timeout: Duration,
    tx: Sender<AudioCommand>,
) -> anyhow::Result<JoinHandle<usize>> {
    let handle = std::thread::Builder::new()
        .name("clip-loader".into())
        .spawn(move || {
            let client = match http_client(timeout) {
                Ok(c) => c,
                Err(e) => {
                    warn!("clip loading disabled: {e:#}");
                    return 0;
                }
            };
            let mut loaded = 0;
            for (i, pad) in pads.iter().enumerate() {
                match load_clip(pad.source, target_rate, &client) {
                    Ok(buffer) => {
                        let frames = buffer.len();
                        // off the audio thread, so waiting for queue space is fine
                        if tx.send(AudioCommand::RegisterClip { pad: PadId(i as u8), buffer }).is_err() {
                            warn!("audio engine gone, stopping clip preload");
                            break;
                        }
                        info!(pad = pad.id, frames, "clip loaded");
                        loaded += 1;
                    }
                    Err(e) => warn!(pad = pad.id, "clip unavailable: {e:#}"),
                }
            }
            info!(loaded, total = pads.len(), "clip preload finished");
            loaded
        })
        .context("failed to spawn clip loader")?;
    Ok(handle)
}
