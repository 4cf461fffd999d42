use std::io::{Cursor, ErrorKind, Read};

use anyhow::Context;
use symphonia::core::audio::SampleBuffer as DecodeBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as DecodeError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::frame::StereoFrame;

// A decoded clip, already converted to the output device's sample rate
#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // the audio data array
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    // Decode an in-memory clip. `extension` picks the decoder: wav goes
    // through hound, anything else is probed by symphonia.
    pub fn decode(bytes: Vec<u8>, extension: Option<&str>, target_rate: u32) -> anyhow::Result<Self> {
        let is_wav = extension.is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        let (frames, file_rate) = if is_wav {
            read_wav(Cursor::new(bytes))?
        } else {
            read_compressed(bytes, extension)?
        };

        let frames = if file_rate != target_rate {
            resample_linear(&frames, file_rate, target_rate)
        } else {
            frames
        };
        Ok(Self { data: frames })
    }
}

fn read_wav<R: Read>(source: R) -> anyhow::Result<(Vec<StereoFrame>, u32)> {
    let mut reader = hound::WavReader::new(source).context("not a readable wav file")?;
    let spec = reader.spec();

    // Read the samples from the WAV file
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader // float, just pass it through
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => { // int, convert to float
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|x| x as f32 / max))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok((interleaved_to_frames(&samples, spec.channels as usize), spec.sample_rate))
}

fn read_compressed(bytes: Vec<u8>, extension: Option<&str>) -> anyhow::Result<(Vec<StereoFrame>, u32)> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("unsupported clip format")?;
    let mut format = probed.format;

    let track = format.default_track().context("clip has no audio track")?;
    let track_id = track.id;
    let mut rate = track.codec_params.sample_rate.unwrap_or(44100);
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("no decoder for clip codec")?;

    let mut frames = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(DecodeError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(DecodeError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(DecodeError::DecodeError(_)) => continue, // skip a corrupt packet, keep the rest
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        rate = spec.rate;
        let mut buf = DecodeBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        frames.extend(interleaved_to_frames(buf.samples(), spec.channels.count()));
    }

    Ok((frames, rate))
}

fn interleaved_to_frames(samples: &[f32], channels: usize) -> Vec<StereoFrame> {
    match channels {
        0 => Vec::new(),
        1 => samples.iter().map(|&x| StereoFrame::mono(x)).collect(), // mono, duplicate
        n => samples
            .chunks_exact(n) // anything past the first two channels is dropped
            .map(|c| StereoFrame { left: c[0], right: c[1] })
            .collect(),
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || source_rate == 0 {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        // fractional position in the source buffer
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx >= frames.len().saturating_sub(1) {
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn wav_bytes(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_wav_is_duplicated_to_both_channels() {
        let bytes = wav_bytes(1, 44100, &[i16::MAX, 0, i16::MIN / 2]);
        let buf = SampleBuffer::decode(bytes, Some("wav"), 44100).unwrap();

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.data[0].left, buf.data[0].right);
        assert!(buf.data[0].left > 0.99);
        assert_eq!(buf.data[1], StereoFrame::zero());
        assert!((buf.data[2].left + 0.5).abs() < 1e-3);
    }

    #[test]
    fn stereo_wav_keeps_channels_apart() {
        let bytes = wav_bytes(2, 22050, &[i16::MAX, 0, 0, i16::MAX]);
        let buf = SampleBuffer::decode(bytes, Some("WAV"), 22050).unwrap();

        assert_eq!(buf.len(), 2);
        assert!(buf.data[0].left > 0.99 && buf.data[0].right == 0.0);
        assert!(buf.data[1].left == 0.0 && buf.data[1].right > 0.99);
    }

    #[test]
    fn wav_is_resampled_to_the_device_rate() {
        let bytes = wav_bytes(1, 22050, &[0; 100]);
        let buf = SampleBuffer::decode(bytes, Some("wav"), 44100).unwrap();
        assert_eq!(buf.len(), 200);
    }

    #[test]
    fn symphonia_path_also_reads_wav() {
        // no extension, so the probe has to sniff the RIFF header itself
        let bytes = wav_bytes(1, 44100, &[1000; 64]);
        let buf = SampleBuffer::decode(bytes, None, 44100).unwrap();
        assert_eq!(buf.len(), 64);
        assert!(buf.data.iter().all(|f| f.left > 0.0));
    }

    #[test]
    fn mp3_clip_decodes() {
        // twelve silent mono MPEG-1 layer III frames at 44.1 kHz
        let bytes = include_bytes!("../../fixtures/silence.mp3").to_vec();
        let buf = SampleBuffer::decode(bytes, Some("mp3"), 44100).unwrap();

        assert!(buf.len() >= 1152 * 6, "only {} frames decoded", buf.len());
        assert!(buf.len() <= 1152 * 12);
        assert!(buf.data.iter().all(|f| f.left.abs() < 1e-3 && f.left == f.right));
    }

    #[test]
    fn mp3_clip_is_resampled_like_wav() {
        let bytes = include_bytes!("../../fixtures/silence.mp3").to_vec();
        let native = SampleBuffer::decode(bytes.clone(), Some("mp3"), 44100).unwrap();
        let doubled = SampleBuffer::decode(bytes, Some("mp3"), 88200).unwrap();
        assert_eq!(doubled.len(), native.len() * 2);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(SampleBuffer::decode(vec![1, 2, 3, 4], Some("mp3"), 44100).is_err());
        assert!(SampleBuffer::decode(vec![1, 2, 3, 4], Some("wav"), 44100).is_err());
    }

    #[test]
    fn linear_resample_interpolates_between_frames() {
        let frames = [StereoFrame::mono(0.0), StereoFrame::mono(1.0)];
        let out = resample_linear(&frames, 1, 2);
        assert_eq!(out.len(), 4);
        assert!((out[1].left - 0.5).abs() < 1e-6);
        assert_eq!(out[3], StereoFrame::mono(1.0));
    }
}
