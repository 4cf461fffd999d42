use crate::audio_api::AudioCommand;
use crate::shared::NUM_PADS;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;

// Lives inside the cpal callback. Clips and voices are fixed arrays indexed by
// pad, so triggering never allocates or searches.
#[derive(Default)]
pub struct Engine {
    clips: [Option<SampleBuffer>; NUM_PADS],
    voices: [Voice; NUM_PADS],
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterClip { pad, buffer } => {
                if let Some(slot) = self.clips.get_mut(pad.index()) {
                    *slot = Some(buffer);
                    self.voices[pad.index()] = Voice::default();
                }
            }
            AudioCommand::Restart(pad) => {
                // a pad whose clip never arrived just stays quiet
                let loaded = self.clips.get(pad.index()).is_some_and(|c| c.is_some());
                if loaded {
                    self.voices[pad.index()].restart();
                }
            }
        }
    }

    #[cfg(test)]
    pub fn is_playing(&self, pad: usize) -> bool {
        self.voices.get(pad).is_some_and(|v| v.active)
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        for (voice, clip) in self.voices.iter_mut().zip(self.clips.iter()) {
            if let Some(clip) = clip {
                voice.render_into(clip, out);
            }
        }
        for f in out.iter_mut() {
            *f = f.clamped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PadId;

    fn clip(value: f32, n: usize) -> SampleBuffer {
        SampleBuffer { data: vec![StereoFrame::mono(value); n] }
    }

    #[test]
    fn default_engine_is_idle() {
        let engine = Engine::default();
        assert!((0..NUM_PADS).all(|p| !engine.is_playing(p)));
        assert!(engine.clips.iter().all(|c| c.is_none()));
    }

    #[test]
    fn restart_without_a_clip_is_silent() {
        let mut engine = Engine::new();
        engine.handle_cmd(AudioCommand::Restart(PadId(2)));
        assert!(!engine.is_playing(2));

        let mut out = [StereoFrame::mono(0.3); 8];
        engine.render_block(&mut out);
        assert!(out.iter().all(|f| *f == StereoFrame::zero()));
    }

    #[test]
    fn registered_clip_plays_on_restart() {
        let mut engine = Engine::new();
        engine.handle_cmd(AudioCommand::RegisterClip { pad: PadId(4), buffer: clip(0.25, 8) });
        assert!(!engine.is_playing(4));

        engine.handle_cmd(AudioCommand::Restart(PadId(4)));
        assert!(engine.is_playing(4));

        let mut out = [StereoFrame::zero(); 4];
        engine.render_block(&mut out);
        assert!(out.iter().all(|f| f.left == 0.25));
    }

    #[test]
    fn pads_sum_and_clip_to_unity() {
        let mut engine = Engine::new();
        for pad in 0..3u8 {
            engine.handle_cmd(AudioCommand::RegisterClip { pad: PadId(pad), buffer: clip(0.5, 4) });
            engine.handle_cmd(AudioCommand::Restart(PadId(pad)));
        }
        let mut out = [StereoFrame::zero(); 2];
        engine.render_block(&mut out);
        assert_eq!(out[0], StereoFrame::mono(1.0));
    }

    #[test]
    fn retrigger_restarts_from_the_top() {
        let mut engine = Engine::new();
        let ramp = SampleBuffer {
            data: (0..10).map(|i| StereoFrame::mono(i as f32 * 0.1)).collect(),
        };
        engine.handle_cmd(AudioCommand::RegisterClip { pad: PadId(0), buffer: ramp });
        engine.handle_cmd(AudioCommand::Restart(PadId(0)));

        let mut out = [StereoFrame::zero(); 5];
        engine.render_block(&mut out);
        assert!((out[4].left - 0.4).abs() < 1e-6);

        engine.handle_cmd(AudioCommand::Restart(PadId(0)));
        let mut out = [StereoFrame::zero(); 2];
        engine.render_block(&mut out);
        assert_eq!(out[0], StereoFrame::zero());
        assert!((out[1].left - 0.1).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_pad_is_ignored() {
        let mut engine = Engine::new();
        engine.handle_cmd(AudioCommand::RegisterClip { pad: PadId(200), buffer: clip(1.0, 4) });
        engine.handle_cmd(AudioCommand::Restart(PadId(200)));
        assert!(!engine.is_playing(200));
    }
}
