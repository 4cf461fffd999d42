pub use crate::audio::SampleBuffer;
use crate::shared::PadId;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't touch the network or disk from the audio callback, so
    // the loader decodes a clip up front and hands the finished buffer over,
    // keyed by the pad that owns it.
    RegisterClip { pad: PadId, buffer: SampleBuffer },

    // Play the pad's clip from frame zero, cutting off whatever it was doing
    Restart(PadId),
}
