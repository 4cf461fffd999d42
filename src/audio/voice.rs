use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

// One playback head per pad. Each pad owns exactly one of these in the engine,
// so a retrigger always moves the same head back to the start instead of
// stacking a second copy of the clip.
#[derive(Clone, Copy, Debug, Default)]
pub struct Voice {
    pub pos: usize,
    pub active: bool,
}

impl Voice {
    pub fn restart(&mut self) {
        self.pos = 0;
        self.active = true;
    }

    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        // we're at a certain playback position, it's our job to render this voice into the output buffer
        if !self.active {
            return;
        }
        for frame in out.iter_mut() {
            match buffer.data.get(self.pos) {
                Some(&sample) => {
                    frame.add(sample);
                    self.pos += 1;
                }
                None => { // ran off the end of the clip
                    self.active = false;
                    break;
                }
            }
        }
        if self.pos >= buffer.len() {
            self.active = false;
        }
    }
}
