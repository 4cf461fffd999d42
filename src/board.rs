// The pad board: owns the pad table, the display label and the flash state.
// The TUI only ever reads `display_state()`; the audio engine only ever sees
// the commands returned from here.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::audio_api::AudioCommand;
use crate::shared::{pad_for_key, DisplayState, InputEvent, Pad, PadId};

pub const DEFAULT_FLASH: Duration = Duration::from_millis(150);

pub struct PadBoard {
    pads: &'static [Pad],
    state: DisplayState,
    flash: Duration,
    // one entry per trigger, so overlapping triggers on a pad each get their
    // own reset; the later ones just clear an already-cleared flag
    pending_resets: Vec<(PadId, Instant)>,
}

impl PadBoard {
    pub fn new(pads: &'static [Pad], flash: Duration) -> Self {
        Self {
            pads,
            state: DisplayState::default(),
            flash,
            pending_resets: Vec::new(),
        }
    }

    pub fn pads(&self) -> &'static [Pad] {
        self.pads
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.state
    }

    // Keyboard path. Unmapped keys change nothing.
    pub fn trigger(&mut self, key: char, now: Instant) -> Option<AudioCommand> {
        match pad_for_key(self.pads, key) {
            Some(pad) => self.press(pad, now),
            None => {
                debug!(?key, "no pad bound to key");
                None
            }
        }
    }

    // Click path, and where the keyboard path ends up.
    pub fn press(&mut self, pad: PadId, now: Instant) -> Option<AudioCommand> {
        let def = self.pads.get(pad.index())?;
        self.state.label = def.name.to_string();
        self.state.active[pad.index()] = true;
        self.pending_resets.push((pad, now + self.flash));
        debug!(pad = def.id, "triggered");
        Some(AudioCommand::Restart(pad))
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Vec<AudioCommand> {
        let cmd = match event {
            InputEvent::KeyPress(c) => self.trigger(c, now),
            InputEvent::ClickPad(pad) => self.press(pad, now),
            InputEvent::Quit => None,
        };
        cmd.into_iter().collect()
    }

    // Expire flashes whose deadline has passed
    pub fn tick(&mut self, now: Instant) {
        let state = &mut self.state;
        self.pending_resets.retain(|&(pad, deadline)| {
            if deadline <= now {
                state.active[pad.index()] = false;
                false
            } else {
                true
            }
        });
    }
}
