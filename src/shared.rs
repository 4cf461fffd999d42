// The keyboard layout of the board:
//
//   Q W E         //  pads 0 1 2
//   A S D         //  pads 3 4 5
//   Z X C         //  pads 6 7 8
//
// Keys match case-insensitively, so 'q' and 'Q' both hit pad 0.
// Left-clicking a pad on screen does the same thing as its key.
// Esc quits.
//
// The TUI turns raw crossterm events into `InputEvent`s, the board turns those
// into `AudioCommand`s plus a new `DisplayState`, and the view just draws
// whatever `DisplayState` says on every frame.

pub const NUM_PADS: usize = 9;
pub const GRID_COLS: usize = 3;

pub const READY_TEXT: &str = "Ready";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PadId(pub u8);

impl PadId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// One pad on the board; the table below is fixed at compile time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pad {
    pub key: char,
    pub id: &'static str, // unique, handy as a lookup hook in tests and logs
    pub source: &'static str, // url or local path of the clip
    pub name: &'static str, // what the display shows when this pad fires
}

pub static PADS: [Pad; NUM_PADS] = [
    Pad { key: 'Q', id: "Heater-1", source: "https://s3.amazonaws.com/freecodecamp/drums/Heater-1.mp3", name: "Heater 1" },
    Pad { key: 'W', id: "Heater-2", source: "https://s3.amazonaws.com/freecodecamp/drums/Heater-2.mp3", name: "Heater 2" },
    Pad { key: 'E', id: "Heater-3", source: "https://s3.amazonaws.com/freecodecamp/drums/Heater-3.mp3", name: "Heater 3" },
    Pad { key: 'A', id: "Heater-4", source: "https://s3.amazonaws.com/freecodecamp/drums/Heater-4_1.mp3", name: "Heater 4" },
    Pad { key: 'S', id: "Clap", source: "https://s3.amazonaws.com/freecodecamp/drums/Heater-6.mp3", name: "Clap" },
    Pad { key: 'D', id: "Open-HH", source: "https://s3.amazonaws.com/freecodecamp/drums/Dsc_Oh.mp3", name: "Open-HH" },
    Pad { key: 'Z', id: "Kick-n'-Hat", source: "https://s3.amazonaws.com/freecodecamp/drums/Kick_n_Hat.mp3", name: "Kick-n'-Hat" },
    Pad { key: 'X', id: "Kick", source: "https://s3.amazonaws.com/freecodecamp/drums/RP4_KICK_1.mp3", name: "Kick" },
    Pad { key: 'C', id: "Closed-HH", source: "https://s3.amazonaws.com/freecodecamp/drums/Cev_H2.mp3", name: "Closed-HH" },
];

// Case-insensitive key -> pad lookup
pub fn pad_for_key(pads: &[Pad], key: char) -> Option<PadId> {
    let key = key.to_ascii_uppercase();
    pads.iter()
        .position(|p| p.key.to_ascii_uppercase() == key)
        .map(|i| PadId(i as u8))
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    KeyPress(char), // any character key, resolved to a pad by the board
    ClickPad(PadId), // left click already hit-tested by the tui
    Quit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub label: String,
    pub active: [bool; NUM_PADS], // pads currently flashing
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            label: READY_TEXT.to_string(),
            active: [false; NUM_PADS],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_ids_and_keys_are_unique() {
        for (i, a) in PADS.iter().enumerate() {
            for b in &PADS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn keys_resolve_in_either_case() {
        assert_eq!(pad_for_key(&PADS, 'q'), Some(PadId(0)));
        assert_eq!(pad_for_key(&PADS, 'Q'), Some(PadId(0)));
        assert_eq!(pad_for_key(&PADS, 's'), Some(PadId(4)));
        assert_eq!(pad_for_key(&PADS, 'c'), Some(PadId(8)));
        assert_eq!(pad_for_key(&PADS, '1'), None);
        assert_eq!(pad_for_key(&PADS, 'r'), None);
    }
}
