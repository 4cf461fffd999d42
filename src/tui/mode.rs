use ratatui::layout::{Position, Rect};

use crate::shared::{PadId, NUM_PADS};

// state local to the tui: where each pad was drawn on the last frame,
// so a mouse click can be resolved to a pad before it reaches the board
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    pub pad_areas: [Rect; NUM_PADS],
}

impl TuiState {
    pub fn pad_at(&self, column: u16, row: u16) -> Option<PadId> {
        let pos = Position::new(column, row);
        self.pad_areas
            .iter()
            .position(|area| area.contains(pos))
            .map(|i| PadId(i as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_clickable_before_the_first_draw() {
        assert_eq!(TuiState::default().pad_at(0, 0), None);
    }

    #[test]
    fn clicks_resolve_to_the_pad_underneath() {
        let mut ts = TuiState::default();
        ts.pad_areas[0] = Rect::new(0, 0, 10, 4);
        ts.pad_areas[1] = Rect::new(10, 0, 10, 4);

        assert_eq!(ts.pad_at(3, 2), Some(PadId(0)));
        assert_eq!(ts.pad_at(10, 0), Some(PadId(1)));
        assert_eq!(ts.pad_at(20, 0), None); // right edge is exclusive
        assert_eq!(ts.pad_at(5, 4), None);
    }
}
