use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crate::shared::InputEvent;
use super::mode::TuiState;

// poll for input from the terminal and resolve it into semantic events:
// keys go to the board as characters, clicks are hit-tested against the
// pad areas from the last frame
pub fn poll_input(timeout: Duration, ts: &TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    let events = match event::read()? {
        Event::Key(key) => handle_key(key),
        Event::Mouse(mouse) => handle_mouse(mouse, ts),
        _ => vec![],
    };
    Ok(events)
}

fn handle_key(key: KeyEvent) -> Vec<InputEvent> {
    // holding a key keeps retriggering, like browser keydown; only releases
    // (sent by terminals with enhanced reporting) are dropped
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    match key.code {
        KeyCode::Esc => vec![InputEvent::Quit],
        // raw mode eats SIGINT, so honour ctrl-c by hand
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => vec![InputEvent::Quit],
        KeyCode::Char(c) => vec![InputEvent::KeyPress(c)],
        _ => vec![],
    }
}

fn handle_mouse(mouse: MouseEvent, ts: &TuiState) -> Vec<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => ts
            .pad_at(mouse.column, mouse.row)
            .map(InputEvent::ClickPad)
            .into_iter()
            .collect(),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PadId;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn click(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn characters_pass_through_unchanged() {
        assert_eq!(handle_key(key(KeyCode::Char('q'), KeyEventKind::Press)), vec![InputEvent::KeyPress('q')]);
        assert_eq!(handle_key(key(KeyCode::Char('S'), KeyEventKind::Press)), vec![InputEvent::KeyPress('S')]);
        assert_eq!(handle_key(key(KeyCode::Char('1'), KeyEventKind::Press)), vec![InputEvent::KeyPress('1')]);
    }

    #[test]
    fn releases_are_dropped() {
        assert!(handle_key(key(KeyCode::Char('q'), KeyEventKind::Release)).is_empty());
        assert!(handle_key(key(KeyCode::Esc, KeyEventKind::Release)).is_empty());
    }

    #[test]
    fn held_key_auto_repeat_retriggers() {
        assert_eq!(handle_key(key(KeyCode::Char('q'), KeyEventKind::Repeat)), vec![InputEvent::KeyPress('q')]);
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        assert_eq!(handle_key(key(KeyCode::Esc, KeyEventKind::Press)), vec![InputEvent::Quit]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c), vec![InputEvent::Quit]);
        assert!(handle_key(key(KeyCode::Enter, KeyEventKind::Press)).is_empty());
    }

    #[test]
    fn left_click_on_a_pad_becomes_a_pad_event() {
        let mut ts = TuiState::default();
        ts.pad_areas[4] = Rect::new(20, 10, 8, 4);

        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(handle_mouse(click(down, 22, 11), &ts), vec![InputEvent::ClickPad(PadId(4))]);
        assert!(handle_mouse(click(down, 0, 0), &ts).is_empty());
        assert!(handle_mouse(click(MouseEventKind::Down(MouseButton::Right), 22, 11), &ts).is_empty());
        assert!(handle_mouse(click(MouseEventKind::Up(MouseButton::Left), 22, 11), &ts).is_empty());
    }
}
