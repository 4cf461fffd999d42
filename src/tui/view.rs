use crate::shared::{DisplayState, Pad};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use super::grid::draw_pad_grid;
use super::mode::TuiState;

const TITLE: &str = "Drum Machine";

pub fn render(frame: &mut Frame, area: Rect, pads: &[Pad], state: &DisplayState, ts: &mut TuiState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(9), // pads + display
            Constraint::Length(1), // key hint
        ])
        .split(area);

    draw_title(frame, sections[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(sections[1]);

    ts.pad_areas = draw_pad_grid(frame, body[0], pads, &state.active);
    draw_display(frame, body[1], &state.label);
    draw_hint(frame, sections[2], pads);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(Block::bordered().border_type(BorderType::Double));
    frame.render_widget(title, area);
}

fn draw_display(frame: &mut Frame, area: Rect, label: &str) {
    let block = Block::bordered()
        .border_style(Style::default().fg(Color::Green))
        .title("display");
    let inner = block.inner(area);
    let line_area = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::LightGreen)),
        line_area,
    );
}

fn draw_hint(frame: &mut Frame, area: Rect, pads: &[Pad]) {
    let keys: Vec<String> = pads.iter().map(|p| p.key.to_string()).collect();
    let hint = format!("Click pads or press keys {}", keys.join(" "));
    frame.render_widget(
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
