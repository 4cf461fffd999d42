use crate::shared::{Pad, GRID_COLS, NUM_PADS};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

const ROWS: usize = NUM_PADS.div_ceil(GRID_COLS);

// Draws the pads row-major and returns where each one landed, for mouse hit-testing.
pub fn draw_pad_grid(
    frame: &mut Frame,
    area: Rect,
    pads: &[Pad],
    active: &[bool; NUM_PADS],
) -> [Rect; NUM_PADS] {
    let mut areas = [Rect::default(); NUM_PADS];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, ROWS as u32); ROWS])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS])
            .split(*row_area);

        for (col_idx, cell_area) in cols.iter().enumerate() {
            let pad_idx = row_idx * GRID_COLS + col_idx;
            let Some(pad) = pads.get(pad_idx) else {
                continue;
            };
            let style = if active[pad_idx] {
                Style::default().fg(Color::Black).bg(Color::LightGreen).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(style)
                .style(style);

            // vertically centre the key label inside the border
            let inner = block.inner(*cell_area);
            let label_area = Rect {
                y: inner.y + inner.height / 2,
                height: inner.height.min(1),
                ..inner
            };
            frame.render_widget(block, *cell_area);
            frame.render_widget(
                Paragraph::new(pad.key.to_string()).alignment(Alignment::Center).style(style),
                label_area,
            );
            areas[pad_idx] = *cell_area;
        }
    }
    areas
}
