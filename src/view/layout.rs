//! Header bar rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{NavPosition, ScrollDirection, Set, UiState};

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    sets: &[Set],
    position: NavPosition,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title + set counter
            Constraint::Length(20), // Hint
        ])
        .split(area);

    let counter = if sets.is_empty() {
        "no sets".to_string()
    } else {
        format!("set {}/{}", position.set_index + 1, sets.len())
    };

    // Flash the matching arrow while the carousel slides
    let arrow = match ui_state.scroll_flash {
        Some((ScrollDirection::Forward, _)) => " »",
        Some((ScrollDirection::Backward, _)) => "« ",
        None => "",
    };

    let title = Paragraph::new(format!("🔥 Bangr — {}{}", counter, arrow))
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(title, chunks[0]);

    let hint = Paragraph::new("H for help")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hint, chunks[1]);
}
