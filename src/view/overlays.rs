//! Modal overlays: error banner, leaderboard, help

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let outer = frame.area();
    let width = width.min(outer.width.saturating_sub(4));
    let height = height.min(outer.height.saturating_sub(4));
    Rect {
        x: outer.width.saturating_sub(width) / 2,
        y: outer.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn popup_block(title: &'static str, accent: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title)
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Black))
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(message) = ui_state.error_message.as_deref() else {
        return;
    };

    // Two border rows plus however many lines the message wraps into
    let width: u16 = 52;
    let text_cols = width.saturating_sub(4).max(1);
    let text_rows = (message.chars().count() as u16).div_ceil(text_cols).max(1);
    let area = popup_area(frame, width, text_rows + 2);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(popup_block(" Error (Esc to dismiss) ", Color::Red)),
        area,
    );
}

pub fn render_leaderboard(frame: &mut Frame, ui_state: &UiState) {
    let rows = ui_state.leaderboard.len().max(1) as u16;
    let area = popup_area(frame, 56, rows + 2);
    frame.render_widget(Clear, area);

    let name_width = area.width.saturating_sub(12) as usize;
    let items: Vec<ListItem> = if ui_state.leaderboard.is_empty() {
        vec![
            ListItem::new("No likes in the group yet.")
                .style(Style::default().fg(Color::DarkGray)),
        ]
    } else {
        ui_state
            .leaderboard
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                let title =
                    format!("{:>2}. {} — {}", rank + 1, entry.track_name, entry.artist_name);
                let title: String = title.chars().take(name_width).collect();
                ListItem::new(Line::from(vec![
                    Span::styled(title, Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  {:>3} 🔥", entry.likes),
                        Style::default().fg(Color::Magenta),
                    ),
                ]))
            })
            .collect()
    };

    frame.render_widget(
        List::new(items).block(popup_block(" Leaderboard (L or Esc to close) ", Color::Magenta)),
        area,
    );
}

pub fn render_help_popup(frame: &mut Frame) {
    const BINDINGS: &[(&str, &str)] = &[
        ("Space", "Play / pause"),
        ("↑ / ↓", "Previous / next track"),
        ("← / →", "Previous / next set"),
        ("[ / ]", "Seek back / forward 10s"),
        ("F", "Like / unlike the current track"),
        ("L", "Show the leaderboard"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let area = popup_area(frame, 48, BINDINGS.len() as u16 + 2);
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>8}"),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(*action, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(popup_block(" Help (H or Esc to close) ", Color::Magenta)),
        area,
    );
}
