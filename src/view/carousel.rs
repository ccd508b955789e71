//! Set carousel rendering
//!
//! Three slots: the previous, selected and next set, with blank slots past
//! either end of the list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{NavPosition, Set, Track};
use super::utils::truncate_string;

pub fn render_carousel(
    frame: &mut Frame,
    area: Rect,
    sets: &[Set],
    position: NavPosition,
    playing_uri: Option<&str>,
    is_playing: bool,
) {
    if sets.is_empty() {
        render_empty_state(frame, area);
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let neighbors = [
        position.set_index.checked_sub(1),
        Some(position.set_index),
        position.set_index.checked_add(1).filter(|i| *i < sets.len()),
    ];

    for (slot, set_index) in slots.iter().zip(neighbors) {
        match set_index.and_then(|i| sets.get(i)) {
            Some(set) => {
                let selected = set_index == Some(position.set_index);
                let track_cursor = selected.then_some(position.track_index);
                render_set_panel(frame, *slot, set, selected, track_cursor, playing_uri, is_playing);
            }
            None => {
                // Blank edge slot, like the dummy sets padding the original
                // carousel
                let blank = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray));
                frame.render_widget(blank, *slot);
            }
        }
    }
}

fn render_set_panel(
    frame: &mut Frame,
    area: Rect,
    set: &Set,
    selected: bool,
    track_cursor: Option<usize>,
    playing_uri: Option<&str>,
    is_playing: bool,
) {
    let border_style = if selected {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Avatar slot, falling back to the username's initial like the web UI
    let avatar = if set.profile_pic_url.is_empty() {
        set.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "•".to_string())
    } else {
        "◉".to_string()
    };
    let title = format!(" {} {}'s Bangers ", avatar, set.username);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(if selected {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        })
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    let name_width = (area.width as usize).saturating_sub(14).max(8);
    let items: Vec<ListItem> = set
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| track_line(track, i, track_cursor, playing_uri, is_playing, name_width))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn track_line(
    track: &Track,
    index: usize,
    track_cursor: Option<usize>,
    playing_uri: Option<&str>,
    is_playing: bool,
    name_width: usize,
) -> ListItem<'static> {
    let playing_here = playing_uri == Some(track.uri.as_str());
    let marker = if playing_here {
        if is_playing { "▶" } else { "⏸" }
    } else {
        " "
    };

    let cursor = if track_cursor == Some(index) { "›" } else { " " };
    let flame = if track.liked { "🔥" } else { "  " };

    let style = if playing_here {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else if track_cursor == Some(index) {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let label = truncate_string(&format!("{} — {}", track.name, track.artist), name_width);

    ListItem::new(Line::from(vec![
        Span::styled(format!("{cursor}{marker} "), style),
        Span::styled(label, style),
        Span::styled(
            format!(" {:>3} {}", track.likes, flame),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    let message = Paragraph::new("No sets available yet.\nCome back once your group has dropped some bangers.")
        .style(Style::default().fg(Color::DarkGray))
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, area);
}
