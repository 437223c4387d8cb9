use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem};

use crate::state::AppState;

/// Scrolling log of every notification the controller emitted, newest at
/// the bottom.
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::bordered().title("Activity");

    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.activity.len().saturating_sub(visible);

    let items: Vec<ListItem> = state
        .activity
        .iter()
        .skip(skip)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(entry.text.clone()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
