use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::state::AppState;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::bordered().title("Video Prompt");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let prompt = if state.prompt.is_empty() {
        Line::from(Span::styled(
            "Describe your video...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(state.prompt.clone())
    };
    frame.render_widget(Paragraph::new(prompt).wrap(Wrap { trim: false }), rows[0]);

    let (hint, color) = if state.session.phase.is_busy() {
        ("Waiting on the current job...", Color::DarkGray)
    } else if state.prompt.trim().is_empty() {
        ("Enter a prompt to continue", Color::Yellow)
    } else {
        ("Press Enter to create video", Color::Green)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(color))),
        rows[1],
    );

    if rows[0].width > 0 {
        let x = rows[0].x
            + (state.prompt.chars().count() as u16).min(rows[0].width.saturating_sub(1));
        frame.set_cursor_position((x, rows[0].y));
    }
}
