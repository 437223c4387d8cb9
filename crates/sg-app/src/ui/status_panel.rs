use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::state::AppState;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let phase = state.session.phase;

    let mut lines = vec![Line::from(vec![
        Span::raw(phase.icon()),
        Span::raw(" "),
        Span::styled(
            state.session.message.clone(),
            Style::default().fg(phase.color()),
        ),
    ])];

    if let Some(error) = &state.session.last_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    if let Some(secs) = state.elapsed_secs() {
        lines.push(Line::from(Span::styled(
            format!("Elapsed: {secs}s"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title("Status")),
        area,
    );
}
