use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::state::{AppState, SetupField};

pub fn draw(frame: &mut Frame, state: &AppState) {
    let rows = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(1), // subtitle
        Constraint::Length(1),
        Constraint::Length(1), // api key label
        Constraint::Length(3), // api key input
        Constraint::Length(1), // save location label
        Constraint::Length(3), // save location input
        Constraint::Length(1), // hint
        Constraint::Length(3), // tip box
        Constraint::Min(0),
    ])
    .margin(2)
    .split(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(
            "🎬 soragen setup",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Welcome! Let's get you set up.",
            Style::default().fg(Color::Gray),
        )),
        rows[1],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "OpenAI API key ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "(platform.openai.com/api-keys)",
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        rows[3],
    );
    input_box(
        frame,
        rows[4],
        &state.api_key_input,
        "sk-...",
        state.setup_focus == SetupField::ApiKey,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Video save location",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        rows[5],
    );
    input_box(
        frame,
        rows[6],
        &state.save_location_input,
        "./videos",
        state.setup_focus == SetupField::SaveLocation,
    );

    let (hint, color) = if state.api_key_input.trim().is_empty() {
        ("Enter an API key to continue", Color::Yellow)
    } else {
        ("Press Enter to start", Color::Green)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(color))),
        rows[7],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "💡 Tip: set OPENAI_API_KEY to skip this screen",
            Style::default().fg(Color::Yellow),
        ))
        .block(Block::bordered()),
        rows[8],
    );
}

fn input_box(frame: &mut Frame, area: Rect, value: &str, placeholder: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::bordered().border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value.to_string())
    };
    frame.render_widget(Paragraph::new(Line::from(content)), inner);

    if focused && inner.width > 0 {
        let x = inner.x + (value.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}
