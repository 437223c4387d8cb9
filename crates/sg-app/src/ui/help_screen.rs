use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use sg_core::VideoModel;

use crate::state::AppState;

pub fn draw(frame: &mut Frame, _state: &AppState) {
    let rows = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(1),
        Constraint::Length(5), // getting started
        Constraint::Length(7), // shortcuts
        Constraint::Length(4), // models
        Constraint::Length(1),
        Constraint::Length(1), // footer
        Constraint::Min(0),
    ])
    .margin(2)
    .split(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(
            "🎬 soragen help",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );

    let getting_started = vec![
        Line::from("1. Get an API key from platform.openai.com"),
        Line::from("2. Set OPENAI_API_KEY or enter it on the setup screen"),
        Line::from("3. Describe a video and press Enter"),
    ];
    frame.render_widget(
        Paragraph::new(getting_started).block(
            Block::bordered().title(Span::styled(
                "🚀 Getting started",
                Style::default().fg(Color::Blue),
            )),
        ),
        rows[2],
    );

    let shortcuts = vec![
        Line::from("?  or F1      Help (with an empty prompt)"),
        Line::from("Esc           Back, or clear the prompt"),
        Line::from("Tab           Switch field on the setup screen"),
        Line::from("Enter         Submit"),
        Line::from("Ctrl+C twice  Quit"),
    ];
    frame.render_widget(
        Paragraph::new(shortcuts).block(
            Block::bordered().title(Span::styled(
                "⌨ Keyboard",
                Style::default().fg(Color::Cyan),
            )),
        ),
        rows[3],
    );

    let models: Vec<Line> = VideoModel::all()
        .iter()
        .map(|model| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", model.name()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "{} (~{}s)",
                    model.description(),
                    model.estimated_time_secs()
                )),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(models).block(
            Block::bordered().title(Span::styled(
                "🎥 Models",
                Style::default().fg(Color::Magenta),
            )),
        ),
        rows[4],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Press Esc to go back",
            Style::default().fg(Color::DarkGray),
        )),
        rows[6],
    );
}
