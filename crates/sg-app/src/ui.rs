mod activity_panel;
mod help_screen;
mod prompt_panel;
mod setup_screen;
mod status_panel;
mod top_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::state::{AppState, Screen};

pub fn draw(frame: &mut Frame, state: &AppState) {
    match state.screen {
        Screen::Setup => setup_screen::draw(frame, state),
        Screen::Help => help_screen::draw(frame, state),
        Screen::Main => draw_main(frame, state),
    }
}

fn draw_main(frame: &mut Frame, state: &AppState) {
    let rows = Layout::vertical([
        Constraint::Length(1), // title bar
        Constraint::Length(5), // prompt input
        Constraint::Length(6), // status
        Constraint::Min(3),    // activity log
        Constraint::Length(1), // footer
    ])
    .split(frame.area());

    top_panel::draw(frame, rows[0], state);
    prompt_panel::draw(frame, rows[1], state);
    status_panel::draw(frame, rows[2], state);
    activity_panel::draw(frame, rows[3], state);
    draw_footer(frame, rows[4], state);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer = Paragraph::new(Span::styled(
        format!("Save location: {}", state.config.save_location),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(footer, area);
}
