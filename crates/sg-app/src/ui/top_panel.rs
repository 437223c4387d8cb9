use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::AppState;

pub fn draw(frame: &mut Frame, area: Rect, _state: &AppState) {
    let columns = Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).split(area);

    let title = Line::from(vec![
        Span::styled(
            "🎬 soragen",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Sora video generator", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(title), columns[0]);

    let hint = Span::styled("Press ? for help", Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(hint)), columns[1]);
}
