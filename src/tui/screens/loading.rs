use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::LoadingState;

pub fn draw(frame: &mut Frame, area: Rect, state: &LoadingState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(2), // Spacer
            Constraint::Min(3),    // Progress/error
        ])
        .split(area);

    let title = Paragraph::new("framespin")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = if let Some(ref error) = state.error {
        vec![
            Line::from(Span::styled(
                format!("✗ {error}"),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "q Quit",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from(vec![
            Span::raw(state.spinner.current()),
            Span::raw(format!(
                " Loading frames {}/{}...",
                state.loaded, state.total
            )),
        ])]
    };

    let body = Paragraph::new(body).alignment(Alignment::Center);
    frame.render_widget(body, chunks[2]);
}
