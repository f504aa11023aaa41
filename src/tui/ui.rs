use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, Screen};
use super::screens;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout with status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Outer frame
    let main_block = Block::default()
        .title(" framespin ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = main_block.inner(chunks[0]);
    frame.render_widget(main_block, chunks[0]);

    // Draw current screen
    match app.screen {
        Screen::Loading => screens::loading::draw(frame, inner_area, &app.loading),
        Screen::Viewer => screens::viewer::draw(frame, inner_area, &app.spinner),
    }

    draw_status_bar(frame, chunks[1], app);
}

fn draw_status_bar(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let mut spans = match app.screen {
        Screen::Loading => vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ],
        Screen::Viewer => vec![
            Span::styled("drag", Style::default().fg(Color::Yellow)),
            Span::raw(" Rotate  "),
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::raw(" Step  "),
            Span::styled("d", Style::default().fg(Color::Yellow)),
            Span::raw(" Demo  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ],
    };

    if app.spinner.is_ready() {
        spans.push(Span::styled(
            format!(
                "  frame {}/{}",
                app.spinner.current_index() + 1,
                app.spinner.frame_count()
            ),
            Style::default().fg(Color::Cyan),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
