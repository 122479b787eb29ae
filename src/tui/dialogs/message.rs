//! Message dialog
//!
//! Shows a warning or an error until the user presses a key.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

/// Severity of a message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Render a message dialog
pub fn render(frame: &mut Frame, severity: Severity, title: &str, message: &str) {
    // Leave room for long storage errors
    let height = if message.len() > 50 { 8 } else { 7 };
    let area = centered_rect_fixed(56, height, frame.area());

    frame.render_widget(Clear, area);

    let color = severity.color();
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(color)),
            Span::raw(" OK"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
