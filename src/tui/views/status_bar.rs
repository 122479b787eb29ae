//! Status bar view
//!
//! Shows the expense count, the latest status message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, FocusedPanel};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let count = app.controller.table().len();
    let mut spans = vec![Span::styled(
        format!(" {} expense(s) ", count),
        Style::default().fg(Color::White),
    )];

    spans.push(Span::raw("│ "));

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            message.text.clone(),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        let hints = match app.focused_panel {
            FocusedPanel::Table => "e:edit  u:update  d:delete  D:delete all  ?:help  q:quit",
            FocusedPanel::Form => "Enter:add  Tab:table  ?:help",
        };
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
