//! Expense table view
//!
//! Shows every stored expense with the selected row highlighted.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::presentation::{Column, ExpenseRow};
use crate::tui::app::{App, FocusedPanel};

/// Render the expense table
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Table;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let table_model = app.controller.table();
    let block = Block::default()
        .title(format!(" Expenses ({}) ", table_model.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if table_model.is_empty() {
        let text = Paragraph::new(Span::styled(
            "No expenses yet. Press Tab to add one.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(6),  // Id
        Constraint::Length(12), // Date
        Constraint::Length(16), // Category
        Constraint::Length(12), // Amount
        Constraint::Min(10),    // Description
    ];

    let header = Row::new(Column::ALL.iter().map(|c| {
        Cell::from(c.title()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let rows: Vec<Row> = table_model.rows().iter().map(expense_row).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(table_model.selected());

    frame.render_stateful_widget(table, area, &mut state);
}

fn expense_row(row: &ExpenseRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(row.cell(Column::Id).to_string()).style(Style::default().fg(Color::DarkGray)),
        Cell::from(row.cell(Column::Date).to_string()),
        Cell::from(row.cell(Column::Category).to_string()).style(Style::default().fg(Color::Cyan)),
        Cell::from(row.cell(Column::Amount).to_string()).style(Style::default().fg(Color::Green)),
        Cell::from(row.cell(Column::Description).to_string()),
    ])
}
