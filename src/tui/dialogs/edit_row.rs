//! Row edit dialog
//!
//! Edits the displayed cells of the selected row in place. Nothing is written
//! to the database until the user runs an update on that row.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::presentation::{Column, ExpenseRow};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

const LABEL_WIDTH: usize = 11;

/// Editable columns in display order
pub const EDIT_COLUMNS: [Column; 4] = [
    Column::Date,
    Column::Category,
    Column::Amount,
    Column::Description,
];

/// What a key press did to the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Continue,
    Commit,
    Cancel,
}

/// State for the row edit dialog
#[derive(Debug, Clone)]
pub struct EditRowState {
    pub row: usize,
    pub id: String,
    pub inputs: [TextInput; 4],
    pub focused: usize,
}

impl EditRowState {
    pub fn from_row(row: usize, expense: &ExpenseRow) -> Self {
        let input = |column: Column| {
            TextInput::new()
                .label(column.title())
                .content(expense.cell(column))
        };
        Self {
            row,
            id: expense.cell(Column::Id).to_string(),
            inputs: EDIT_COLUMNS.map(input),
            focused: 0,
        }
    }

    /// Edited values paired with their columns
    pub fn values(&self) -> impl Iterator<Item = (Column, &str)> + '_ {
        EDIT_COLUMNS
            .iter()
            .copied()
            .zip(self.inputs.iter().map(TextInput::value))
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.inputs.len();
    }

    pub fn prev_field(&mut self) {
        self.focused = (self.focused + self.inputs.len() - 1) % self.inputs.len();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditAction {
        match key.code {
            KeyCode::Esc => return EditAction::Cancel,
            KeyCode::Enter => return EditAction::Commit,
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                return EditAction::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.prev_field();
                return EditAction::Continue;
            }
            _ => {}
        }

        let input = &mut self.inputs[self.focused];
        match key.code {
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Char(c) => input.insert(c),
            _ => {}
        }
        EditAction::Continue
    }
}

/// Render the row edit dialog
pub fn render(frame: &mut Frame, state: &EditRowState) {
    let area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Edit Expense {} ", state.id))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from("")];
    lines.extend(
        state
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| input.line(i == state.focused, LABEL_WIDTH)),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Apply  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
