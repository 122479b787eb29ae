//! Expense entry form
//!
//! Date, category, amount and description fields. The date field doubles as
//! a picker: `[` and `]` step one day back or forward.

use chrono::Duration;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller::form::{format_date, parse_date};
use crate::controller::ExpenseForm;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Category;
use crate::tui::app::{App, FocusedPanel};
use crate::tui::widgets::TextInput;

const LABEL_WIDTH: usize = 11;

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Date,
    Category,
    Amount,
    Description,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Category,
            Self::Category => Self::Amount,
            Self::Amount => Self::Description,
            Self::Description => Self::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Description,
            Self::Category => Self::Date,
            Self::Amount => Self::Category,
            Self::Description => Self::Amount,
        }
    }
}

/// Editable state behind the entry form
#[derive(Debug, Clone)]
pub struct EntryFormState {
    pub focused: FormField,
    pub date: TextInput,
    pub category: Category,
    pub amount: TextInput,
    pub description: TextInput,
}

impl EntryFormState {
    /// Load widget state from typed form values
    pub fn from_form(form: &ExpenseForm, date_format: &str) -> ExpenseResult<Self> {
        Ok(Self {
            focused: FormField::default(),
            date: TextInput::new()
                .label("Date")
                .content(format_date(form.date, date_format)?),
            category: form.category,
            amount: TextInput::new()
                .label("Amount")
                .placeholder("0")
                .content(form.amount.clone()),
            description: TextInput::new()
                .label("Description")
                .placeholder("What was it for?")
                .content(form.description.clone()),
        })
    }

    /// Read typed form values back, validating the date
    pub fn to_form(&self, date_format: &str) -> ExpenseResult<ExpenseForm> {
        Ok(ExpenseForm {
            date: parse_date(self.date.value(), date_format)?,
            category: self.category,
            amount: self.amount.value().to_string(),
            description: self.description.value().to_string(),
        })
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
    }

    /// The text input under focus; the category selector has none
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            FormField::Date => Some(&mut self.date),
            FormField::Category => None,
            FormField::Amount => Some(&mut self.amount),
            FormField::Description => Some(&mut self.description),
        }
    }

    /// Move the date by `days`, rejecting steps past the calendar's range
    pub fn shift_date(&mut self, days: i64, date_format: &str) -> ExpenseResult<()> {
        let date = parse_date(self.date.value(), date_format)?
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| {
                ExpenseError::Validation(format!(
                    "Cannot move {} by {} day(s)",
                    self.date.value(),
                    days
                ))
            })?;
        self.date.set_value(format_date(date, date_format)?);
        Ok(())
    }
}

/// Render the entry form
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Form;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" New Expense ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let form = &app.form;
    let focus = |field: FormField| is_focused && form.focused == field;

    let lines = vec![
        form.date.line(focus(FormField::Date), LABEL_WIDTH),
        category_line(form.category, focus(FormField::Category)),
        form.amount.line(focus(FormField::Amount), LABEL_WIDTH),
        form.description.line(focus(FormField::Description), LABEL_WIDTH),
        hint_line(is_focused),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn category_line(category: Category, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Yellow)
    };

    Line::from(vec![
        Span::styled(
            format!("{:>width$}: ", "Category", width = LABEL_WIDTH),
            label_style,
        ),
        Span::styled(format!("< {} >", category), value_style),
    ])
}

fn hint_line(is_focused: bool) -> Line<'static> {
    if !is_focused {
        return Line::from(Span::styled(
            "Tab to enter a new expense",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Add  "),
        Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" Field  "),
        Span::styled("[ ]", Style::default().fg(Color::Yellow)),
        Span::raw(" Day  "),
        Span::styled("[←→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Category  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Table"),
    ])
}
