//! Typed state of the expense entry form

use std::fmt::Write;

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, ExpenseInput};

/// Values of the entry form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: String,
    pub description: String,
}

impl Default for ExpenseForm {
    /// Today's date, first category, empty text fields
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            category: Category::default(),
            amount: String::new(),
            description: String::new(),
        }
    }
}

impl ExpenseForm {
    /// Build the values to insert, rendering the date with `date_format`
    pub fn to_input(&self, date_format: &str) -> ExpenseResult<ExpenseInput> {
        Ok(ExpenseInput::new(
            format_date(self.date, date_format)?,
            self.category.name(),
            self.amount.clone(),
            self.description.clone(),
        ))
    }

    /// Put the form back to its defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Format a date, rejecting malformed strftime strings instead of panicking
pub fn format_date(date: NaiveDate, date_format: &str) -> ExpenseResult<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).map_err(|_| {
        ExpenseError::Config(format!("Invalid date format '{}'", date_format))
    })?;
    Ok(out)
}

/// Parse a date typed in `date_format`
pub fn parse_date(text: &str, date_format: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), date_format).map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid date '{}'. Expected format {}",
            text.trim(),
            date_format
        ))
    })
}
