//! Expense display formatting
//!
//! Formats the presentation table for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;
use crate::presentation::{Column, ExpenseRow};

#[derive(Tabled)]
struct ExpenseLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ExpenseRow> for ExpenseLine {
    fn from(row: &ExpenseRow) -> Self {
        Self {
            id: row.cell(Column::Id).to_string(),
            date: row.cell(Column::Date).to_string(),
            category: row.cell(Column::Category).to_string(),
            amount: row.cell(Column::Amount).to_string(),
            description: row.cell(Column::Description).to_string(),
        }
    }
}

/// Format the expense table
pub fn format_expense_table(rows: &[ExpenseRow]) -> String {
    if rows.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let mut table = Table::new(rows.iter().map(ExpenseLine::from));
    table.with(Style::psql());
    table.to_string()
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Amount:      {}\n", expense.amount));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }

    output
}
