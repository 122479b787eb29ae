//! Expense model
//!
//! A single dated, categorized spending entry. Every field except the id is
//! kept as the text the user entered.

use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;

/// A stored expense row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: String,
    pub category: String,
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// The non-id fields of this expense
    pub fn input(&self) -> ExpenseInput {
        ExpenseInput {
            date: self.date.clone(),
            category: self.category.clone(),
            amount: self.amount.clone(),
            description: self.description.clone(),
        }
    }
}

/// Field values for an insert or an update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub date: String,
    pub category: String,
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl ExpenseInput {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
            description: description.into(),
        }
    }

    /// Attach an id, producing the row as it would be stored
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            description: self.description,
        }
    }
}
