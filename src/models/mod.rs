//! Core data models for the expense tracker

pub mod category;
pub mod expense;
pub mod ids;

pub use category::Category;
pub use expense::{Expense, ExpenseInput};
pub use ids::ExpenseId;
