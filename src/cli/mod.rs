//! CLI command handlers
//!
//! Bridges the clap argument parsing with the interaction controller.

pub mod expense;

pub use expense::{
    handle_expense_command, run_prompts, AssumeYes, Confirm, ExpenseCommands, LineConfirm,
};
