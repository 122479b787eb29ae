//! Expense Tracker - personal expense log backed by SQLite
//!
//! Each expense is a date, a category, an amount and a description stored as
//! one row in a local single-file database. The same operations are reachable
//! from an interactive terminal table and from scriptable subcommands.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense records, categories and ids
//! - `storage`: SQLite connection, schema and the expense repository
//! - `presentation`: Table model holding the displayed rows and selection
//! - `controller`: User actions and the confirmation state machine
//! - `display`: Plain-text formatting for the CLI
//! - `cli`: Subcommand handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expenses::models::ExpenseInput;
//! use expenses::storage::Storage;
//!
//! let storage = Storage::open_in_memory()?;
//! let id = storage
//!     .expenses()
//!     .insert(&ExpenseInput::new("01-01-2024", "Food", "25", "lunch"))?;
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod models;
pub mod presentation;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
