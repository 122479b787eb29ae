//! Dialog modules for the TUI
//!
//! Modal dialogs drawn over the main screen

pub mod confirm;
pub mod edit_row;
pub mod help;
pub mod message;
