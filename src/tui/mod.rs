//! Terminal User Interface module
//!
//! An entry form above a table of every stored expense. Destructive actions
//! open a confirmation dialog before anything is written.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

// Keybindings
pub mod keybindings;

pub use app::App;
pub use terminal::run_tui;
