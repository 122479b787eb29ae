//! TUI Views module
//!
//! The entry form, the expense table and the status bar, plus dispatch to
//! whichever dialog is open.

pub mod form;
pub mod status_bar;
pub mod table;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::dialogs::message::Severity;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    form::render(frame, app, layout.form);
    table::render(frame, app, layout.table);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Confirm(prompt) => dialogs::confirm::render(frame, prompt),
        ActiveDialog::Warning(notice) => {
            dialogs::message::render(frame, Severity::Warning, notice.title, notice.message)
        }
        ActiveDialog::Error(message) => {
            dialogs::message::render(frame, Severity::Error, "Error", message)
        }
        ActiveDialog::EditRow(state) => dialogs::edit_row::render(frame, state),
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::None => {}
    }
}
