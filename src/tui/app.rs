//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Every storage action goes through the [`Controller`]; its [`Outcome`] is
//! turned into a dialog or a status message here.

use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::controller::{Controller, ExpenseForm, Notice, Outcome, Prompt};
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Storage;

use super::dialogs::edit_row::EditRowState;
use super::views::form::EntryFormState;

/// How long a status message stays visible
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

pub const NO_ROW_FOR_EDIT: Notice = Notice {
    title: "No expense chosen",
    message: "Please choose an expense to edit",
};

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    Form,
    #[default]
    Table,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone)]
pub enum ActiveDialog {
    None,
    Confirm(Prompt),
    Warning(Notice),
    Error(String),
    EditRow(EditRowState),
    Help,
}

/// Transient message in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub shown_at: Instant,
}

/// Main application state
pub struct App<'a> {
    pub controller: Controller<'a>,
    pub form: EntryFormState,
    pub focused_panel: FocusedPanel,
    pub active_dialog: ActiveDialog,
    pub status_message: Option<StatusMessage>,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create the app and load all expenses
    pub fn new(storage: &'a Storage, settings: &Settings) -> ExpenseResult<Self> {
        let controller = Controller::new(storage, settings.date_format.clone())?;
        let form = EntryFormState::from_form(&ExpenseForm::default(), controller.date_format())?;
        Ok(Self {
            controller,
            form,
            focused_panel: FocusedPanel::default(),
            active_dialog: ActiveDialog::None,
            status_message: None,
            should_quit: false,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drop the status message once it is older than [`STATUS_TIMEOUT`]
    pub fn expire_status(&mut self, now: Instant) {
        let expired = self
            .status_message
            .as_ref()
            .is_some_and(|m| now.saturating_duration_since(m.shown_at) >= STATUS_TIMEOUT);
        if expired {
            self.status_message = None;
        }
    }

    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Form => FocusedPanel::Table,
            FocusedPanel::Table => FocusedPanel::Form,
        };
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Show a controller result to the user
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Applied(message) => {
                self.close_dialog();
                self.set_status(message);
            }
            Outcome::Confirm(prompt) => self.open_dialog(ActiveDialog::Confirm(prompt)),
            Outcome::Warning(notice) => self.open_dialog(ActiveDialog::Warning(notice)),
            Outcome::Cancelled => {
                self.close_dialog();
                self.set_status("Cancelled");
            }
        }
    }

    /// Show an error dialog
    pub fn show_error(&mut self, error: &ExpenseError) {
        self.open_dialog(ActiveDialog::Error(error.to_string()));
    }

    fn apply_result(&mut self, result: ExpenseResult<Outcome>) {
        match result {
            Ok(outcome) => self.apply(outcome),
            Err(e) => self.show_error(&e),
        }
    }

    /// Insert the entry form as a new expense
    pub fn submit_form(&mut self) {
        let result = self.try_submit_form();
        self.apply_result(result);
    }

    fn try_submit_form(&mut self) -> ExpenseResult<Outcome> {
        let mut form = self.form.to_form(self.controller.date_format())?;
        let outcome = self.controller.add(&mut form)?;

        let focused = self.form.focused;
        self.form = EntryFormState::from_form(&form, self.controller.date_format())?;
        self.form.focused = focused;

        let last = self.controller.table().len().checked_sub(1);
        self.controller.table_mut().select(last);
        Ok(outcome)
    }

    /// Shift the entry form date, reporting a malformed date in the status bar
    pub fn shift_form_date(&mut self, days: i64) {
        let format = self.controller.date_format().to_string();
        if let Err(e) = self.form.shift_date(days, &format) {
            self.set_status(e.to_string());
        }
    }

    pub fn request_delete(&mut self) {
        let outcome = self.controller.request_delete();
        self.apply(outcome);
    }

    pub fn request_update(&mut self) {
        let outcome = self.controller.request_update();
        self.apply(outcome);
    }

    pub fn request_delete_all(&mut self) {
        let outcome = self.controller.request_delete_all();
        self.apply(outcome);
    }

    /// Answer yes to the open confirmation
    pub fn confirm(&mut self) {
        let result = self.controller.confirm();
        self.apply_result(result);
    }

    /// Answer no to the open confirmation
    pub fn decline(&mut self) {
        let outcome = self.controller.decline();
        self.apply(outcome);
    }

    /// Reload the table from storage
    pub fn refresh(&mut self) {
        match self.controller.refresh() {
            Ok(()) => self.set_status("Reloaded"),
            Err(e) => self.show_error(&e),
        }
    }

    /// Open the row editor on the selected row
    pub fn begin_edit_row(&mut self) {
        let table = self.controller.table();
        let state = table
            .selected()
            .zip(table.selected_row())
            .map(|(index, row)| EditRowState::from_row(index, row));
        match state {
            Some(state) => self.open_dialog(ActiveDialog::EditRow(state)),
            None => self.open_dialog(ActiveDialog::Warning(NO_ROW_FOR_EDIT)),
        }
    }

    /// Write edited cells into the displayed row
    pub fn commit_edit_row(&mut self, state: &EditRowState) {
        let table = self.controller.table_mut();
        for (column, value) in state.values() {
            table.set_cell(state.row, column, value);
        }
        self.close_dialog();
        self.set_status(format!("Row {} edited. Press u to save it", state.id));
    }
}
