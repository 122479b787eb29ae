//! Interaction controller
//!
//! Turns user actions into repository calls. Destructive actions go through
//! an explicit confirmation state machine:
//!
//! ```text
//! delete selected:  request -> Confirm -> delete_one -> reload
//! update selected:  request -> Confirm -> update     -> reload
//! delete all:       request -> Confirm -> Confirm    -> delete_all -> reload
//! ```
//!
//! Declining at any step clears the pending action without touching storage.
//! The controller knows nothing about the UI toolkit: callers pass typed form
//! values, drive the selection through [`ExpenseTable`], and render the
//! returned [`Outcome`].

pub mod form;

pub use form::ExpenseForm;

use crate::error::ExpenseResult;
use crate::models::{ExpenseId, ExpenseInput};
use crate::presentation::ExpenseTable;
use crate::storage::Storage;

/// A yes/no question shown before a destructive action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub message: &'static str,
}

/// A message the user must acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

pub const CONFIRM_DELETE: Prompt = Prompt {
    title: "Are you sure?",
    message: "Delete expense?",
};

pub const CONFIRM_UPDATE: Prompt = Prompt {
    title: "Are you sure?",
    message: "Update expense?",
};

pub const CONFIRM_DELETE_ALL: Prompt = Prompt {
    title: "Are you sure?",
    message: "Are you sure you want to delete all expenses?",
};

pub const CONFIRM_DELETE_ALL_AGAIN: Prompt = Prompt {
    title: "Really sure?",
    message: "This cannot be undone. Really delete every expense?",
};

pub const NO_ROW_FOR_DELETE: Notice = Notice {
    title: "No expense chosen",
    message: "Please choose an expense to delete",
};

pub const NO_ROW_FOR_UPDATE: Notice = Notice {
    title: "No expense chosen",
    message: "Please choose an expense to update",
};

/// Action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteOne(ExpenseId),
    Update(ExpenseId, ExpenseInput),
    DeleteAllFirst,
    DeleteAllSecond,
}

impl PendingAction {
    /// The question to ask for this step
    pub fn prompt(&self) -> Prompt {
        match self {
            Self::DeleteOne(_) => CONFIRM_DELETE,
            Self::Update(..) => CONFIRM_UPDATE,
            Self::DeleteAllFirst => CONFIRM_DELETE_ALL,
            Self::DeleteAllSecond => CONFIRM_DELETE_ALL_AGAIN,
        }
    }
}

/// Result of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Storage changed and the table was reloaded
    Applied(String),
    /// Ask the user, then call `confirm` or `decline`
    Confirm(Prompt),
    /// Precondition failed; nothing changed
    Warning(Notice),
    /// The user declined; nothing changed
    Cancelled,
}

/// Binds user actions to the expense repository and the table model
pub struct Controller<'a> {
    storage: &'a Storage,
    table: ExpenseTable,
    pending: Option<PendingAction>,
    date_format: String,
}

impl<'a> Controller<'a> {
    /// Create a controller and load the table
    pub fn new(storage: &'a Storage, date_format: impl Into<String>) -> ExpenseResult<Self> {
        let mut controller = Self {
            storage,
            table: ExpenseTable::new(),
            pending: None,
            date_format: date_format.into(),
        };
        controller.refresh()?;
        Ok(controller)
    }

    pub fn table(&self) -> &ExpenseTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ExpenseTable {
        &mut self.table
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Rebuild the table from storage
    pub fn refresh(&mut self) -> ExpenseResult<()> {
        self.table.reload(&self.storage.expenses())
    }

    /// Insert the form values, reset the form, reload
    pub fn add(&mut self, form: &mut ExpenseForm) -> ExpenseResult<Outcome> {
        self.pending = None;
        let input = form.to_input(&self.date_format)?;
        let id = self.storage.expenses().insert(&input)?;

        form.reset();
        self.refresh()?;
        Ok(Outcome::Applied(format!("Expense {} added", id)))
    }

    /// Ask to delete the selected row
    pub fn request_delete(&mut self) -> Outcome {
        self.pending = None;
        match self.table.selected_row().and_then(|row| row.id()) {
            Some(id) => self.ask(PendingAction::DeleteOne(id)),
            None => Outcome::Warning(NO_ROW_FOR_DELETE),
        }
    }

    /// Ask to persist the selected row as it is currently displayed
    pub fn request_update(&mut self) -> Outcome {
        self.pending = None;
        let row = self
            .table
            .selected_row()
            .and_then(|row| row.id().map(|id| (id, row.input())));
        match row {
            Some((id, input)) => self.ask(PendingAction::Update(id, input)),
            None => Outcome::Warning(NO_ROW_FOR_UPDATE),
        }
    }

    /// Start the two-step delete-all confirmation
    pub fn request_delete_all(&mut self) -> Outcome {
        self.ask(PendingAction::DeleteAllFirst)
    }

    /// The user said yes to the current prompt
    pub fn confirm(&mut self) -> ExpenseResult<Outcome> {
        let Some(action) = self.pending.take() else {
            return Ok(Outcome::Cancelled);
        };

        let storage = self.storage;
        let repo = storage.expenses();
        let message = match action {
            PendingAction::DeleteAllFirst => return Ok(self.ask(PendingAction::DeleteAllSecond)),
            PendingAction::DeleteOne(id) => {
                repo.delete_one(id)?;
                format!("Expense {} deleted", id)
            }
            PendingAction::Update(id, input) => {
                repo.update(id, &input)?;
                format!("Expense {} updated", id)
            }
            PendingAction::DeleteAllSecond => {
                let removed = repo.delete_all()?;
                format!("Deleted {} expense(s)", removed)
            }
        };

        self.refresh()?;
        Ok(Outcome::Applied(message))
    }

    /// The user said no to the current prompt
    pub fn decline(&mut self) -> Outcome {
        self.pending = None;
        Outcome::Cancelled
    }

    fn ask(&mut self, action: PendingAction) -> Outcome {
        let prompt = action.prompt();
        self.pending = Some(action);
        Outcome::Confirm(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense};
    use crate::presentation::Column;
    use chrono::NaiveDate;

    const FORMAT: &str = "%m-%d-%Y";

    fn form(day: u32, category: Category, amount: &str, description: &str) -> ExpenseForm {
        ExpenseForm {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            category,
            amount: amount.into(),
            description: description.into(),
        }
    }

    fn stored(storage: &Storage) -> Vec<Expense> {
        storage.expenses().list_all().unwrap()
    }

    fn seeded(storage: &Storage) -> Controller<'_> {
        let mut controller = Controller::new(storage, FORMAT).unwrap();
        controller
            .add(&mut form(1, Category::Food, "25", "lunch"))
            .unwrap();
        controller
            .add(&mut form(2, Category::Rent, "900", "january"))
            .unwrap();
        controller
    }

    #[test]
    fn test_add_inserts_resets_and_reloads() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = Controller::new(&storage, FORMAT).unwrap();
        let mut entry = form(1, Category::Food, "25", "lunch");

        let outcome = controller.add(&mut entry).unwrap();

        assert!(matches!(outcome, Outcome::Applied(_)));
        assert_eq!(entry, ExpenseForm::default());
        assert_eq!(controller.table().len(), 1);
        assert_eq!(
            stored(&storage),
            vec![ExpenseInput::new("01-01-2024", "Food", "25", "lunch").with_id(ExpenseId::new(1))]
        );
    }

    #[test]
    fn test_delete_without_selection_warns() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let before = stored(&storage);

        assert_eq!(controller.request_delete(), Outcome::Warning(NO_ROW_FOR_DELETE));
        assert!(controller.pending().is_none());
        assert_eq!(stored(&storage), before);
    }

    #[test]
    fn test_update_without_selection_warns() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);

        assert_eq!(controller.request_update(), Outcome::Warning(NO_ROW_FOR_UPDATE));
        assert!(controller.pending().is_none());
    }

    #[test]
    fn test_delete_selected_after_confirm() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let second = stored(&storage)[1].clone();

        controller.table_mut().select(Some(0));
        assert_eq!(controller.request_delete(), Outcome::Confirm(CONFIRM_DELETE));
        assert!(matches!(controller.confirm().unwrap(), Outcome::Applied(_)));

        assert_eq!(stored(&storage), vec![second]);
        assert_eq!(controller.table().len(), 1);
        assert_eq!(controller.table().selected(), None);
    }

    #[test]
    fn test_delete_declined_changes_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let before = stored(&storage);

        controller.table_mut().select(Some(1));
        controller.request_delete();
        assert_eq!(controller.decline(), Outcome::Cancelled);

        assert_eq!(stored(&storage), before);
        assert!(controller.pending().is_none());
        // A stray confirm after declining does nothing
        assert_eq!(controller.confirm().unwrap(), Outcome::Cancelled);
        assert_eq!(stored(&storage), before);
    }

    #[test]
    fn test_update_persists_displayed_row_not_form() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let first = stored(&storage)[0].clone();

        controller.table_mut().select(Some(1));
        controller
            .table_mut()
            .set_cell(1, Column::Amount, "950");

        assert_eq!(controller.request_update(), Outcome::Confirm(CONFIRM_UPDATE));
        controller.confirm().unwrap();

        let after = stored(&storage);
        assert_eq!(after[0], first);
        assert_eq!(after[1].amount, "950");
        assert_eq!(after[1].description, "january");
    }

    #[test]
    fn test_update_declined_keeps_storage() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let before = stored(&storage);

        controller.table_mut().select(Some(0));
        controller.table_mut().set_cell(0, Column::Category, "Other");
        controller.request_update();
        controller.decline();

        assert_eq!(stored(&storage), before);
    }

    #[test]
    fn test_delete_all_needs_two_confirmations() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);

        assert_eq!(controller.request_delete_all(), Outcome::Confirm(CONFIRM_DELETE_ALL));
        assert_eq!(
            controller.confirm().unwrap(),
            Outcome::Confirm(CONFIRM_DELETE_ALL_AGAIN)
        );
        assert_eq!(stored(&storage).len(), 2);

        assert!(matches!(controller.confirm().unwrap(), Outcome::Applied(_)));
        assert!(stored(&storage).is_empty());
        assert!(controller.table().is_empty());
    }

    #[test]
    fn test_delete_all_declined_at_first_stage() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let before = stored(&storage);

        controller.request_delete_all();
        controller.decline();

        assert_eq!(stored(&storage), before);
    }

    #[test]
    fn test_delete_all_declined_at_second_stage() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);
        let before = stored(&storage);

        controller.request_delete_all();
        controller.confirm().unwrap();
        assert_eq!(controller.pending(), Some(&PendingAction::DeleteAllSecond));
        assert_eq!(controller.decline(), Outcome::Cancelled);

        assert_eq!(stored(&storage), before);
        assert_eq!(controller.table().len(), 2);
    }

    #[test]
    fn test_delete_of_vanished_row_is_silent() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);

        controller.table_mut().select(Some(0));
        controller.request_delete();
        // Row removed behind the controller's back
        storage.expenses().delete_one(ExpenseId::new(1)).unwrap();

        assert!(matches!(controller.confirm().unwrap(), Outcome::Applied(_)));
        assert_eq!(stored(&storage).len(), 1);
    }

    #[test]
    fn test_new_request_replaces_pending() {
        let storage = Storage::open_in_memory().unwrap();
        let mut controller = seeded(&storage);

        controller.request_delete_all();
        controller.table_mut().select(Some(0));
        controller.request_delete();

        assert_eq!(
            controller.pending(),
            Some(&PendingAction::DeleteOne(ExpenseId::new(1)))
        );
    }
}
