//! Display-ready projection of the expense table
//!
//! [`ExpenseTable`] holds one [`ExpenseRow`] per stored expense, columns in
//! the fixed order `id, date, category, amount, description`. It is rebuilt
//! from scratch on every [`reload`](ExpenseTable::reload); there is no
//! incremental diffing, sorting or filtering.
//!
//! Cells other than the id can be edited in place. Such edits only touch the
//! displayed copy until an update is confirmed.

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId, ExpenseInput};
use crate::storage::ExpenseRepository;

/// Table columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Date,
    Category,
    Amount,
    Description,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Self::Id,
        Self::Date,
        Self::Category,
        Self::Amount,
        Self::Description,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Amount => "Amount",
            Self::Description => "Description",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether the displayed cell may be edited
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Id)
    }
}

/// One displayed row, cells as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    cells: [String; 5],
}

impl ExpenseRow {
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            cells: [
                expense.id.to_string(),
                expense.date.clone(),
                expense.category.clone(),
                expense.amount.clone(),
                expense.description.clone(),
            ],
        }
    }

    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    pub fn cells(&self) -> &[String; 5] {
        &self.cells
    }

    /// Id parsed from the first column
    pub fn id(&self) -> Option<ExpenseId> {
        self.cell(Column::Id).parse().ok()
    }

    /// The non-id cells as they are currently displayed
    pub fn input(&self) -> ExpenseInput {
        ExpenseInput::new(
            self.cell(Column::Date),
            self.cell(Column::Category),
            self.cell(Column::Amount),
            self.cell(Column::Description),
        )
    }
}

/// In-memory copy of all expenses plus the current selection
#[derive(Debug, Clone, Default)]
pub struct ExpenseTable {
    rows: Vec<ExpenseRow>,
    selected: Option<usize>,
}

impl ExpenseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all rows and the selection, then repopulate from storage
    pub fn reload(&mut self, repo: &ExpenseRepository<'_>) -> ExpenseResult<()> {
        self.rows.clear();
        self.selected = None;

        let expenses = repo.list_all()?;
        self.rows
            .extend(expenses.iter().map(ExpenseRow::from_expense));
        Ok(())
    }

    pub fn rows(&self) -> &[ExpenseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a row by index; out-of-range indexes clear the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.rows.len());
    }

    pub fn selected_row(&self) -> Option<&ExpenseRow> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    /// Move the selection down, selecting the first row if none is selected
    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.rows.len() - 1),
            None => 0,
        });
    }

    /// Move the selection up, selecting the first row if none is selected
    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Overwrite a displayed cell. Returns false for the id column or a bad row.
    pub fn set_cell(&mut self, row: usize, column: Column, value: impl Into<String>) -> bool {
        if !column.is_editable() {
            return false;
        }
        match self.rows.get_mut(row) {
            Some(r) => {
                r.cells[column.index()] = value.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn seeded() -> Storage {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();
        repo.insert(&ExpenseInput::new("01-01-2024", "Food", "25", "lunch"))
            .unwrap();
        repo.insert(&ExpenseInput::new("01-02-2024", "Rent", "900", ""))
            .unwrap();
        storage
    }

    #[test]
    fn test_reload_projects_columns_in_order() {
        let storage = seeded();
        let mut table = ExpenseTable::new();
        table.reload(&storage.expenses()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows()[0].cells(),
            &[
                "1".to_string(),
                "01-01-2024".to_string(),
                "Food".to_string(),
                "25".to_string(),
                "lunch".to_string()
            ]
        );
        assert_eq!(table.rows()[1].id(), Some(ExpenseId::new(2)));
    }

    #[test]
    fn test_reload_discards_edits_and_selection() {
        let storage = seeded();
        let mut table = ExpenseTable::new();
        table.reload(&storage.expenses()).unwrap();

        table.select(Some(1));
        assert!(table.set_cell(1, Column::Amount, "1000"));
        table.reload(&storage.expenses()).unwrap();

        assert_eq!(table.selected(), None);
        assert_eq!(table.rows()[1].cell(Column::Amount), "900");
    }

    #[test]
    fn test_id_cell_is_read_only() {
        let storage = seeded();
        let mut table = ExpenseTable::new();
        table.reload(&storage.expenses()).unwrap();

        assert!(!table.set_cell(0, Column::Id, "42"));
        assert!(!table.set_cell(9, Column::Date, "01-01-2025"));
        assert_eq!(table.rows()[0].id(), Some(ExpenseId::new(1)));
    }

    #[test]
    fn test_selection_movement() {
        let storage = seeded();
        let mut table = ExpenseTable::new();
        table.reload(&storage.expenses()).unwrap();

        assert!(table.selected_row().is_none());
        table.select_next();
        assert_eq!(table.selected(), Some(0));
        table.select_next();
        table.select_next();
        assert_eq!(table.selected(), Some(1));
        table.select_prev();
        table.select_prev();
        assert_eq!(table.selected(), Some(0));

        table.select(Some(5));
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn test_selection_on_empty_table() {
        let mut table = ExpenseTable::new();
        table.select_next();
        table.select_prev();
        assert_eq!(table.selected(), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_row_input_reflects_edits() {
        let storage = seeded();
        let mut table = ExpenseTable::new();
        table.reload(&storage.expenses()).unwrap();

        table.set_cell(0, Column::Description, "team lunch");
        let input = table.rows()[0].input();
        assert_eq!(input, ExpenseInput::new("01-01-2024", "Food", "25", "team lunch"));
    }
}
