//! Expense repository
//!
//! Parameterized statements against the expense table. The repository borrows
//! the connection owned by [`Storage`](super::Storage).

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId, ExpenseInput};

const SELECT_COLUMNS: &str = "SELECT id, date, category, amount, description FROM expenses";

/// Data access for expense rows
pub struct ExpenseRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ExpenseRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Every expense, ordered by id
    pub fn list_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;

        let expenses = stmt
            .query_map([], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Get a single expense by id
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let expense = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.get()],
                expense_from_row,
            )
            .optional()?;

        Ok(expense)
    }

    /// Number of stored expenses
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Append an expense; storage assigns the id
    pub fn insert(&self, input: &ExpenseInput) -> Result<ExpenseId, ExpenseError> {
        self.conn.execute(
            r#"
            INSERT INTO expenses (date, category, amount, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                &input.date,
                &input.category,
                &input.amount,
                &input.description
            ],
        )?;

        Ok(ExpenseId::new(self.conn.last_insert_rowid()))
    }

    /// Overwrite every non-id field of the matching row
    ///
    /// Returns the number of rows changed; 0 when the id does not exist.
    pub fn update(&self, id: ExpenseId, input: &ExpenseInput) -> Result<usize, ExpenseError> {
        let changed = self.conn.execute(
            r#"
            UPDATE expenses
            SET date = ?1, category = ?2, amount = ?3, description = ?4
            WHERE id = ?5
            "#,
            params![
                &input.date,
                &input.category,
                &input.amount,
                &input.description,
                id.get()
            ],
        )?;

        Ok(changed)
    }

    /// Remove the matching row; 0 when the id does not exist
    pub fn delete_one(&self, id: ExpenseId) -> Result<usize, ExpenseError> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.get()])?;
        Ok(changed)
    }

    /// Remove every row
    pub fn delete_all(&self) -> Result<usize, ExpenseError> {
        let changed = self.conn.execute("DELETE FROM expenses", [])?;
        Ok(changed)
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: ExpenseId::new(row.get(0)?),
        date: text_column(row, 1)?,
        category: text_column(row, 2)?,
        amount: text_column(row, 3)?,
        description: text_column(row, 4)?,
    })
}

/// Read any stored value back as text.
///
/// `amount` has INTEGER affinity, so "25" comes back as an integer and "2.5"
/// as a real.
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn lunch() -> ExpenseInput {
        ExpenseInput::new("01-01-2024", "Food", "25", "lunch")
    }

    fn rent() -> ExpenseInput {
        ExpenseInput::new("01-02-2024", "Rent", "900", "")
    }

    #[test]
    fn test_insert_then_list() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        let id = repo.insert(&lunch()).unwrap();
        let all = repo.list_all().unwrap();

        assert_eq!(id, ExpenseId::new(1));
        assert_eq!(all, vec![lunch().with_id(ExpenseId::new(1))]);
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        let first = repo.insert(&lunch()).unwrap();
        let second = repo.insert(&lunch()).unwrap();

        assert_ne!(first, second);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        repo.insert(&lunch()).unwrap();
        let second = repo.insert(&rent()).unwrap();
        repo.delete_one(second).unwrap();
        let third = repo.insert(&rent()).unwrap();

        assert!(third > second);
    }

    #[test]
    fn test_update_changes_only_matching_row() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        let a = repo.insert(&lunch()).unwrap();
        let b = repo.insert(&rent()).unwrap();

        let edited = ExpenseInput::new("01-03-2024", "Health", "40", "pharmacy");
        assert_eq!(repo.update(b, &edited).unwrap(), 1);

        assert_eq!(repo.get(a).unwrap(), Some(lunch().with_id(a)));
        assert_eq!(repo.get(b).unwrap(), Some(edited.with_id(b)));
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();
        repo.insert(&lunch()).unwrap();

        assert_eq!(repo.update(ExpenseId::new(99), &rent()).unwrap(), 0);
        assert_eq!(repo.list_all().unwrap(), vec![lunch().with_id(ExpenseId::new(1))]);
    }

    #[test]
    fn test_delete_one_removes_only_that_row() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        let first = repo.insert(&lunch()).unwrap();
        let second = repo.insert(&rent()).unwrap();

        assert_eq!(repo.delete_one(first).unwrap(), 1);
        assert_eq!(repo.list_all().unwrap(), vec![rent().with_id(second)]);

        // Repeating is a no-op
        assert_eq!(repo.delete_one(first).unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_all_empties_table() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        repo.insert(&lunch()).unwrap();
        repo.insert(&rent()).unwrap();

        assert_eq!(repo.delete_all().unwrap(), 2);
        assert!(repo.list_all().unwrap().is_empty());
        assert_eq!(repo.delete_all().unwrap(), 0);
    }

    #[test]
    fn test_amount_read_back_as_text() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        let whole = repo.insert(&ExpenseInput::new("01-01-2024", "Food", "12", "")).unwrap();
        let fraction = repo.insert(&ExpenseInput::new("01-01-2024", "Food", "2.5", "")).unwrap();
        let words = repo.insert(&ExpenseInput::new("01-01-2024", "Food", "a lot", "")).unwrap();
        let empty = repo.insert(&ExpenseInput::new("01-01-2024", "Food", "", "")).unwrap();

        assert_eq!(repo.get(whole).unwrap().unwrap().amount, "12");
        assert_eq!(repo.get(fraction).unwrap().unwrap().amount, "2.5");
        assert_eq!(repo.get(words).unwrap().unwrap().amount, "a lot");
        assert_eq!(repo.get(empty).unwrap().unwrap().amount, "");
    }

    #[test]
    fn test_values_are_bound_not_interpolated() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();

        let sneaky = ExpenseInput::new("01-01-2024", "Food", "1", "'); DROP TABLE expenses; --");
        let id = repo.insert(&sneaky).unwrap();

        assert_eq!(repo.get(id).unwrap(), Some(sneaky.with_id(id)));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.expenses().get(ExpenseId::new(5)).unwrap(), None);
    }
}
