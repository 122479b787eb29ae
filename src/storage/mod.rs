//! Storage layer for the expense tracker
//!
//! Owns the single SQLite connection for the lifetime of the process. The
//! connection is opened once at startup and closed when [`Storage`] drops.

pub mod expenses;
pub mod init;

pub use expenses::ExpenseRepository;
pub use init::initialize_schema;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::ExpenseError;

/// Owner of the database connection
pub struct Storage {
    path: Option<PathBuf>,
    conn: Connection,
}

impl Storage {
    /// Open (creating if absent) the database file and ensure the schema
    pub fn open(path: &Path) -> Result<Self, ExpenseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            ExpenseError::Database(format!("Failed to open {}: {}", path.display(), e))
        })?;
        initialize_schema(&conn)?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn,
        })
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, ExpenseError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { path: None, conn })
    }

    /// Database file path, `None` for in-memory storage
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Access the expense table
    pub fn expenses(&self) -> ExpenseRepository<'_> {
        ExpenseRepository::new(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseInput;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file_and_parents() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("data").join("expenses.db");

        let storage = Storage::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(storage.path(), Some(db_path.as_path()));
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("expenses.db");

        {
            let storage = Storage::open(&db_path).unwrap();
            storage
                .expenses()
                .insert(&ExpenseInput::new("01-01-2024", "Food", "25", "lunch"))
                .unwrap();
        }

        let storage = Storage::open(&db_path).unwrap();
        let all = storage.expenses().list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "lunch");
    }

    #[test]
    fn test_open_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Storage::open(temp_dir.path());
        assert!(matches!(result, Err(ExpenseError::Database(_))));
    }

    #[test]
    fn test_in_memory_has_no_path() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.path().is_none());
    }
}
