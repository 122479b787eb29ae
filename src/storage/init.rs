//! Storage initialization
//!
//! Creates the expense table on first run. Safe to call on every startup.

use rusqlite::Connection;

use crate::error::ExpenseError;

/// Schema of the single expense table
pub const EXPENSES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT,
        category TEXT,
        amount INTEGER,
        description TEXT
    );
"#;

/// Ensure the expense table exists
pub fn initialize_schema(conn: &Connection) -> Result<(), ExpenseError> {
    conn.execute_batch(EXPENSES_SCHEMA)
        .map_err(|e| ExpenseError::Database(format!("Failed to create expense table: {}", e)))
}
