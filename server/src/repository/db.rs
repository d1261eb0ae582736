//! Database Connection and Setup
//!
//! Opens the SQLite database and runs migrations.

use rusqlite::Connection;
use std::path::Path;

use crate::domain::{DomainError, DomainResult};

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Open the database at `db_path` (`:memory:` for a private in-memory one)
pub fn init_db(db_path: &Path) -> DomainResult<Connection> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", db_path.display(), e)))?;

    run_migrations(&conn)?;
    tracing::debug!(path = %db_path.display(), "Database ready");

    Ok(conn)
}

/// Rowids are i64 in SQLite; entity ids are u32
pub(super) fn rowid_to_id(rowid: i64) -> DomainResult<u32> {
    u32::try_from(rowid)
        .map_err(|_| DomainError::Internal(format!("rowid {} does not fit an id", rowid)))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )",
        (),
    )
    .map_err(|e| DomainError::Internal(format!("Failed to create users: {}", e)))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            date_created TEXT NOT NULL
        )",
        (),
    )
    .map_err(|e| DomainError::Internal(format!("Failed to create todos: {}", e)))?;

    // Databases from before accounts existed: their tasks have no owner and stay hidden
    if !column_exists(conn, "todos", "user_id")? {
        conn.execute("ALTER TABLE todos ADD COLUMN user_id INTEGER REFERENCES users(id)", ())
            .map_err(|e| DomainError::Internal(format!("Failed to add user_id: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_user ON todos(user_id)",
        (),
    )?;

    Ok(())
}
