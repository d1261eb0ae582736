//! User Repository
//!
//! Handles account storage and lookup.

use rusqlite::{params, Connection, ErrorCode};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, User};
use super::db::rowid_to_id;

pub struct UserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Store a new user; a taken username is a `Conflict`
    pub async fn create(&self, user: &User) -> DomainResult<User> {
        let conn = self.conn.lock().await;

        let inserted = conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![user.username, user.password_hash],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(DomainError::Conflict(format!("username '{}' already exists", user.username)));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(User {
            id: rowid_to_id(conn.last_insert_rowid())?,
            ..user.clone()
        })
    }

    pub async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare("SELECT id, username, password_hash FROM users WHERE username = ?1")?;
        let mut rows = stmt.query(params![username])?;

        match rows.next()? {
            Some(row) => Ok(Some(User {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
            })),
            None => Ok(None),
        }
    }
}
