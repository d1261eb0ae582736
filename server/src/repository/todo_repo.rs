//! Todo Repository Implementation
//!
//! SQLite-backed implementation of Repository<Todo>, plus owner-scoped
//! queries used by the handlers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Todo};
use super::db::rowid_to_id;
use super::traits::Repository;

const SELECT_TODO: &str = "SELECT id, content, date_created, user_id FROM todos";

/// SQLite implementation of Todo repository
pub struct TodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TodoRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Tasks owned by `user_id`, in ID order
    pub async fn list_by_user(&self, user_id: u32) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!("{} WHERE user_id = ?1 ORDER BY id ASC", SELECT_TODO))?;
        let mut rows = stmt.query(params![user_id])?;

        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(row_to_todo(row)?);
        }
        Ok(todos)
    }

    /// A task only if `user_id` owns it
    pub async fn find_for_user(&self, id: u32, user_id: u32) -> DomainResult<Option<Todo>> {
        Ok(self.find_by_id(id).await?.filter(|t| t.user_id == user_id))
    }

    /// Delete a task owned by `user_id`; someone else's task is `NotFound`
    pub async fn delete_for_user(&self, id: u32, user_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "DELETE FROM todos WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("todo {}", id)));
        }

        Ok(())
    }
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    async fn create(&self, entity: &Todo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO todos (content, date_created, user_id) VALUES (?1, ?2, ?3)",
            params![entity.content, entity.date_created.to_rfc3339(), entity.user_id],
        )?;

        Ok(Todo {
            id: rowid_to_id(conn.last_insert_rowid())?,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Todo>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_TODO))?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_todo(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_TODO))?;
        let mut rows = stmt.query([])?;

        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(row_to_todo(row)?);
        }
        Ok(todos)
    }

    /// Only the content changes, and only while the owner matches
    async fn update(&self, entity: &Todo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE todos SET content = ?1 WHERE id = ?2 AND user_id = ?3",
            params![entity.content, entity.id, entity.user_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("todo {}", entity.id)));
        }

        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let changed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("todo {}", id)));
        }

        Ok(())
    }
}

fn row_to_todo(row: &rusqlite::Row) -> DomainResult<Todo> {
    let raw_date: String = row.get(2)?;
    let date_created = DateTime::parse_from_rfc3339(&raw_date)
        .map_err(|e| DomainError::Internal(format!("Bad date_created '{}': {}", raw_date, e)))?
        .with_timezone(&Utc);

    Ok(Todo {
        id: row.get(0)?,
        content: row.get(1)?,
        date_created,
        // Tasks from before accounts have no owner; 0 is never a user id
        user_id: row.get::<_, Option<u32>>(3)?.unwrap_or(0),
    })
}
