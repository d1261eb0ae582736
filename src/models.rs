//! Frontend Models
//!
//! Data structures matching the server's JSON contract.

use serde::{Deserialize, Serialize};

/// One to-do entry as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    pub id: u32,
    pub content: String,
    /// Creation date, already formatted for display (YYYY-MM-DD)
    pub date: String,
}

/// Body of `POST /api/add`
#[derive(Debug, Serialize)]
pub struct AddTaskArgs<'a> {
    pub content: &'a str,
}

/// Receipt for `POST /api/add`, tagged on the `result` field.
///
/// Only `"success"` carries an item; any other marker is a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum AddTaskResponse {
    Success(ToDoItem),
    #[serde(other)]
    Rejected,
}
