//! Todo Entity
//!
//! One task on the list.

use chrono::{DateTime, Utc};

use super::entity::{DomainError, DomainResult, Entity};

/// Longest content accepted, in characters
pub const MAX_CONTENT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    /// Assigned by the database; 0 until stored
    pub id: u32,
    pub content: String,
    pub date_created: DateTime<Utc>,
    /// Owning user
    pub user_id: u32,
}

impl Todo {
    /// New unsaved task for `user_id`, stamped with the current time
    pub fn new(content: String, user_id: u32) -> Self {
        Self {
            id: 0,
            content,
            date_created: Utc::now(),
            user_id,
        }
    }

    /// Date as shown in the table
    pub fn display_date(&self) -> String {
        self.date_created.format("%Y-%m-%d").to_string()
    }

    /// Empty content is allowed; only the length is bounded.
    pub fn validate_content(content: &str) -> DomainResult<()> {
        let chars = content.chars().count();
        if chars > MAX_CONTENT_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "content has {} characters, limit is {}",
                chars, MAX_CONTENT_CHARS
            )));
        }
        Ok(())
    }
}

impl Entity for Todo {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
