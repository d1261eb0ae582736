//! Submission Outcome
//!
//! Pure part of the submit handler: what a receipt does to the table rows.

use crate::models::{AddTaskResponse, ToDoItem};

/// Result of applying one receipt to the row list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A row was appended at the end of the table
    Appended(ToDoItem),
    /// Accepted, but the initial load already showed this id
    AlreadyListed(ToDoItem),
    /// Nothing changed
    Ignored,
}

impl SubmitOutcome {
    /// The input field is cleared only after the server accepted the item
    pub fn clears_input(&self) -> bool {
        matches!(self, SubmitOutcome::Appended(_) | SubmitOutcome::AlreadyListed(_))
    }
}

/// Apply a receipt in arrival order. Ids already shown are not appended twice.
pub fn apply_receipt(rows: &mut Vec<ToDoItem>, receipt: AddTaskResponse) -> SubmitOutcome {
    match receipt {
        AddTaskResponse::Success(item) if rows.iter().any(|r| r.id == item.id) => {
            SubmitOutcome::AlreadyListed(item)
        }
        AddTaskResponse::Success(item) => {
            rows.push(item.clone());
            SubmitOutcome::Appended(item)
        }
        AddTaskResponse::Rejected => SubmitOutcome::Ignored,
    }
}

/// Merge the initial load into rows that submissions may already have appended.
///
/// Loaded rows come first, in load order; appended rows the load did not
/// include keep their arrival order after them.
pub fn merge_loaded(rows: &mut Vec<ToDoItem>, loaded: Vec<ToDoItem>) {
    let appended: Vec<ToDoItem> = rows
        .drain(..)
        .filter(|r| !loaded.iter().any(|l| l.id == r.id))
        .collect();
    rows.extend(loaded);
    rows.extend(appended);
}

pub fn delete_href(id: u32) -> String {
    format!("/delete/{}", id)
}

pub fn update_href(id: u32) -> String {
    format!("/update/{}", id)
}
