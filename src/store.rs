//! Row Store
//!
//! Uses Leptos reactive_stores for the rows backing the to-do table.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{AddTaskResponse, ToDoItem};
use crate::submission::{apply_receipt, merge_loaded, SubmitOutcome};

/// Client state: only the rows currently shown
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    pub rows: Vec<ToDoItem>,
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

/// Merge the initial load, keeping rows appended while it was in flight
pub fn store_merge_loaded(store: &TodoStore, loaded: Vec<ToDoItem>) {
    merge_loaded(&mut store.rows().write(), loaded);
}

/// Append the receipt's item, if any
pub fn store_apply_receipt(store: &TodoStore, receipt: AddTaskResponse) -> SubmitOutcome {
    apply_receipt(&mut store.rows().write(), receipt)
}
