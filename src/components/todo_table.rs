//! To-Do Table Component

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::store::{use_todo_store, TodoStateStoreFields};

/// Table of rows in store order (initial load, then arrival order)
#[component]
pub fn TodoTable() -> impl IntoView {
    let store = use_todo_store();

    view! {
        <table id="todo-table" class="todo-table">
            <tr>
                <th>"Task"</th>
                <th>"Added"</th>
                <th>"Actions"</th>
            </tr>
            <For
                each=move || store.rows().get()
                key=|item| item.id
                children=move |item| view! { <TodoRow item=item /> }
            />
        </table>
    }
}
