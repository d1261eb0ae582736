//! To-Do Frontend App
//!
//! Provides the row store, loads the user's existing tasks once, and lays out
//! account links, table and form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{TodoForm, TodoTable};
use crate::store::{store_merge_loaded, TodoState};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(TodoState::default());
    provide_context(store);

    // Load existing tasks on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_tasks().await {
                Ok(loaded) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} tasks", loaded.len()).into());
                    store_merge_loaded(&store, loaded);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[APP] Loading tasks failed: {}", e).into());
                }
            }
        });
    });

    view! {
        <main class="content">
            <nav>
                <a href="/login">"Log In"</a>
                " | "
                <a href="/register">"Register"</a>
                " | "
                <a href="/logout">"Log Out"</a>
            </nav>
            <h1>"Task Master"</h1>
            <TodoTable />
            <TodoForm />
        </main>
    }
}
