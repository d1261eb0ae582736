//! To-Do Form Component
//!
//! The submit handler: posts the input's text and appends the receipt as a row.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::store::{store_apply_receipt, use_todo_store};
use crate::submission::SubmitOutcome;

/// Form with the `content` input; rows go to the store
#[component]
pub fn TodoForm() -> impl IntoView {
    let store = use_todo_store();

    let (content, set_content) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        // No client-side guard: empty text is sent too
        let text = content.get_untracked();

        spawn_local(async move {
            match api::add_task(&text).await {
                Ok(receipt) => {
                    let outcome = store_apply_receipt(&store, receipt);
                    if outcome.clears_input() {
                        set_content.set(String::new());
                    }
                    match outcome {
                        SubmitOutcome::Appended(item) => {
                            web_sys::console::log_1(&format!("[TodoForm] Added item {}", item.id).into());
                        }
                        SubmitOutcome::AlreadyListed(item) => {
                            web_sys::console::log_1(&format!("[TodoForm] Item {} already listed", item.id).into());
                        }
                        SubmitOutcome::Ignored => {
                            web_sys::console::warn_1(&"[TodoForm] Server rejected the item".into());
                        }
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[TodoForm] Add failed: {}", e).into());
                }
            }
        });
    };

    view! {
        <form id="todo-form" class="todo-form" on:submit=submit>
            <input
                type="text"
                id="content"
                name="content"
                placeholder="Add new task..."
                prop:value=move || content.get()
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        set_content.set(input.value());
                    }
                }
            />
            <button type="submit">"Add Task"</button>
        </form>
    }
}
