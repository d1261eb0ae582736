//! To-Do Row Component
//!
//! Three cells: content, date, and the delete/update links.

use leptos::prelude::*;

use crate::models::ToDoItem;
use crate::submission::{delete_href, update_href};

#[component]
pub fn TodoRow(item: ToDoItem) -> impl IntoView {
    // Content is rendered as text, never as markup
    view! {
        <tr>
            <td>{item.content}</td>
            <td>{item.date}</td>
            <td>
                <a href=delete_href(item.id)>"Delete"</a>
                " "
                <br />
                " "
                <a href=update_href(item.id)>"Update"</a>
            </td>
        </tr>
    }
}
