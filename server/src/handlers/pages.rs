//! Row Action Handlers
//!
//! Targets of the Delete/Update links in each table row. These answer HTML or
//! redirects, not JSON. Without a session they send the browser to `/login`;
//! another user's task looks the same as a missing one.

use actix_session::Session;
use actix_web::{get, post, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::domain::{DomainError, Todo};
use crate::repository::Repository;
use crate::AppState;
use super::auth::{current_user, redirect_to};
use super::status_for;

#[derive(Template)]
#[template(path = "update.html")]
struct UpdateTemplate {
    id: u32,
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub content: String,
}

fn page_error(err: &DomainError) -> HttpResponse {
    HttpResponse::build(status_for(err))
        .content_type("text/plain; charset=utf-8")
        .body(err.to_string())
}

#[get("/delete/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<u32>,
) -> HttpResponse {
    let Ok(user_id) = current_user(&session) else {
        return redirect_to("/login");
    };
    let id = id.into_inner();

    match state.todo_repo.delete_for_user(id, user_id).await {
        Ok(()) => {
            tracing::info!(id, user = user_id, "Deleted task");
            redirect_to("/")
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "Delete failed");
            page_error(&e)
        }
    }
}

#[get("/update/{id}")]
pub async fn edit_task(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<u32>,
) -> HttpResponse {
    let Ok(user_id) = current_user(&session) else {
        return redirect_to("/login");
    };
    let id = id.into_inner();

    let todo = match state.todo_repo.find_for_user(id, user_id).await {
        Ok(Some(todo)) => todo,
        Ok(None) => return page_error(&DomainError::NotFound(format!("todo {}", id))),
        Err(e) => return page_error(&e),
    };

    let page = UpdateTemplate {
        id: todo.id,
        content: todo.content,
    };
    match page.render() {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!(id, error = %e, "Rendering update page failed");
            page_error(&DomainError::Internal(e.to_string()))
        }
    }
}

#[post("/update/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<u32>,
    form: web::Form<UpdateForm>,
) -> HttpResponse {
    let Ok(user_id) = current_user(&session) else {
        return redirect_to("/login");
    };
    let id = id.into_inner();
    let content = form.into_inner().content;
    if let Err(e) = Todo::validate_content(&content) {
        return page_error(&e);
    }

    let mut todo = match state.todo_repo.find_for_user(id, user_id).await {
        Ok(Some(todo)) => todo,
        Ok(None) => return page_error(&DomainError::NotFound(format!("todo {}", id))),
        Err(e) => return page_error(&e),
    };
    todo.content = content;

    match state.todo_repo.update(&todo).await {
        Ok(_) => {
            tracing::info!(id, user = user_id, "Updated task");
            redirect_to("/")
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "Update failed");
            page_error(&e)
        }
    }
}
