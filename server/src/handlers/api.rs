//! JSON API Handlers
//!
//! `/api/tasks` and `/api/add`, the endpoints the table and the form talk to.
//! Both act on the session user's tasks only.

use actix_session::Session;
use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Todo};
use crate::repository::Repository;
use crate::AppState;
use super::auth::current_user;
use super::status_for;

/// Task as the client renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: u32,
    pub content: String,
    pub date: String,
}

impl From<&Todo> for TaskDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            content: todo.content.clone(),
            date: todo.display_date(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub content: String,
}

/// Receipt for `/api/add`, tagged on `result`
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum AddTaskResponse {
    Success(TaskDto),
    Error { message: String },
}

pub(super) fn receipt_error(err: &DomainError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(AddTaskResponse::Error {
        message: err.to_string(),
    })
}

#[get("/tasks")]
pub async fn list_tasks(state: web::Data<AppState>, session: Session) -> HttpResponse {
    let user_id = match current_user(&session) {
        Ok(id) => id,
        Err(e) => {
            return HttpResponse::build(status_for(&e)).json(super::Response {
                message: e.to_string(),
            })
        }
    };

    match state.todo_repo.list_by_user(user_id).await {
        Ok(todos) => HttpResponse::Ok().json(todos.iter().map(TaskDto::from).collect::<Vec<_>>()),
        Err(e) => {
            tracing::error!(error = %e, "Listing tasks failed");
            HttpResponse::build(status_for(&e)).json(super::Response {
                message: e.to_string(),
            })
        }
    }
}

#[post("/add")]
pub async fn add_task(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<AddTaskRequest>,
) -> HttpResponse {
    let user_id = match current_user(&session) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejected new task without a session");
            return receipt_error(&e);
        }
    };

    let content = body.into_inner().content;
    if let Err(e) = Todo::validate_content(&content) {
        tracing::warn!(error = %e, "Rejected new task");
        return receipt_error(&e);
    }

    match state.todo_repo.create(&Todo::new(content, user_id)).await {
        Ok(todo) => {
            tracing::info!(id = todo.id, user = user_id, "Created task");
            HttpResponse::Ok().json(AddTaskResponse::Success(TaskDto::from(&todo)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Creating task failed");
            receipt_error(&e)
        }
    }
}
