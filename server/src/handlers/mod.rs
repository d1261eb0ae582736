//! Handlers Layer
//!
//! HTTP handlers that bridge the client to the repository. Everything but
//! the account pages and the healthcheck needs a logged-in session.

mod api;
mod auth;
mod pages;

#[cfg(test)]
mod tests;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use crate::domain::DomainError;

use api::AddTaskResponse;

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

pub(crate) fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Unparsable JSON bodies still get a receipt with `result: "error"`
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    tracing::warn!(%message, "Rejected JSON body");
    let response = HttpResponse::BadRequest().json(AddTaskResponse::Error { message });
    InternalError::from_response(err, response).into()
}

#[get("/health")]
async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().json(Response {
        message: "Everything is working fine".to_string(),
    })
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Response {
        message: "Resource not found".to_string(),
    })
}

/// Register every route; shared by the server and the tests
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(
            web::scope("/api")
                .service(api::list_tasks)
                .service(api::add_task),
        )
        .service(auth::register_page)
        .service(auth::register)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(pages::delete_task)
        .service(pages::edit_task)
        .service(pages::update_task)
        .service(healthcheck)
        .default_service(web::route().to(not_found));
}
