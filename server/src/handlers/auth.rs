//! Account Handlers
//!
//! Register, log in and log out. The session cookie carries only the user id.

use actix_session::Session;
use actix_web::{get, http::header, http::StatusCode, post, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::domain::{DomainError, DomainResult, User};
use crate::AppState;
use super::status_for;

const USER_ID_KEY: &str = "user_id";

/// Id of the logged-in user, or `Unauthorized`
pub(crate) fn current_user(session: &Session) -> DomainResult<u32> {
    match session.get::<u32>(USER_ID_KEY) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(DomainError::Unauthorized("not logged in".to_string())),
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable session");
            Err(DomainError::Unauthorized("not logged in".to_string()))
        }
    }
}

pub(crate) fn redirect_to(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    message: String,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    message: String,
}

#[derive(Deserialize)]
pub struct AccountForm {
    pub username: String,
    pub password: String,
}

fn render_page(status: StatusCode, page: &impl Template) -> HttpResponse {
    match page.render() {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!(error = %e, "Rendering account page failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn start_session(session: &Session, user_id: u32) -> DomainResult<()> {
    session.renew();
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(|e| DomainError::Internal(format!("Storing session failed: {}", e)))
}

#[get("/register")]
pub async fn register_page() -> HttpResponse {
    render_page(StatusCode::OK, &RegisterTemplate { message: String::new() })
}

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<AccountForm>,
) -> HttpResponse {
    let AccountForm { username, password } = form.into_inner();

    // Argon2 is slow on purpose; keep it off the async workers
    let user = match web::block(move || User::new(username, &password)).await {
        Ok(Ok(user)) => user,
        Ok(Err(e)) => return account_error::<RegisterTemplate>(&e),
        Err(e) => return account_error::<RegisterTemplate>(&DomainError::Internal(e.to_string())),
    };

    let created = match state.user_repo.create(&user).await {
        Ok(created) => created,
        Err(DomainError::Conflict(_)) => {
            tracing::info!(username = %user.username, "Username taken");
            return render_page(
                StatusCode::CONFLICT,
                &RegisterTemplate { message: "Username already exists".to_string() },
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Creating user failed");
            return account_error::<RegisterTemplate>(&e);
        }
    };

    tracing::info!(user = created.id, "Registered user");
    match start_session(&session, created.id) {
        Ok(()) => redirect_to("/"),
        Err(e) => account_error::<RegisterTemplate>(&e),
    }
}

#[get("/login")]
pub async fn login_page() -> HttpResponse {
    render_page(StatusCode::OK, &LoginTemplate { message: String::new() })
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<AccountForm>,
) -> HttpResponse {
    let AccountForm { username, password } = form.into_inner();

    let user = match state.user_repo.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => return bad_credentials(&username),
        Err(e) => {
            tracing::error!(error = %e, "Looking up user failed");
            return account_error::<LoginTemplate>(&e);
        }
    };

    let user_id = user.id;
    match web::block(move || user.check_password(&password)).await {
        Ok(true) => {}
        Ok(false) => return bad_credentials(&username),
        Err(e) => return account_error::<LoginTemplate>(&DomainError::Internal(e.to_string())),
    }

    match start_session(&session, user_id) {
        Ok(()) => {
            tracing::info!(user = user_id, "Logged in");
            redirect_to("/")
        }
        Err(e) => account_error::<LoginTemplate>(&e),
    }
}

#[get("/logout")]
pub async fn logout(session: Session) -> HttpResponse {
    if let Ok(Some(id)) = session.get::<u32>(USER_ID_KEY) {
        tracing::info!(user = id, "Logged out");
    }
    session.purge();
    redirect_to("/login")
}

fn bad_credentials(username: &str) -> HttpResponse {
    tracing::warn!(%username, "Login failed");
    render_page(
        StatusCode::UNAUTHORIZED,
        &LoginTemplate { message: "Invalid username or password".to_string() },
    )
}

/// Re-render the form of page `P` with the error text and its status
fn account_error<P: AccountPage>(err: &DomainError) -> HttpResponse {
    render_page(status_for(err), &P::with_message(err.to_string()))
}

trait AccountPage: Template {
    fn with_message(message: String) -> Self;
}

impl AccountPage for LoginTemplate {
    fn with_message(message: String) -> Self {
        Self { message }
    }
}

impl AccountPage for RegisterTemplate {
    fn with_message(message: String) -> Self {
        Self { message }
    }
}
