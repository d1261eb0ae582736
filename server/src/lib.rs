//! To-Do Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and the SQLite implementation
//! - handlers: actix-web handlers for the JSON API, row actions and accounts

use std::io;
use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpServer};
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod handlers;
mod repository;

pub use config::{ConfigError, ServerConfig};
pub use handlers::config as configure_routes;
pub use repository::init_db;

use repository::{TodoRepository, UserRepository};

/// Application state shared across handlers
pub struct AppState {
    pub todo_repo: TodoRepository,
    pub user_repo: UserRepository,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        let conn = Arc::new(Mutex::new(conn));
        Self {
            todo_repo: TodoRepository::new(conn.clone()),
            user_repo: UserRepository::new(conn),
        }
    }
}

/// Signed cookie sessions. Not `Secure`, since the dev proxy speaks plain HTTP.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

/// Install the global subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run(config: ServerConfig) -> io::Result<()> {
    let conn = init_db(&config.database_path).map_err(io::Error::other)?;
    let state = web::Data::new(AppState::new(conn));
    let key = match &config.secret_key {
        Some(secret) => Key::from(secret.as_bytes()),
        None => {
            tracing::warn!("No secret key configured; sessions end when the server restarts");
            Key::generate()
        }
    };

    tracing::info!(
        bind = %config.bind_addr,
        database = %config.database_path.display(),
        "Starting to-do server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::config)
            .wrap(session_middleware(key.clone()))
            .wrap(middleware::Logger::default())
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
