//! Server Configuration
//!
//! Read from the environment, with `.env` loaded first when present.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DATABASE_PATH_VAR: &str = "TODO_DATABASE_PATH";
pub const BIND_ADDR_VAR: &str = "TODO_BIND_ADDR";
pub const SECRET_KEY_VAR: &str = "TODO_SECRET_KEY";

/// Cookie signing needs at least 64 bytes of key material
const MIN_SECRET_KEY_BYTES: usize = 64;

const DEFAULT_DATABASE_PATH: &str = "todo.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "Invalid {}='{}': {}", key, value, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Session signing key; a random one per run when unset
    pub secret_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup(DATABASE_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let bind_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: BIND_ADDR_VAR,
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let secret_key = lookup(SECRET_KEY_VAR).filter(|v| !v.is_empty());
        if let Some(secret) = &secret_key {
            if secret.len() < MIN_SECRET_KEY_BYTES {
                return Err(ConfigError::InvalidValue {
                    key: SECRET_KEY_VAR,
                    value: "<hidden>".to_string(),
                    reason: format!("must be at least {} bytes", MIN_SECRET_KEY_BYTES),
                });
            }
        }

        Ok(Self {
            database_path: PathBuf::from(database_path),
            bind_addr,
            secret_key,
        })
    }
}
