//! User Entity
//!
//! Account that owns tasks. Passwords are stored as Argon2 PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::entity::{DomainError, DomainResult, Entity};

/// Longest username accepted, in characters
pub const MAX_USERNAME_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Assigned by the database; 0 until stored
    pub id: u32,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// New unsaved user with a freshly salted hash of `password`
    pub fn new(username: String, password: &str) -> DomainResult<Self> {
        Self::validate_username(&username)?;
        if password.is_empty() {
            return Err(DomainError::InvalidInput("password is empty".to_string()));
        }
        Ok(Self {
            id: 0,
            username,
            password_hash: hash_password(password)?,
        })
    }

    pub fn validate_username(username: &str) -> DomainResult<()> {
        let chars = username.chars().count();
        if chars == 0 || chars > MAX_USERNAME_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "username must have 1 to {} characters",
                MAX_USERNAME_CHARS
            )));
        }
        Ok(())
    }

    /// False for a wrong password and for an unreadable stored hash
    pub fn check_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!(user = self.id, error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("Hashing password failed: {}", e)))
}
