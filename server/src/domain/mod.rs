//! Domain Layer
//!
//! Entities and core abstractions. No HTTP or SQL here.

mod entity;
mod todo;
mod user;

pub use entity::{DomainError, DomainResult, Entity};
pub use todo::{Todo, MAX_CONTENT_CHARS};
pub use user::User;
