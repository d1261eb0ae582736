//! Repository Layer - Core Traits
//!
//! Abstract interface for data access.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Store a new entity and return it with its assigned ID
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities in ID order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity; `NotFound` if it is gone
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete by ID; `NotFound` if it is gone
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
