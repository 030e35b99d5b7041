//! Driving port for named entity writes.
//!
//! The [`NamedEntityCommand`] trait covers both the generic record
//! operations (create, update, delete) and the name-keyed workflows
//! (`create_batch`, `ensure_exist`) used by HTTP handlers and startup
//! seeding.

use async_trait::async_trait;

use crate::domain::{
    BatchCreateOutcome, EntityId, EntityName, Error, NamedEntity, NamedEntityPatch,
    NewNamedEntity,
};

/// Domain use-case port for mutating named entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamedEntityCommand: Send + Sync {
    /// Persist one record.
    async fn create_one(&self, entity: NewNamedEntity) -> Result<NamedEntity, Error>;

    /// Persist several records in a single batch, returned in input order.
    ///
    /// # Errors
    ///
    /// Returns an invalid request error when `entities` is empty.
    async fn create_many(&self, entities: Vec<NewNamedEntity>) -> Result<Vec<NamedEntity>, Error>;

    /// Apply a partial update and return the post-update state.
    ///
    /// An empty patch is accepted and only refreshes `updated_at`.
    async fn update(&self, id: EntityId, patch: NamedEntityPatch) -> Result<NamedEntity, Error>;

    /// Remove a record and return its last-known state.
    async fn delete(&self, id: EntityId) -> Result<NamedEntity, Error>;

    /// Create only the names that do not exist yet.
    ///
    /// # Errors
    ///
    /// - Invalid request when `names` is empty.
    /// - Conflict when every name already exists; the message lists them.
    /// - Constraint violation when a concurrent writer inserted one of the
    ///   names between the existence check and the insert.
    async fn create_batch(&self, names: Vec<EntityName>) -> Result<BatchCreateOutcome, Error>;

    /// Resolve each name to an identifier, creating missing records one at a
    /// time. The output follows input order and repeats ids for repeated
    /// names.
    async fn ensure_exist(&self, names: Vec<EntityName>) -> Result<Vec<EntityId>, Error>;
}
