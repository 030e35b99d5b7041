//! Named entity domain service.
//!
//! [`NamedEntityService`] implements both driving ports for one collection.
//! The generic record operations live here; the name-keyed workflows
//! (`create_batch`, `ensure_exist`) live in `named_entity_workflows`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    NamedEntityCommand, NamedEntityQuery, NamedEntityRepository, NamedEntityRepositoryError,
};
use crate::domain::{
    BatchCreateOutcome, EntityId, EntityKind, EntityName, Error, NamedEntity, NamedEntityFilter,
    NamedEntityPatch, NewNamedEntity,
};

/// Service implementing the named entity driving ports for one collection.
#[derive(Clone)]
pub struct NamedEntityService<R> {
    kind: EntityKind,
    repo: Arc<R>,
}

impl<R> NamedEntityService<R> {
    /// Create a service for `kind` backed by `repo`.
    pub fn new(kind: EntityKind, repo: Arc<R>) -> Self {
        Self { kind, repo }
    }

    /// Collection served by this instance.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub(super) fn repo(&self) -> &R {
        self.repo.as_ref()
    }
}

impl<R> NamedEntityService<R>
where
    R: NamedEntityRepository,
{
    pub(super) fn map_repository_error(&self, error: NamedEntityRepositoryError) -> Error {
        let plural = self.kind.plural();
        match error {
            NamedEntityRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("{plural} repository unavailable: {message}"))
            }
            NamedEntityRepositoryError::Query { message } => {
                Error::internal(format!("{plural} repository error: {message}"))
            }
            NamedEntityRepositoryError::UniqueViolation { message } => {
                Error::constraint_violation(format!(
                    "a {} with this name already exists",
                    self.kind.singular()
                ))
                .with_details(json!({ "code": "unique_violation", "reason": message }))
            }
        }
    }

    fn not_found(&self, id: &EntityId) -> Error {
        Error::not_found(format!("{} not found", self.kind.title()))
            .with_details(json!({ "id": id.to_string() }))
    }

    fn empty_batch(&self) -> Error {
        Error::invalid_request(format!(
            "at least one {} is required",
            self.kind.singular()
        ))
        .with_details(json!({ "field": "names", "code": "empty_batch" }))
    }

    async fn insert_batch(&self, entities: &[NewNamedEntity]) -> Result<Vec<NamedEntity>, Error> {
        if entities.is_empty() {
            return Err(self.empty_batch());
        }
        self.repo
            .insert_many(entities)
            .await
            .map_err(|err| self.map_repository_error(err))
    }
}

#[async_trait]
impl<R> NamedEntityQuery for NamedEntityService<R>
where
    R: NamedEntityRepository,
{
    async fn find_by_id(&self, id: EntityId) -> Result<NamedEntity, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(|err| self.map_repository_error(err))?
            .ok_or_else(|| self.not_found(&id))
    }

    async fn find_all(&self, filter: NamedEntityFilter) -> Result<Vec<NamedEntity>, Error> {
        self.repo
            .find_many(&filter)
            .await
            .map_err(|err| self.map_repository_error(err))
    }
}

#[async_trait]
impl<R> NamedEntityCommand for NamedEntityService<R>
where
    R: NamedEntityRepository,
{
    async fn create_one(&self, entity: NewNamedEntity) -> Result<NamedEntity, Error> {
        self.repo
            .insert_one(&entity)
            .await
            .map_err(|err| self.map_repository_error(err))
    }

    async fn create_many(&self, entities: Vec<NewNamedEntity>) -> Result<Vec<NamedEntity>, Error> {
        self.insert_batch(&entities).await
    }

    async fn update(&self, id: EntityId, patch: NamedEntityPatch) -> Result<NamedEntity, Error> {
        self.repo
            .update_by_id(&id, &patch)
            .await
            .map_err(|err| self.map_repository_error(err))?
            .ok_or_else(|| self.not_found(&id))
    }

    async fn delete(&self, id: EntityId) -> Result<NamedEntity, Error> {
        self.repo
            .delete_by_id(&id)
            .await
            .map_err(|err| self.map_repository_error(err))?
            .ok_or_else(|| self.not_found(&id))
    }

    async fn create_batch(&self, names: Vec<EntityName>) -> Result<BatchCreateOutcome, Error> {
        if names.is_empty() {
            return Err(self.empty_batch());
        }
        self.partition_and_create(names).await
    }

    async fn ensure_exist(&self, names: Vec<EntityName>) -> Result<Vec<EntityId>, Error> {
        let mut ids = Vec::with_capacity(names.len());
        for name in &names {
            ids.push(self.resolve_or_create(name).await?);
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "named_entity_service_tests.rs"]
mod tests;
