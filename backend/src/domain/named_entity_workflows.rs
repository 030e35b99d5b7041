//! Name-keyed workflows layered on the generic record operations.
//!
//! `partition_and_create` backs `create_batch`: one existence query for the
//! whole input, then one batch insert for the names that were missing.
//! `resolve_or_create` backs `ensure_exist` and tolerates a concurrent
//! writer inserting the same name between its lookup and its insert.

use std::collections::{HashMap, HashSet};

use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{NamedEntityRepository, NamedEntityRepositoryError};
use crate::domain::{
    BatchCreateOutcome, EntityId, EntityName, Error, NamedEntity, NamedEntityFilter,
    NewNamedEntity,
};

use super::NamedEntityService;

/// Drop repeated names, keeping the first occurrence of each.
pub(crate) fn distinct_names(names: Vec<EntityName>) -> Vec<EntityName> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

impl<R> NamedEntityService<R>
where
    R: NamedEntityRepository,
{
    pub(super) async fn partition_and_create(
        &self,
        names: Vec<EntityName>,
    ) -> Result<BatchCreateOutcome, Error> {
        let names = distinct_names(names);
        let found = self
            .repo()
            .find_many(&NamedEntityFilter::by_names(names.clone()))
            .await
            .map_err(|err| self.map_repository_error(err))?;

        let mut by_name: HashMap<EntityName, NamedEntity> = found
            .into_iter()
            .map(|entity| (entity.name.clone(), entity))
            .collect();

        let mut existing_records = Vec::new();
        let mut pending = Vec::new();
        for name in names {
            match by_name.remove(&name) {
                Some(entity) => existing_records.push(entity),
                None => pending.push(NewNamedEntity::new(name)),
            }
        }

        if pending.is_empty() {
            return Err(self.nothing_created(&existing_records));
        }

        let new_records = self
            .repo()
            .insert_many(&pending)
            .await
            .map_err(|err| self.map_repository_error(err))?;

        info!(
            kind = %self.kind(),
            existing = existing_records.len(),
            created = new_records.len(),
            "batch create completed"
        );

        Ok(BatchCreateOutcome {
            existing_records,
            new_records,
        })
    }

    pub(super) async fn resolve_or_create(&self, name: &EntityName) -> Result<EntityId, Error> {
        if let Some(id) = self.lookup_id(name).await? {
            return Ok(id);
        }

        match self.repo().insert_one(&NewNamedEntity::new(name.clone())).await {
            Ok(entity) => Ok(entity.id),
            Err(err @ NamedEntityRepositoryError::UniqueViolation { .. }) => {
                warn!(
                    kind = %self.kind(),
                    name = %name,
                    "concurrent insert won the race; re-reading"
                );
                match self.lookup_id(name).await? {
                    Some(id) => Ok(id),
                    None => Err(self.map_repository_error(err)),
                }
            }
            Err(err) => Err(self.map_repository_error(err)),
        }
    }

    async fn lookup_id(&self, name: &EntityName) -> Result<Option<EntityId>, Error> {
        let found = self
            .repo()
            .find_many(&NamedEntityFilter::by_names(vec![name.clone()]))
            .await
            .map_err(|err| self.map_repository_error(err))?;
        Ok(found
            .into_iter()
            .find(|entity| &entity.name == name)
            .map(|entity| entity.id))
    }

    fn nothing_created(&self, existing: &[NamedEntity]) -> Error {
        let plural = self.kind().plural();
        let names: Vec<&str> = existing.iter().map(|entity| entity.name.as_ref()).collect();
        Error::conflict(format!(
            "No new {plural} were created. Existing {plural}: {}",
            names.join(", ")
        ))
        .with_details(json!({ "existing": names }))
    }
}

#[cfg(test)]
#[path = "named_entity_workflows_tests.rs"]
mod tests;
