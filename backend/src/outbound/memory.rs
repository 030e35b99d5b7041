//! In-process store adapter.
//!
//! Used when no database URL is configured and by tests. Records live in a
//! mutex-guarded vector; every operation holds the lock for its whole
//! duration, so each call is atomic with respect to the others.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{NamedEntityRepository, NamedEntityRepositoryError};
use crate::domain::{
    EntityId, EntityName, NamedEntity, NamedEntityFilter, NamedEntityPatch, NewNamedEntity,
};

/// Named entity repository backed by process memory.
pub struct InMemoryNamedEntityRepository {
    records: Mutex<Vec<NamedEntity>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryNamedEntityRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryNamedEntityRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Number of stored records.
    ///
    /// Reads through a poisoned lock: the vector is only mutated after every
    /// check has passed, so its contents stay consistent.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<NamedEntity>>, NamedEntityRepositoryError> {
        self.records
            .lock()
            .map_err(|_| NamedEntityRepositoryError::query("in-memory store lock poisoned"))
    }

    fn ensure_unused(
        records: &[NamedEntity],
        name: &EntityName,
        except: Option<&EntityId>,
    ) -> Result<(), NamedEntityRepositoryError> {
        let taken = records
            .iter()
            .any(|record| &record.name == name && Some(&record.id) != except);
        if taken {
            return Err(NamedEntityRepositoryError::unique_violation(name.as_ref()));
        }
        Ok(())
    }

    fn build(&self, entity: &NewNamedEntity) -> NamedEntity {
        let now = self.clock.utc();
        NamedEntity {
            id: EntityId::random(),
            name: entity.name.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl NamedEntityRepository for InMemoryNamedEntityRepository {
    async fn find_many(
        &self,
        filter: &NamedEntityFilter,
    ) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError> {
        let records = self.lock()?;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    async fn insert_one(
        &self,
        entity: &NewNamedEntity,
    ) -> Result<NamedEntity, NamedEntityRepositoryError> {
        let mut records = self.lock()?;
        Self::ensure_unused(&records, &entity.name, None)?;
        let record = self.build(entity);
        records.push(record.clone());
        Ok(record)
    }

    async fn insert_many(
        &self,
        entities: &[NewNamedEntity],
    ) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError> {
        let mut records = self.lock()?;
        // Validate the whole batch, including duplicates within it, before
        // touching the store.
        for (index, entity) in entities.iter().enumerate() {
            Self::ensure_unused(&records, &entity.name, None)?;
            if entities[..index].iter().any(|prior| prior.name == entity.name) {
                return Err(NamedEntityRepositoryError::unique_violation(
                    entity.name.as_ref(),
                ));
            }
        }
        let created: Vec<NamedEntity> = entities.iter().map(|entity| self.build(entity)).collect();
        records.extend(created.iter().cloned());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &EntityId,
        patch: &NamedEntityPatch,
    ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError> {
        let mut records = self.lock()?;
        let Some(position) = records.iter().position(|record| &record.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            Self::ensure_unused(&records, name, Some(id))?;
        }
        let now = self.clock.utc();
        let record = &mut records[position];
        if let Some(name) = &patch.name {
            record.name = name.clone();
        }
        record.updated_at = now;
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError> {
        let mut records = self.lock()?;
        let position = records.iter().position(|record| &record.id == id);
        Ok(position.map(|index| records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MutableClock;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn name(raw: &str) -> EntityName {
        EntityName::new(raw).expect("valid name")
    }

    fn new_entity(raw: &str) -> NewNamedEntity {
        NewNamedEntity::new(name(raw))
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    #[rstest]
    #[tokio::test]
    async fn insert_one_assigns_id_and_timestamps(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock.clone());

        let record = repo.insert_one(&new_entity("Rust")).await.expect("insert");

        assert_eq!(record.name, name("Rust"));
        assert_eq!(record.created_at, clock.utc());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_one_rejects_duplicate_names(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        repo.insert_one(&new_entity("Rust")).await.expect("first insert");

        let err = repo
            .insert_one(&new_entity("Rust"))
            .await
            .expect_err("duplicate");

        assert!(matches!(err, NamedEntityRepositoryError::UniqueViolation { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_case_sensitive(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        repo.insert_one(&new_entity("rust")).await.expect("lower");
        repo.insert_one(&new_entity("Rust")).await.expect("upper");
        assert_eq!(repo.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_many_preserves_order(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);

        let created = repo
            .insert_many(&[new_entity("b"), new_entity("a")])
            .await
            .expect("batch insert");

        let names: Vec<&str> = created.iter().map(|record| record.name.as_ref()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_many_is_all_or_nothing(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        repo.insert_one(&new_entity("Books")).await.expect("seed");

        let err = repo
            .insert_many(&[new_entity("Music"), new_entity("Books")])
            .await
            .expect_err("conflicting batch");

        assert!(matches!(err, NamedEntityRepositoryError::UniqueViolation { .. }));
        let all = repo
            .find_many(&NamedEntityFilter::default())
            .await
            .expect("read");
        assert_eq!(all.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_many_rejects_repeats_within_batch(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);

        let result = repo.insert_many(&[new_entity("js"), new_entity("js")]).await;

        assert!(result.is_err());
        assert!(repo.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_refreshes_updated_at_even_without_changes(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock.clone());
        let record = repo.insert_one(&new_entity("Travel")).await.expect("insert");
        clock.advance_seconds(30);

        let updated = repo
            .update_by_id(&record.id, &NamedEntityPatch::default())
            .await
            .expect("update")
            .expect("record exists");

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.name, record.name);
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at > record.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_taken_name_but_allows_own(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        let first = repo.insert_one(&new_entity("Health")).await.expect("first");
        repo.insert_one(&new_entity("Science")).await.expect("second");

        let err = repo
            .update_by_id(&first.id, &NamedEntityPatch::rename(name("Science")))
            .await
            .expect_err("taken");
        assert!(matches!(err, NamedEntityRepositoryError::UniqueViolation { .. }));

        let same = repo
            .update_by_id(&first.id, &NamedEntityPatch::rename(name("Health")))
            .await
            .expect("renaming to own name");
        assert!(same.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_ids_yield_none(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        let id = EntityId::random();

        assert!(repo.find_by_id(&id).await.expect("find").is_none());
        assert!(
            repo.update_by_id(&id, &NamedEntityPatch::default())
                .await
                .expect("update")
                .is_none()
        );
        assert!(repo.delete_by_id(&id).await.expect("delete").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_missing_id_onto_taken_name_yields_none(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        repo.insert_one(&new_entity("taken")).await.expect("seed");

        let updated = repo
            .update_by_id(&EntityId::random(), &NamedEntityPatch::rename(name("taken")))
            .await
            .expect("missing id is not a constraint failure");

        assert!(updated.is_none());
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn len_survives_a_poisoned_lock(clock: Arc<MutableClock>) {
        let repo = Arc::new(InMemoryNamedEntityRepository::new(clock));
        repo.insert_one(&new_entity("Books")).await.expect("seed");

        let poisoner = repo.clone();
        let joined: std::thread::Result<()> = std::thread::spawn(move || {
            let _guard = poisoner.records.lock().expect("first lock");
            panic!("poison the store");
        })
        .join();
        assert!(joined.is_err());

        assert_eq!(repo.len(), 1);
        let err = repo
            .find_many(&NamedEntityFilter::default())
            .await
            .expect_err("poisoned store");
        assert!(matches!(err, NamedEntityRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_last_known_state(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        let record = repo.insert_one(&new_entity("Science")).await.expect("insert");

        let deleted = repo
            .delete_by_id(&record.id)
            .await
            .expect("delete")
            .expect("record existed");

        assert_eq!(deleted, record);
        assert!(repo.find_by_id(&record.id).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn find_many_applies_filter(clock: Arc<MutableClock>) {
        let repo = InMemoryNamedEntityRepository::new(clock);
        repo.insert_many(&[new_entity("React"), new_entity("Preact"), new_entity("Vue")])
            .await
            .expect("seed");

        let found = repo
            .find_many(&NamedEntityFilter::name_contains("react"))
            .await
            .expect("filter");

        assert_eq!(found.len(), 2);
    }
}
