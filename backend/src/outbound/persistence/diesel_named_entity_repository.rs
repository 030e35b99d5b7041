//! PostgreSQL-backed named entity repositories.
//!
//! Tags and categories share one table shape, so a single macro generates a
//! repository per table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NamedEntityRepository, NamedEntityRepositoryError};
use crate::domain::{EntityId, NamedEntity, NamedEntityFilter, NamedEntityPatch, NewNamedEntity};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, NamedEntityRecord, NewCategoryRow, NewTagRow, TagRow};
use super::pool::DbPool;
use super::schema::{categories, tags};

/// Escape `LIKE` wildcards so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(fragment: &str) -> String {
    format!("%{}%", escape_like(fragment))
}

fn to_entities<R>(rows: Vec<R>) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError>
where
    R: Into<NamedEntityRecord>,
{
    rows.into_iter()
        .map(|row| NamedEntity::try_from(row.into()))
        .collect()
}

/// Order inserted rows to match the order names were supplied in.
fn in_input_order(
    entities: &[NewNamedEntity],
    mut created: Vec<NamedEntity>,
) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError> {
    let mut ordered = Vec::with_capacity(created.len());
    for entity in entities {
        let position = created
            .iter()
            .position(|record| record.name == entity.name)
            .ok_or_else(|| {
                NamedEntityRepositoryError::query(format!(
                    "inserted row for {} was not returned",
                    entity.name
                ))
            })?;
        ordered.push(created.swap_remove(position));
    }
    Ok(ordered)
}

macro_rules! diesel_named_entity_repository {
    ($(#[$meta:meta])* $repo:ident, $table:ident, $row:ident, $new_row:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
        }

        impl $repo {
            /// Create a repository drawing connections from `pool`.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl NamedEntityRepository for $repo {
            async fn find_many(
                &self,
                filter: &NamedEntityFilter,
            ) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let mut query = $table::table
                    .select($row::as_select())
                    .order_by(($table::created_at.asc(), $table::name.asc()))
                    .into_boxed();
                if let Some(names) = &filter.names {
                    let raw: Vec<String> = names
                        .iter()
                        .map(|name| name.as_ref().to_owned())
                        .collect();
                    query = query.filter($table::name.eq_any(raw));
                }
                if let Some(fragment) = &filter.name_contains {
                    query = query.filter($table::name.ilike(contains_pattern(fragment)));
                }
                let rows: Vec<$row> = query.load(&mut conn).await.map_err(map_diesel_error)?;
                to_entities(rows)
            }

            async fn find_by_id(
                &self,
                id: &EntityId,
            ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .find(*id.as_uuid())
                    .select($row::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(|row| NamedEntity::try_from(NamedEntityRecord::from(row)))
                    .transpose()
            }

            async fn insert_one(
                &self,
                entity: &NewNamedEntity,
            ) -> Result<NamedEntity, NamedEntityRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: $row = diesel::insert_into($table::table)
                    .values($new_row::from(entity))
                    .returning($row::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                NamedEntity::try_from(NamedEntityRecord::from(row))
            }

            async fn insert_many(
                &self,
                entities: &[NewNamedEntity],
            ) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError> {
                if entities.is_empty() {
                    return Ok(Vec::new());
                }
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<$new_row<'_>> = entities.iter().map($new_row::from).collect();
                // A single statement, so a unique violation on any row
                // leaves the table untouched.
                let created: Vec<$row> = diesel::insert_into($table::table)
                    .values(&rows)
                    .returning($row::as_returning())
                    .get_results(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                in_input_order(entities, to_entities(created)?)
            }

            async fn update_by_id(
                &self,
                id: &EntityId,
                patch: &NamedEntityPatch,
            ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let target = diesel::update($table::table.find(*id.as_uuid()));
                let row: Option<$row> = match &patch.name {
                    Some(name) => {
                        target
                            .set((
                                $table::name.eq(name.as_ref()),
                                $table::updated_at.eq(diesel::dsl::now),
                            ))
                            .returning($row::as_returning())
                            .get_result(&mut conn)
                            .await
                    }
                    None => {
                        target
                            .set($table::updated_at.eq(diesel::dsl::now))
                            .returning($row::as_returning())
                            .get_result(&mut conn)
                            .await
                    }
                }
                .optional()
                .map_err(map_diesel_error)?;
                row.map(|row| NamedEntity::try_from(NamedEntityRecord::from(row)))
                    .transpose()
            }

            async fn delete_by_id(
                &self,
                id: &EntityId,
            ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = diesel::delete($table::table.find(*id.as_uuid()))
                    .returning($row::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(|row| NamedEntity::try_from(NamedEntityRecord::from(row)))
                    .transpose()
            }
        }
    };
}

diesel_named_entity_repository!(
    /// Diesel-backed repository for the `tags` table.
    DieselTagRepository,
    tags,
    TagRow,
    NewTagRow
);

diesel_named_entity_repository!(
    /// Diesel-backed repository for the `categories` table.
    DieselCategoryRepository,
    categories,
    CategoryRow,
    NewCategoryRow
);
