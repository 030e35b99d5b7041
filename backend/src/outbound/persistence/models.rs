//! Diesel row types for the named entity tables.
//!
//! Rows are internal to the persistence adapter; repositories convert them
//! into domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::NamedEntityRepositoryError;
use crate::domain::{EntityId, EntityName, NamedEntity, NewNamedEntity};

use super::schema::{categories, tags};

/// Row shape shared by both tables, used for conversion into the domain.
pub(crate) struct NamedEntityRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<NamedEntityRecord> for NamedEntity {
    type Error = NamedEntityRepositoryError;

    fn try_from(row: NamedEntityRecord) -> Result<Self, Self::Error> {
        let name = EntityName::new(row.name).map_err(|err| {
            NamedEntityRepositoryError::query(format!("stored row {} is invalid: {err}", row.id))
        })?;
        Ok(Self {
            id: EntityId::from_uuid(row.id),
            name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

macro_rules! named_entity_rows {
    ($table:ident, $row:ident, $new_row:ident) => {
        #[derive(Debug, Clone, Queryable, Selectable)]
        #[diesel(table_name = $table)]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub(crate) struct $row {
            pub id: Uuid,
            pub name: String,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        impl From<$row> for NamedEntityRecord {
            fn from(row: $row) -> Self {
                Self {
                    id: row.id,
                    name: row.name,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }
            }
        }

        /// Insert payload; timestamps come from column defaults.
        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub(crate) struct $new_row<'a> {
            pub id: Uuid,
            pub name: &'a str,
        }

        impl<'a> From<&'a NewNamedEntity> for $new_row<'a> {
            fn from(entity: &'a NewNamedEntity) -> Self {
                Self {
                    id: Uuid::new_v4(),
                    name: entity.name.as_ref(),
                }
            }
        }
    };
}

named_entity_rows!(tags, TagRow, NewTagRow);
named_entity_rows!(categories, CategoryRow, NewCategoryRow);
