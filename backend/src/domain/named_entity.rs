//! Name-keyed entities: tags and categories.
//!
//! A named entity's business identity is its `name`. Names are unique per
//! collection, compared case-sensitively exactly as stored; the domain
//! performs no normalisation beyond rejecting blank input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while constructing named entity primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamedEntityValidationError {
    /// The name was empty or whitespace only.
    #[error("name must not be empty")]
    EmptyName,
    /// The identifier was not a UUID.
    #[error("id must be a valid UUID")]
    InvalidId,
}

/// Which collection a named entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Free-form article tag.
    Tag,
    /// Editorial category.
    Category,
}

impl EntityKind {
    /// Singular, lower-case label ("tag").
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Category => "category",
        }
    }

    /// Plural, lower-case label ("tags").
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Tag => "tags",
            Self::Category => "categories",
        }
    }

    /// Singular label with an upper-case first letter ("Tag").
    pub const fn title(self) -> &'static str {
        match self {
            Self::Tag => "Tag",
            Self::Category => "Category",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// System-generated identifier. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = NamedEntityValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| NamedEntityValidationError::InvalidId)
    }
}

/// Non-blank entity name, stored exactly as supplied.
///
/// # Examples
/// ```
/// use magazine::domain::EntityName;
///
/// let name = EntityName::new("Electronics").expect("valid name");
/// assert_eq!(name.as_ref(), "Electronics");
/// assert!(EntityName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityName(String);

impl EntityName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, NamedEntityValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NamedEntityValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Consume the wrapper, returning the raw string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityName {
    type Error = NamedEntityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityName> for String {
    fn from(value: EntityName) -> Self {
        value.0
    }
}

/// A persisted tag or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedEntity {
    /// Stable identifier assigned by the store.
    pub id: EntityId,
    /// Unique name within the collection.
    pub name: EntityName,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Attribute bag for creating a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNamedEntity {
    /// Name of the record to create.
    pub name: EntityName,
}

impl NewNamedEntity {
    /// Build an attribute bag for `name`.
    pub fn new(name: EntityName) -> Self {
        Self { name }
    }
}

impl From<EntityName> for NewNamedEntity {
    fn from(name: EntityName) -> Self {
        Self::new(name)
    }
}

/// Partial update. Absent fields are left untouched; `updated_at` is always
/// refreshed, even for an empty patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntityPatch {
    /// Replacement name, if any.
    pub name: Option<EntityName>,
}

impl NamedEntityPatch {
    /// Patch that renames the record.
    pub fn rename(name: EntityName) -> Self {
        Self { name: Some(name) }
    }

    /// Whether the patch changes any attribute.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Read filter. The default value matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedEntityFilter {
    /// Exact membership test on `name`.
    pub names: Option<Vec<EntityName>>,
    /// Case-insensitive substring match on `name`.
    pub name_contains: Option<String>,
}

impl NamedEntityFilter {
    /// Filter matching any of `names` exactly.
    pub fn by_names(names: Vec<EntityName>) -> Self {
        Self {
            names: Some(names),
            name_contains: None,
        }
    }

    /// Filter matching names containing `fragment`, ignoring case.
    pub fn name_contains(fragment: impl Into<String>) -> Self {
        Self {
            names: None,
            name_contains: Some(fragment.into()),
        }
    }

    /// Evaluate the filter against a record.
    ///
    /// Adapters that cannot push the filter down to their store use this to
    /// keep matching semantics identical across implementations.
    pub fn matches(&self, entity: &NamedEntity) -> bool {
        let name_ok = self
            .names
            .as_ref()
            .is_none_or(|names| names.contains(&entity.name));
        let contains_ok = self.name_contains.as_ref().is_none_or(|fragment| {
            entity
                .name
                .as_ref()
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        });
        name_ok && contains_ok
    }
}

/// Result of the deduplicating batch create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateOutcome {
    /// Records that already existed for the requested names, in input order.
    pub existing_records: Vec<NamedEntity>,
    /// Records created by this call, in input order.
    pub new_records: Vec<NamedEntity>,
}
