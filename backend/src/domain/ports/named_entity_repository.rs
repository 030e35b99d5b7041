//! Driven port for name-keyed entity storage.
//!
//! One repository instance backs one collection (tags or categories). The
//! store owns identifier and timestamp assignment and enforces name
//! uniqueness; the domain only ever sees finished [`NamedEntity`] values.

use async_trait::async_trait;

use crate::domain::{EntityId, NamedEntity, NamedEntityFilter, NamedEntityPatch, NewNamedEntity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by named entity repository adapters.
    pub enum NamedEntityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "named entity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "named entity repository query failed: {message}",
        /// The store rejected a write because the name is already taken.
        UniqueViolation { message: String } =>
            "named entity name already exists: {message}",
    }
}

/// Port for named entity storage and retrieval.
///
/// # Write semantics
///
/// - Inserts assign `id`, `created_at` and `updated_at`.
/// - A duplicate `name` surfaces as
///   [`NamedEntityRepositoryError::UniqueViolation`], never as a generic
///   query failure.
/// - [`insert_many`](Self::insert_many) is all-or-nothing: when any element
///   fails, nothing from the batch is persisted.
/// - Updates always refresh `updated_at`, even when the patch is empty.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamedEntityRepository: Send + Sync {
    /// Return every record matching `filter`. No ordering is guaranteed.
    async fn find_many(
        &self,
        filter: &NamedEntityFilter,
    ) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError>;

    /// Fetch a record by identifier, or `None` when absent.
    async fn find_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError>;

    /// Persist a single record.
    async fn insert_one(
        &self,
        entity: &NewNamedEntity,
    ) -> Result<NamedEntity, NamedEntityRepositoryError>;

    /// Persist a batch of records in one operation, returning them in input
    /// order.
    async fn insert_many(
        &self,
        entities: &[NewNamedEntity],
    ) -> Result<Vec<NamedEntity>, NamedEntityRepositoryError>;

    /// Apply a partial update, returning the post-update state or `None`
    /// when the record does not exist.
    async fn update_by_id(
        &self,
        id: &EntityId,
        patch: &NamedEntityPatch,
    ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError>;

    /// Remove a record, returning its last-known state or `None` when it
    /// does not exist.
    async fn delete_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<NamedEntity>, NamedEntityRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        NamedEntityRepositoryError::connection("pool closed"),
        "named entity repository connection failed: pool closed"
    )]
    #[case(
        NamedEntityRepositoryError::query("syntax error"),
        "named entity repository query failed: syntax error"
    )]
    #[case(
        NamedEntityRepositoryError::unique_violation("Rust"),
        "named entity name already exists: Rust"
    )]
    fn errors_render_messages(#[case] error: NamedEntityRepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
