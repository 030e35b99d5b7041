//! Driving port for named entity reads.
//!
//! Inbound adapters use this port to look up tags or categories without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{EntityId, Error, NamedEntity, NamedEntityFilter};

/// Domain use-case port for reading named entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamedEntityQuery: Send + Sync {
    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when no record has this identifier.
    async fn find_by_id(&self, id: EntityId) -> Result<NamedEntity, Error>;

    /// Return every record matching `filter`. An empty result is not an
    /// error.
    async fn find_all(&self, filter: NamedEntityFilter) -> Result<Vec<NamedEntity>, Error>;
}
