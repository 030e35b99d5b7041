//! Domain primitives, ports and services.
//!
//! Purpose: define the transport-agnostic model for name-keyed records (tags
//! and categories), the ports the hexagon exposes, and the services that
//! implement them.
//!
//! Public surface:
//! - Error / ErrorCode: typed failures shared by every adapter.
//! - TraceId: task-local request correlation.
//! - NamedEntity and friends: the record model.
//! - NamedEntityService: generic CRUD plus the deduplicating workflows.

pub mod error;
mod named_entity;
mod named_entity_service;
mod named_entity_workflows;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::named_entity::{
    BatchCreateOutcome, EntityId, EntityKind, EntityName, NamedEntity, NamedEntityFilter,
    NamedEntityPatch, NamedEntityValidationError, NewNamedEntity,
};
pub use self::named_entity_service::NamedEntityService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use magazine::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Tag not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
