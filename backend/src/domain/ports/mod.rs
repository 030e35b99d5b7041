//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod named_entity_command;
mod named_entity_query;
mod named_entity_repository;

#[cfg(test)]
pub use named_entity_command::MockNamedEntityCommand;
pub use named_entity_command::NamedEntityCommand;
#[cfg(test)]
pub use named_entity_query::MockNamedEntityQuery;
pub use named_entity_query::NamedEntityQuery;
#[cfg(test)]
pub use named_entity_repository::MockNamedEntityRepository;
pub use named_entity_repository::{NamedEntityRepository, NamedEntityRepositoryError};
