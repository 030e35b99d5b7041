//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! business rules. Row structs and the schema stay private to this module.
//! Connections come from a `bb8` pool driven by `diesel-async`.
//!
//! ```ignore
//! use magazine::outbound::persistence::{DbPool, DieselTagRepository};
//!
//! let pool = DbPool::connect("postgres://localhost/magazine", 10).await?;
//! let tags = DieselTagRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_named_entity_repository;
mod models;
mod pool;
mod schema;

pub use diesel_named_entity_repository::{DieselCategoryRepository, DieselTagRepository};
pub use pool::{DbPool, PoolError};
