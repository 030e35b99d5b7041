//! Builders for HTTP state ports backed by the configured store.

use std::sync::Arc;

use actix_web::web;

use magazine::domain::ports::NamedEntityRepository;
use magazine::domain::{EntityKind, NamedEntityService};
use magazine::inbound::http::state::{HttpState, NamedEntityPorts};
use magazine::outbound::memory::InMemoryNamedEntityRepository;
use magazine::outbound::persistence::{DieselCategoryRepository, DieselTagRepository};

use super::ServerConfig;

/// Wrap `repo` in a service for `kind` and expose it through both ports.
fn named_entity_ports<R>(kind: EntityKind, repo: R) -> NamedEntityPorts
where
    R: NamedEntityRepository + 'static,
{
    NamedEntityPorts::from_service(Arc::new(NamedEntityService::new(kind, Arc::new(repo))))
}

/// Build handler state, using PostgreSQL when a pool is configured and the
/// in-memory store otherwise.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::new(
            named_entity_ports(EntityKind::Tag, DieselTagRepository::new(pool.clone())),
            named_entity_ports(
                EntityKind::Category,
                DieselCategoryRepository::new(pool.clone()),
            ),
        ),
        None => HttpState::new(
            named_entity_ports(EntityKind::Tag, InMemoryNamedEntityRepository::default()),
            named_entity_ports(
                EntityKind::Category,
                InMemoryNamedEntityRepository::default(),
            ),
        ),
    };
    web::Data::new(state)
}
