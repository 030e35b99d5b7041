//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EntityKind;
use crate::domain::ports::{NamedEntityCommand, NamedEntityQuery};

/// Read and write ports for one named entity collection.
#[derive(Clone)]
pub struct NamedEntityPorts {
    pub command: Arc<dyn NamedEntityCommand>,
    pub query: Arc<dyn NamedEntityQuery>,
}

impl NamedEntityPorts {
    /// Bundle a single service that implements both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use magazine::domain::{EntityKind, NamedEntityService};
    /// use magazine::inbound::http::state::NamedEntityPorts;
    /// use magazine::outbound::memory::InMemoryNamedEntityRepository;
    ///
    /// let repo = Arc::new(InMemoryNamedEntityRepository::default());
    /// let service = Arc::new(NamedEntityService::new(EntityKind::Tag, repo));
    /// let _ports = NamedEntityPorts::from_service(service);
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: NamedEntityCommand + NamedEntityQuery + 'static,
    {
        Self {
            command: service.clone(),
            query: service,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tags: NamedEntityPorts,
    pub categories: NamedEntityPorts,
}

impl HttpState {
    /// Construct state from the per-collection ports.
    pub fn new(tags: NamedEntityPorts, categories: NamedEntityPorts) -> Self {
        Self { tags, categories }
    }

    /// Ports serving `kind`.
    pub fn ports(&self, kind: EntityKind) -> &NamedEntityPorts {
        match kind {
            EntityKind::Tag => &self.tags,
            EntityKind::Category => &self.categories,
        }
    }
}
