//! Startup seeding orchestration.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::NamedEntityCommand;
use crate::domain::{EntityId, EntityName, NamedEntityValidationError, TraceId};
use crate::seeding::config::SeedSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// A configured tag name failed validation.
    #[error("invalid seed tag {name:?}: {source}")]
    InvalidName {
        /// Offending configured value.
        name: String,
        /// Validation failure.
        #[source]
        source: NamedEntityValidationError,
    },
    /// Resolving or creating the tags failed.
    #[error("tag seeding failed: {0}")]
    Seeding(#[from] crate::domain::Error),
}

/// Make sure the configured tags exist when seeding is enabled.
///
/// Seeding goes through `ensure_exist`, so a second run resolves the same
/// ids instead of failing or duplicating tags.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use magazine::domain::{EntityKind, NamedEntityService};
/// use magazine::outbound::memory::InMemoryNamedEntityRepository;
/// use magazine::seeding::{SeedSettings, seed_tags_on_startup};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let tags = NamedEntityService::new(
///     EntityKind::Tag,
///     Arc::new(InMemoryNamedEntityRepository::default()),
/// );
/// let settings = SeedSettings { enabled: true, tags: None };
/// let ids = seed_tags_on_startup(&settings, &tags).await?;
/// assert_eq!(ids.map(|ids| ids.len()), Some(5));
/// # Ok(())
/// # }
/// ```
pub async fn seed_tags_on_startup(
    settings: &SeedSettings,
    tags: &dyn NamedEntityCommand,
) -> Result<Option<Vec<EntityId>>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "tag seeding skipped");
        return Ok(None);
    }

    let names = settings
        .tag_names()
        .into_iter()
        .map(|name| {
            EntityName::new(name.clone())
                .map_err(|source| StartupSeedingError::InvalidName { name, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let ids = TraceId::in_new_scope(tags.ensure_exist(names)).await?;
    info!(tag_count = ids.len(), "tag seeding applied");
    Ok(Some(ids))
}
