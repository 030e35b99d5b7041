//! Startup wiring for tag seeding.

mod config;
mod startup;

pub use config::{DEFAULT_SEED_TAGS, SeedSettings};
pub use startup::{StartupSeedingError, seed_tags_on_startup};
