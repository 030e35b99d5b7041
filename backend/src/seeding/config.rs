//! Seeding configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Tags created by the stock seed run.
pub const DEFAULT_SEED_TAGS: [&str; 5] = ["Technology", "Health", "Travel", "Education", "Science"];

/// Settings controlling tag seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MAGAZINE_SEED")]
pub struct SeedSettings {
    /// Enable tag seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Comma-separated tag names overriding the stock list.
    pub tags: Option<String>,
}

impl SeedSettings {
    /// Whether seeding should run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tag names to seed, in configured order. Blank entries are skipped.
    pub fn tag_names(&self) -> Vec<String> {
        match self.tags.as_deref() {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_SEED_TAGS.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}
