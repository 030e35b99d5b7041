//! Shared fixtures for integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use magazine::domain::{EntityKind, EntityName, NamedEntityService};
use magazine::outbound::memory::InMemoryNamedEntityRepository;

/// Clock advancing one second every time it is read, so consecutive writes
/// always carry distinct timestamps.
pub struct TickingClock(Mutex<DateTime<Utc>>);

impl Default for TickingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Self(Mutex::new(start))
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.0.lock().expect("clock mutex");
        *now += TimeDelta::seconds(1);
        *now
    }
}

/// Service over a fresh in-memory store, returned with the store so tests
/// can count records.
pub fn memory_service(
    kind: EntityKind,
) -> (
    NamedEntityService<InMemoryNamedEntityRepository>,
    Arc<InMemoryNamedEntityRepository>,
) {
    let repo = Arc::new(InMemoryNamedEntityRepository::new(Arc::new(
        TickingClock::default(),
    )));
    (NamedEntityService::new(kind, repo.clone()), repo)
}

pub fn names(raw: &[&str]) -> Vec<EntityName> {
    raw.iter()
        .map(|name| EntityName::new(*name).expect("valid name"))
        .collect()
}
