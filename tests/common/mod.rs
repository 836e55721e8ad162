#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use shortreg::application::services::{RegistryService, StatsService};
use shortreg::domain::clock::Clock;
use shortreg::infrastructure::persistence::{JsonRegistryStore, MemoryKvStore};

pub type TestStore = JsonRegistryStore<MemoryKvStore>;
pub type TestRegistry = RegistryService<TestStore, ManualClock>;
pub type TestStats = StatsService<TestStore, ManualClock>;

/// Controllable clock for TTL tests.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Everything a scenario needs: both services, the shared store, and the
/// clock that drives expiry.
pub struct TestEnv {
    pub registry: TestRegistry,
    pub stats: TestStats,
    pub store: Arc<TestStore>,
    pub clock: Arc<ManualClock>,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
}

pub fn create_test_env() -> TestEnv {
    let store = Arc::new(JsonRegistryStore::new(
        MemoryKvStore::new(),
        "url_registry_data",
    ));
    let clock = Arc::new(ManualClock::starting_at(start_time()));

    TestEnv {
        registry: RegistryService::new(store.clone(), clock.clone()),
        stats: StatsService::new(store.clone(), clock.clone()),
        store,
        clock,
    }
}
