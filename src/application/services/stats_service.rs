//! Registry statistics service.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::clock::Clock;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::RegistryStore;
use crate::error::AppError;

/// Number of entries reported in [`RegistryStats::top_urls`].
const TOP_URLS: usize = 5;

/// Aggregate statistics over the whole registry.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStats {
    pub total_urls: usize,
    /// Records that are active and unexpired.
    pub active_urls: usize,
    pub expired_urls: usize,
    pub total_visits: u64,
    /// Up to five most-visited records, ties kept in insertion order.
    pub top_urls: Vec<TopUrl>,
}

/// One row of the most-visited ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopUrl {
    pub shortcode: String,
    pub long_url: String,
    pub visits: u64,
}

/// Read-only service computing aggregate statistics from a registry
/// snapshot.
///
/// Statistics never mutate the registry, so this service reads outside the
/// registry service's write lock.
pub struct StatsService<S: RegistryStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: RegistryStore, C: Clock> StatsService<S, C> {
    /// Creates a new statistics service.
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Computes aggregate statistics over the current registry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store cannot be read.
    pub async fn statistics(&self) -> Result<RegistryStats, AppError> {
        let records = self.store.load_all().await?;
        let now = self.clock.now();

        let total_urls = records.len();
        let active_urls = records.iter().filter(|r| r.is_live(now)).count();
        let expired_urls = records.iter().filter(|r| r.is_expired(now)).count();
        let total_visits = records.iter().map(|r| r.visits).sum();

        // sort_by is stable, so equal visit counts keep insertion order.
        let mut ranked: Vec<&UrlRecord> = records.iter().collect();
        ranked.sort_by(|a, b| b.visits.cmp(&a.visits));

        let top_urls = ranked
            .into_iter()
            .take(TOP_URLS)
            .map(|r| TopUrl {
                shortcode: r.shortcode.clone(),
                long_url: r.long_url.clone(),
                visits: r.visits,
            })
            .collect();

        let stats = RegistryStats {
            total_urls,
            active_urls,
            expired_urls,
            total_visits,
            top_urls,
        };

        tracing::debug!(
            total = stats.total_urls,
            active = stats.active_urls,
            expired = stats.expired_urls,
            visits = stats.total_visits,
            "statistics computed"
        );
        Ok(stats)
    }

    /// Returns the live subset of the registry: active and unexpired
    /// records, in insertion order.
    pub async fn active_records(&self) -> Result<Vec<UrlRecord>, AppError> {
        let records = self.store.load_all().await?;
        let now = self.clock.now();

        Ok(records.into_iter().filter(|r| r.is_live(now)).collect())
    }
}
