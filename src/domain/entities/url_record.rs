//! URL record entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// One entry of the URL registry.
///
/// Created once by the registry service and mutated only by visit increments
/// or soft deletion. A record stays in storage after its validity window
/// elapses; expiry is evaluated lazily against a supplied instant, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Unique key, 4-12 alphanumeric characters.
    pub shortcode: String,
    /// Normalized absolute target URL.
    pub long_url: String,
    /// Set at creation, immutable.
    pub created_at: DateTime<Utc>,
    /// `created_at` plus the validity window. Always after `created_at`.
    pub expiry_at: DateTime<Utc>,
    /// Successful resolutions of this record. Never decremented.
    ///
    /// Defaults to zero so blobs written before the counter existed still load.
    #[serde(default)]
    pub visits: u64,
    /// Tombstone flag; `false` once the record is soft-deleted.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl UrlRecord {
    /// Creates a fresh record with zero visits.
    pub fn new(
        shortcode: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expiry_at: DateTime<Utc>,
    ) -> Self {
        Self {
            shortcode,
            long_url,
            created_at,
            expiry_at,
            visits: 0,
            active: true,
        }
    }

    /// Returns true if the validity window has elapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry_at
    }

    /// Returns true if the record is live: not soft-deleted and not expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired(now)
    }
}

/// A registry entry annotated with its point-in-time expiry state.
///
/// Produced by listings so the hosting application can display expiry
/// without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: UrlRecord,
    pub is_expired: bool,
}
