//! URL registry service: shorten, resolve, list, and delete operations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::clock::Clock;
use crate::domain::entities::{AnnotatedRecord, UrlRecord};
use crate::domain::repositories::RegistryStore;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;

/// Validity window applied when a shorten request omits one or supplies a
/// non-positive value.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Service orchestrating validation, code allocation, expiry checks, and
/// visit accounting over a [`RegistryStore`].
///
/// Every mutating operation is a full load-mutate-save cycle serialized by
/// an internal write lock, so shortcode uniqueness is enforced at insertion
/// time and concurrent visit increments are never lost. Read-only operations
/// take a snapshot without the lock; `save_all` is atomic, so they never
/// observe a partial write.
pub struct RegistryService<S: RegistryStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
    default_validity_minutes: i64,
    write_lock: Mutex<()>,
}

impl<S: RegistryStore, C: Clock> RegistryService<S, C> {
    /// Creates a new registry service with the default validity window.
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            write_lock: Mutex::new(()),
        }
    }

    /// Overrides the default validity window. Non-positive values are ignored.
    pub fn with_default_validity(mut self, minutes: i64) -> Self {
        if minutes > 0 {
            self.default_validity_minutes = minutes;
        }
        self
    }

    /// Creates a shortened URL.
    ///
    /// The target is normalized before storage. When `custom_code` is given
    /// it is validated and checked for uniqueness against the live registry;
    /// otherwise a collision-free random code is allocated. The validity
    /// window falls back to the service default when `validity_minutes` is
    /// absent or non-positive.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - `long_url` is not an absolute http(s) URL
    /// - [`AppError::InvalidShortcode`] - custom code fails the syntax rule
    /// - [`AppError::ShortcodeExists`] - custom code collides with a live entry
    /// - [`AppError::Internal`] - the store cannot be read or written
    pub async fn shorten(
        &self,
        long_url: &str,
        validity_minutes: Option<i64>,
        custom_code: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        let normalized = match normalize_url(long_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(url = long_url, "shorten rejected: invalid URL");
                return Err(e);
            }
        };

        if let Some(custom) = custom_code.as_deref()
            && let Err(e) = validate_custom_code(custom)
        {
            tracing::warn!(code = custom, "shorten rejected: invalid custom code");
            return Err(e);
        }

        let validity = match validity_minutes {
            Some(v) if v > 0 => v,
            _ => self.default_validity_minutes,
        };

        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;

        let shortcode = match custom_code {
            Some(custom) => {
                if records.iter().any(|r| r.shortcode == custom) {
                    tracing::warn!(code = %custom, "shorten rejected: shortcode already exists");
                    return Err(AppError::shortcode_exists(
                        "Custom code already exists",
                        json!({ "code": custom }),
                    ));
                }
                custom
            }
            None => {
                let existing: HashSet<String> =
                    records.iter().map(|r| r.shortcode.clone()).collect();
                generate_code(&existing)
            }
        };

        let now = self.clock.now();
        // An unrepresentable expiry saturates to the far future rather than
        // panicking; created_at < expiry_at still holds.
        let expiry_at = Duration::try_minutes(validity)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let record = UrlRecord::new(shortcode, normalized, now, expiry_at);
        records.push(record.clone());
        self.store.save_all(&records).await?;

        tracing::info!(
            code = %record.shortcode,
            url = %record.long_url,
            expiry = %record.expiry_at,
            "short URL created"
        );
        Ok(record)
    }

    /// Resolves a shortcode to its record, counting the visit.
    ///
    /// The increment and the returned record come from the same snapshot:
    /// the whole cycle runs under the write lock, so concurrent resolutions
    /// never lose updates.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - no record carries `shortcode`
    /// - [`AppError::Expired`] - the validity window has elapsed (the record
    ///   is left untouched)
    /// - [`AppError::Inactive`] - the record was soft-deleted
    /// - [`AppError::Internal`] - the store cannot be read or written
    pub async fn resolve(&self, shortcode: &str) -> Result<UrlRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;
        let now = self.clock.now();

        let Some(record) = records.iter_mut().find(|r| r.shortcode == shortcode) else {
            tracing::warn!(code = shortcode, "resolve failed: shortcode not found");
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": shortcode }),
            ));
        };

        if record.is_expired(now) {
            tracing::warn!(
                code = shortcode,
                expiry = %record.expiry_at,
                "resolve failed: shortcode expired"
            );
            return Err(AppError::expired(
                "Short link has expired",
                json!({ "code": shortcode, "expiry_at": record.expiry_at }),
            ));
        }

        if !record.active {
            tracing::warn!(code = shortcode, "resolve failed: shortcode inactive");
            return Err(AppError::inactive(
                "Short link is inactive",
                json!({ "code": shortcode }),
            ));
        }

        record.visits += 1;
        let resolved = record.clone();
        self.store.save_all(&records).await?;

        tracing::info!(
            code = %resolved.shortcode,
            url = %resolved.long_url,
            visits = resolved.visits,
            "shortcode resolved"
        );
        Ok(resolved)
    }

    /// Returns every record in insertion order, annotated with its
    /// point-in-time expiry state.
    pub async fn list_all(&self) -> Result<Vec<AnnotatedRecord>, AppError> {
        let records = self.store.load_all().await?;
        let now = self.clock.now();

        tracing::debug!(count = records.len(), "listing registry");
        Ok(records
            .into_iter()
            .map(|record| AnnotatedRecord {
                is_expired: record.is_expired(now),
                record,
            })
            .collect())
    }

    /// Soft-deletes a record so it no longer resolves.
    ///
    /// Idempotent: deactivating an already-inactive record is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no record carries `shortcode`.
    pub async fn deactivate(&self, shortcode: &str) -> Result<UrlRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;

        let Some(record) = records.iter_mut().find(|r| r.shortcode == shortcode) else {
            tracing::warn!(code = shortcode, "deactivate failed: shortcode not found");
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": shortcode }),
            ));
        };

        record.active = false;
        let deactivated = record.clone();
        self.store.save_all(&records).await?;

        tracing::info!(code = %deactivated.shortcode, "shortcode deactivated");
        Ok(deactivated)
    }

    /// Removes a record permanently and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no record carries `shortcode`.
    pub async fn delete_by_code(&self, shortcode: &str) -> Result<UrlRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;

        let Some(index) = records.iter().position(|r| r.shortcode == shortcode) else {
            tracing::warn!(code = shortcode, "delete failed: shortcode not found");
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": shortcode }),
            ));
        };

        let removed = records.remove(index);
        self.store.save_all(&records).await?;

        tracing::info!(code = %removed.shortcode, url = %removed.long_url, "shortcode deleted");
        Ok(removed)
    }

    /// Empties the registry.
    pub async fn clear_all(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        tracing::warn!("clearing all registry data");
        self.store.save_all(&[]).await?;
        tracing::info!("registry cleared");
        Ok(())
    }

    /// Constructs the displayable short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}
