//! Repository trait for the persisted URL registry.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store for the full URL registry.
///
/// The registry is persisted as one collection: implementations load and
/// replace it wholesale. There is no row-level access; callers follow the
/// load-snapshot, compute-next-state, persist-snapshot discipline.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonRegistryStore`] - JSON blob
///   over any key-value medium
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Loads every persisted record, in insertion order.
    ///
    /// Returns an empty collection when nothing has been persisted yet, or
    /// when the stored blob cannot be parsed. Corruption is logged by the
    /// implementation and treated as an empty registry; it never fails the
    /// calling operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the underlying medium cannot be
    /// read at all.
    async fn load_all(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Replaces the entire persisted collection with `records`.
    ///
    /// Atomic from the caller's perspective: a concurrent `load_all` sees
    /// either the previous collection or this one, never a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when serialization or the write fails.
    async fn save_all(&self, records: &[UrlRecord]) -> Result<(), AppError>;
}
