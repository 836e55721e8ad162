//! Crate-wide error type covering every user-facing failure.
//!
//! All variants are recoverable outcomes returned to the caller as values;
//! nothing here is process-fatal. Storage corruption is the one failure the
//! registry store recovers from locally (empty registry) and therefore has
//! no variant of its own.

use serde_json::Value;

/// User-facing error taxonomy for registry operations.
///
/// Each variant carries a human-readable message and a structured `details`
/// payload for the hosting application to render or log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted long URL fails absolute-URL syntax validation.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// A custom shortcode fails the 4-12 alphanumeric syntax rule.
    #[error("{message}")]
    InvalidShortcode { message: String, details: Value },

    /// A custom shortcode collides with a live registry entry.
    #[error("{message}")]
    ShortcodeExists { message: String, details: Value },

    /// The resolution or deletion target does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The target exists but its validity window has elapsed.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// The target has been soft-deleted.
    #[error("{message}")]
    Inactive { message: String, details: Value },

    /// Store I/O or serialization failure.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_shortcode(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidShortcode {
            message: message.into(),
            details,
        }
    }

    pub fn shortcode_exists(message: impl Into<String>, details: Value) -> Self {
        Self::ShortcodeExists {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn inactive(message: impl Into<String>, details: Value) -> Self {
        Self::Inactive {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the variant.
    ///
    /// Hosting applications key their rendering off this rather than the
    /// message text.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidShortcode { .. } => "invalid_shortcode",
            AppError::ShortcodeExists { .. } => "shortcode_exists",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::Inactive { .. } => "inactive",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Structured details payload attached to the error.
    pub fn details(&self) -> &Value {
        match self {
            AppError::InvalidUrl { details, .. }
            | AppError::InvalidShortcode { details, .. }
            | AppError::ShortcodeExists { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Expired { details, .. }
            | AppError::Inactive { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }
}
