//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any command
//! runs.
//!
//! ## Variables
//!
//! ```bash
//! export STORE_DIR="./data"                # directory holding the registry blob
//! export STORE_KEY="url_registry_data"     # blob key (file name) inside STORE_DIR
//! export BASE_URL="https://s.test.com"     # base used when printing short URLs
//! export DEFAULT_VALIDITY_MINUTES="30"     # TTL applied when a request omits one
//! export RUST_LOG="info"                   # log level filter
//! export LOG_FORMAT="text"                 # text | json
//! ```
//!
//! All variables are optional; the defaults above apply when unset.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Upper bound for the default validity window: one year in minutes.
const MAX_VALIDITY_MINUTES: i64 = 525_600;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the key-value store roots its blobs in.
    pub store_dir: PathBuf,
    /// Key the registry collection is persisted under.
    pub store_key: String,
    /// Base URL prepended to shortcodes for display.
    pub base_url: String,
    /// Validity window (minutes) applied when a shorten request omits one.
    pub default_validity_minutes: i64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let store_dir = env::var("STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let store_key =
            env::var("STORE_KEY").unwrap_or_else(|_| "url_registry_data".to_string());

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "https://s.test.com".to_string());

        let default_validity_minutes = env::var("DEFAULT_VALIDITY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            store_dir,
            store_key,
            base_url,
            default_validity_minutes,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `store_key` is empty or contains a path separator
    /// - `base_url` is not an absolute http(s) URL
    /// - `default_validity_minutes` is outside `1..=525600`
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.store_key.is_empty() {
            anyhow::bail!("STORE_KEY must not be empty");
        }

        // The key names a single file under STORE_DIR; it must not escape it.
        if self.store_key.contains('/') || self.store_key.contains('\\') {
            anyhow::bail!(
                "STORE_KEY must not contain path separators, got '{}'",
                self.store_key
            );
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => anyhow::bail!(
                "BASE_URL must use http or https, got scheme '{}'",
                parsed.scheme()
            ),
            Err(e) => anyhow::bail!("BASE_URL is not a valid URL: {e}"),
        }

        if self.default_validity_minutes < 1 || self.default_validity_minutes > MAX_VALIDITY_MINUTES
        {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be between 1 and {}, got {}",
                MAX_VALIDITY_MINUTES,
                self.default_validity_minutes
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Store: {}/{}", self.store_dir.display(), self.store_key);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!(
            "  Default validity: {} minutes",
            self.default_validity_minutes
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
