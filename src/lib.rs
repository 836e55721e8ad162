//! # Shortreg
//!
//! A URL shortcode registry: maps long URLs to short unique codes, resolves
//! codes back to their targets while they remain valid, and tracks per-code
//! visit counts.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, the registry store trait,
//!   and the clock abstraction
//! - **Application Layer** ([`application`]) - Registry and statistics services
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value blob persistence
//!
//! ## Features
//!
//! - Collision-free random shortcode allocation with custom-code support
//! - Per-record time-to-live with lazy expiry (no background sweeper)
//! - Durable visit counters and top-URL statistics
//! - Atomic whole-registry persistence over a pluggable key-value store
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: where the registry blob lives (default: ./data)
//! export STORE_DIR="/var/lib/shortreg"
//!
//! # Shorten, resolve, inspect
//! cargo run -- shorten https://example.com/a --validity 60
//! cargo run -- resolve abc123
//! cargo run -- stats
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RegistryService, RegistryStats, StatsService, TopUrl};
    pub use crate::domain::clock::{Clock, SystemClock};
    pub use crate::domain::entities::{AnnotatedRecord, UrlRecord};
    pub use crate::domain::repositories::RegistryStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{
        FileKvStore, JsonRegistryStore, KvStore, MemoryKvStore,
    };
}
