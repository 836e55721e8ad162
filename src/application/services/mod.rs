//! Business logic services.
//!
//! - [`RegistryService`] - shorten, resolve, list, and delete operations
//! - [`StatsService`] - aggregate registry statistics

pub mod registry_service;
pub mod stats_service;

pub use registry_service::RegistryService;
pub use stats_service::{RegistryStats, StatsService, TopUrl};
