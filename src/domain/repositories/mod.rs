//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for registry persistence; concrete
//! implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are auto-generated via `mockall` for testing.

pub mod registry_store;

pub use registry_store::RegistryStore;

#[cfg(test)]
pub use registry_store::MockRegistryStore;
