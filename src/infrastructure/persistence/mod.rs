//! Registry persistence over a generic key-value blob medium.
//!
//! The persistence boundary is deliberately narrow: [`KvStore`] exposes
//! `get`/`set` of opaque blobs, and [`JsonRegistryStore`] implements the
//! domain's [`crate::domain::repositories::RegistryStore`] contract on top
//! of it. The serialization format is an implementation detail of this
//! module, not a compatibility surface.

pub mod file_kv;
pub mod json_store;
pub mod kv;

pub use file_kv::FileKvStore;
pub use json_store::JsonRegistryStore;
pub use kv::{KvStore, MemoryKvStore};
