//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic beyond derived
//! predicates. [`UrlRecord`] is also the persisted wire shape: the registry
//! blob is a JSON array of records.

pub mod url_record;

pub use url_record::{AnnotatedRecord, UrlRecord};
