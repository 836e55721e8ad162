//! Infrastructure layer: concrete persistence behind the domain traits.

pub mod persistence;
