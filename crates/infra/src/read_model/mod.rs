//! Read-side catalog storage: immutable snapshots swapped atomically.

pub mod catalog_store;

pub use catalog_store::{CatalogSnapshot, CatalogStore};
