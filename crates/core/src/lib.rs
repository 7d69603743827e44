//! `storefront-core`: shared building blocks for the storefront catalog.
//!
//! This crate contains **pure** primitives (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{CatalogError, CatalogResult};
pub use id::ProductId;
pub use value_object::ValueObject;
