//! Catalog source boundary.
//!
//! A source yields the full, ordered product list (or category list) each time
//! it is loaded. Sources do no category or price validation: unknown values
//! simply match nothing downstream.

use std::sync::Arc;

use storefront_core::CatalogResult;
use storefront_products::{Category, Product};

pub mod in_memory;
pub mod json_file;

pub use in_memory::{StaticCatalog, StaticCategories};
pub use json_file::{parse_categories, parse_products, JsonFileCatalog, JsonFileCategories};

/// Ordered product data behind the query pipeline.
///
/// `load` is idempotent: repeated calls return the same logical set as long as
/// the backing data is unchanged.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> CatalogResult<Vec<Product>>;

    /// Human-readable origin (path, "static", ...) for logs.
    fn describe(&self) -> String;
}

/// Known categories, independent of the product pipeline.
pub trait CategorySource: Send + Sync {
    fn load(&self) -> CatalogResult<Vec<Category>>;

    fn describe(&self) -> String;
}

impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    fn load(&self) -> CatalogResult<Vec<Product>> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S> CategorySource for Arc<S>
where
    S: CategorySource + ?Sized,
{
    fn load(&self) -> CatalogResult<Vec<Category>> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
