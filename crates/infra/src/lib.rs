//! Infrastructure layer: catalog data sources and the shared catalog snapshot.

pub mod catalog_source;
pub mod read_model;

pub use catalog_source::{
    CatalogSource, CategorySource, JsonFileCatalog, JsonFileCategories, StaticCatalog,
    StaticCategories,
};
pub use read_model::{CatalogSnapshot, CatalogStore};
