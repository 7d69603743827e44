//! Products catalog module.
//!
//! This crate contains the product record shapes and the filter/sort/paginate
//! query pipeline, implemented purely as deterministic logic (no IO, no HTTP,
//! no storage).

pub mod price_band;
pub mod product;
pub mod query;

pub use price_band::{PriceBand, DEFAULT_PRICE_BAND, PRICE_BANDS};
pub use product::{Category, Product};
pub use query::{
    query, CategoryFilter, Page, Pagination, PriceRange, QueryParams, SortKey, DEFAULT_PAGE_SIZE,
};
