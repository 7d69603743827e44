use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_core::{CatalogError, CatalogResult};
use storefront_products::{
    CategoryFilter, Page, Pagination, PriceBand, PriceRange, Product, QueryParams, SortKey,
};

use crate::config::PageLimits;

// -------------------------
// Request DTOs
// -------------------------

/// Raw `/products` query string.
///
/// Values stay strings so malformed input surfaces as a structured 400 rather
/// than an extractor rejection. Empty values count as absent.
#[derive(Debug, Default)]
pub struct ListProductsQuery {
    pub search: Option<String>,
    /// One slug or a comma-separated list; repeated keys are merged.
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    /// Zero-based offset; need not be a multiple of `limit`.
    pub skip: Option<String>,
    /// 1-based page; alternative to `skip`.
    pub page: Option<String>,
}

impl ListProductsQuery {
    /// Collect decoded `key=value` pairs.
    ///
    /// `category` may repeat (`?category=a&category=b`); any other repeated
    /// key is rejected. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> CatalogResult<Self> {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => {
                    match q.category.as_mut() {
                        Some(joined) => {
                            joined.push(',');
                            joined.push_str(&value);
                        }
                        None => q.category = Some(value),
                    }
                    continue;
                }
                "search" => &mut q.search,
                "minPrice" => &mut q.min_price,
                "maxPrice" => &mut q.max_price,
                "sort" => &mut q.sort,
                "limit" => &mut q.limit,
                "skip" => &mut q.skip,
                "page" => &mut q.page,
                _ => continue,
            };
            if slot.is_some() {
                return Err(CatalogError::invalid_params(format!(
                    "duplicate parameter `{key}`"
                )));
            }
            *slot = Some(value);
        }
        Ok(q)
    }

    pub fn into_params(self, limits: PageLimits) -> CatalogResult<QueryParams> {
        let search = present(self.search).unwrap_or_default();

        let categories: CategoryFilter = present(self.category)
            .map(|raw| raw.split(',').map(str::trim).map(str::to_owned).collect())
            .unwrap_or_default();

        let min: f64 = parse_opt("minPrice", self.min_price)?.unwrap_or(0.0);
        let max: f64 = parse_opt("maxPrice", self.max_price)?.unwrap_or(f64::INFINITY);
        let price = PriceRange::new(min, max)?;

        let sort = match present(self.sort) {
            Some(raw) => raw.parse::<SortKey>()?,
            None => SortKey::default(),
        };

        let limit: usize = parse_opt("limit", self.limit)?.unwrap_or(limits.default);
        if limit > limits.max {
            return Err(CatalogError::invalid_params(format!(
                "limit must be <= {}",
                limits.max
            )));
        }

        let skip: Option<usize> = parse_opt("skip", self.skip)?;
        let page: Option<usize> = parse_opt("page", self.page)?;
        let pagination = match (skip, page) {
            (Some(_), Some(_)) => {
                return Err(CatalogError::invalid_params("use either skip or page, not both"));
            }
            (_, Some(page)) => Pagination::page(page, limit)?,
            (skip, None) => Pagination::skip(skip.unwrap_or(0), limit)?,
        };

        Ok(QueryParams {
            search,
            categories,
            price,
            sort,
            pagination,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_opt<T: FromStr>(name: &str, value: Option<String>) -> CatalogResult<Option<T>> {
    present(value)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                CatalogError::invalid_params(format!("{name} is not a valid number: {raw:?}"))
            })
        })
        .transpose()
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub total: usize,
    pub products: Vec<Product>,
    pub skip: usize,
    pub limit: usize,
}

impl From<Page> for ProductListResponse {
    fn from(page: Page) -> Self {
        Self {
            total: page.total_matched,
            products: page.items,
            skip: page.offset,
            limit: page.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceBandsResponse {
    pub default: PriceBand,
    pub bands: Vec<PriceBand>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog_version: u64,
    pub products: usize,
    pub loaded_at: DateTime<Utc>,
}
