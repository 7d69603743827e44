//! Filter/sort/paginate query pipeline over an in-memory catalog.
//!
//! The same pipeline backs the HTTP endpoint and client-side (in-memory)
//! browsing. Stages run in a fixed order: search, category, price, sort,
//! paginate.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{CatalogError, CatalogResult, ValueObject};

use crate::product::Product;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Catalog (insertion) order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Rating => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(SortKey::Featured),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            other => Err(CatalogError::invalid_params(format!(
                "sort must be one of: featured, price_asc, price_desc, rating (got {other:?})"
            ))),
        }
    }
}

/// Selected categories. Empty means "no category filter".
///
/// A single selection behaves exactly like single-category filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter(BTreeSet<String>);

impl CategoryFilter {
    pub fn any() -> Self {
        Self::default()
    }

    /// Select one category. An empty slug selects nothing, i.e. no filter.
    pub fn single(slug: impl Into<String>) -> Self {
        let slug: String = slug.into();
        std::iter::once(slug).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    /// Membership test; always true when nothing is selected.
    pub fn matches(&self, category: &str) -> bool {
        self.is_empty() || self.contains(category)
    }
}

impl FromIterator<String> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|s| !s.is_empty()).collect())
    }
}

impl<'a> FromIterator<&'a str> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}

impl ValueObject for CategoryFilter {}

/// Inclusive price bounds.
///
/// `min > max` is a valid (empty) range: it matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// `[0, +inf]`.
    pub const FULL: PriceRange = PriceRange {
        min: 0.0,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> CatalogResult<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(CatalogError::invalid_params("price bounds must be numbers"));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl ValueObject for PriceRange {}

/// Result window: `limit` items starting at `offset` of the sorted match set.
///
/// Only the validated constructors build one, so `limit` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    offset: usize,
    limit: usize,
}

impl Pagination {
    /// 1-based page of `page_size` items.
    ///
    /// Any page past the end is valid; its offset saturates and the window
    /// comes back empty.
    pub fn page(page: usize, page_size: usize) -> CatalogResult<Self> {
        if page < 1 {
            return Err(CatalogError::invalid_params("page must be >= 1"));
        }
        if page_size == 0 {
            return Err(CatalogError::invalid_params("page size must be >= 1"));
        }
        Ok(Self {
            offset: (page - 1).saturating_mul(page_size),
            limit: page_size,
        })
    }

    /// Arbitrary zero-based offset; need not be a multiple of `limit`.
    pub fn skip(skip: usize, limit: usize) -> CatalogResult<Self> {
        if limit == 0 {
            return Err(CatalogError::invalid_params("limit must be >= 1"));
        }
        Ok(Self {
            offset: skip,
            limit,
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 1-based page the window starts on (`floor(offset / limit) + 1`).
    pub fn page_number(&self) -> usize {
        self.offset / self.limit + 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ValueObject for Pagination {}

/// Per-request query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    /// Case-insensitive substring matched against the title. Empty = no filter.
    pub search: String,
    pub categories: CategoryFilter,
    pub price: PriceRange,
    pub sort: SortKey,
    pub pagination: Pagination,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_categories(mut self, categories: CategoryFilter) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Whether `product` passes the search, category and price filters.
    pub fn matches(&self, product: &Product) -> bool {
        Filters::new(self).matches(product)
    }
}

impl ValueObject for QueryParams {}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Product>,
    /// Matches before pagination.
    pub total_matched: usize,
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total_matched
    }

    /// `ceil(total_matched / limit)`.
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total_matched.div_ceil(self.limit)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ValueObject for Page {}

/// Run the pipeline: search -> category -> price -> stable sort -> window.
///
/// Total over valid parameters; an out-of-range window yields no items but
/// `total_matched` still reports the full match count.
pub fn query(products: &[Product], params: &QueryParams) -> Page {
    let filters = Filters::new(params);

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| filters.matches_search(p))
        .filter(|p| filters.matches_category(p))
        .filter(|p| filters.matches_price(p))
        .collect();

    // `sort_by` is stable: equal keys keep their filtered order.
    match params.sort {
        SortKey::Featured => {}
        SortKey::PriceAsc => matched.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    let total_matched = matched.len();
    let Pagination { offset, limit } = params.pagination;
    let items = matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    Page {
        items,
        total_matched,
        offset,
        limit,
    }
}

/// Filter predicates with the search needle case-folded once.
struct Filters<'a> {
    needle: String,
    categories: &'a CategoryFilter,
    price: PriceRange,
}

impl<'a> Filters<'a> {
    fn new(params: &'a QueryParams) -> Self {
        Self {
            needle: params.search.to_lowercase(),
            categories: &params.categories,
            price: params.price,
        }
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.needle.is_empty() || product.title.to_lowercase().contains(&self.needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.matches(&product.category)
    }

    fn matches_price(&self, product: &Product) -> bool {
        self.price.contains(product.price)
    }

    fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product) && self.matches_price(product)
    }
}
