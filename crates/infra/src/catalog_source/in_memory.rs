use storefront_core::CatalogResult;
use storefront_products::{Category, Product};

use super::{json_file, CatalogSource, CategorySource};

/// Memory-resident catalog (fixtures, tests, client-side browsing).
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog document with the same rules as the file source.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(Self::new(json_file::parse_products(json)?))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogSource for StaticCatalog {
    fn load(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} products)", self.products.len())
    }
}

/// Memory-resident category list.
#[derive(Debug, Clone, Default)]
pub struct StaticCategories {
    categories: Vec<Category>,
}

impl StaticCategories {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

impl CategorySource for StaticCategories {
    fn load(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} categories)", self.categories.len())
    }
}
