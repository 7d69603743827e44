use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use storefront_core::CatalogResult;
use storefront_products::{query, Category, Page, Product, QueryParams};

use crate::catalog_source::{CatalogSource, CategorySource};

/// Immutable, fully loaded catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Starts at 1; +1 per successful reload.
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn query(&self, params: &QueryParams) -> Page {
        query(&self.products, params)
    }
}

/// Holder of the current catalog snapshot.
///
/// Readers clone the `Arc` and query without holding the lock. A reload builds
/// the replacement completely before swapping, so no reader ever sees a
/// partially loaded catalog.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Initial load. Errors here are fatal to startup.
    pub fn load(
        products: &dyn CatalogSource,
        categories: &dyn CategorySource,
    ) -> CatalogResult<Self> {
        let snapshot = Self::build(products, categories, 1)?;
        tracing::info!(
            products = snapshot.products.len(),
            categories = snapshot.categories.len(),
            source = %products.describe(),
            "catalog loaded"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_parts(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self::from_snapshot(CatalogSnapshot {
            products,
            categories,
            version: 1,
            loaded_at: Utc::now(),
        })
    }

    fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Current snapshot; stays valid even if a reload swaps in a newer one.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        // The guarded value is a plain Arc, so a poisoned lock still holds a
        // complete snapshot.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Run the query pipeline against the current snapshot.
    pub fn query(&self, params: &QueryParams) -> Page {
        self.snapshot().query(params)
    }

    /// Load a new snapshot and swap it in.
    ///
    /// On error the current snapshot is left untouched.
    pub fn reload(
        &self,
        products: &dyn CatalogSource,
        categories: &dyn CategorySource,
    ) -> CatalogResult<Arc<CatalogSnapshot>> {
        let next_version = self.snapshot().version + 1;
        let snapshot = Arc::new(Self::build(products, categories, next_version)?);

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        // Concurrent reloads: keep versions monotonic.
        let snapshot = if current.version >= snapshot.version {
            let mut bumped = (*snapshot).clone();
            bumped.version = current.version + 1;
            Arc::new(bumped)
        } else {
            snapshot
        };
        *current = Arc::clone(&snapshot);
        drop(current);

        tracing::info!(
            version = snapshot.version,
            products = snapshot.products.len(),
            source = %products.describe(),
            "catalog reloaded"
        );
        Ok(snapshot)
    }

    fn build(
        products: &dyn CatalogSource,
        categories: &dyn CategorySource,
        version: u64,
    ) -> CatalogResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            products: products.load()?,
            categories: categories.load()?,
            version,
            loaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use storefront_core::CatalogError;
    use storefront_products::{CategoryFilter, SortKey};

    use crate::catalog_source::{StaticCatalog, StaticCategories};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            Product::new(1u64, "Red Shoe", "shoes", 50.0, 4.0),
            Product::new(2u64, "Blue Shoe", "shoes", 150.0, 4.8),
            Product::new(3u64, "Red Hat", "hats", 20.0, 3.0),
        ])
    }

    fn categories() -> StaticCategories {
        StaticCategories::new(vec![Category::new("shoes", "Shoes"), Category::new("hats", "Hats")])
    }

    /// Fails on demand; used to check reload error handling.
    struct FlakySource {
        inner: StaticCatalog,
        fail: AtomicBool,
    }

    impl CatalogSource for FlakySource {
        fn load(&self) -> CatalogResult<Vec<Product>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CatalogError::transient_io("disk hiccup"));
            }
            self.inner.load()
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[test]
    fn load_builds_first_snapshot() {
        let store = CatalogStore::load(&catalog(), &categories()).unwrap();
        let snap = store.snapshot();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.products.len(), 3);
        assert_eq!(snap.categories.len(), 2);
    }

    #[test]
    fn load_propagates_source_errors() {
        let source = FlakySource {
            inner: catalog(),
            fail: AtomicBool::new(true),
        };
        let err = CatalogStore::load(&source, &categories()).unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn query_runs_against_current_snapshot() {
        let store = CatalogStore::load(&catalog(), &categories()).unwrap();
        let params = QueryParams::new()
            .with_categories(CategoryFilter::single("shoes"))
            .with_sort(SortKey::PriceDesc);

        let page = store.query(&params);
        assert_eq!(page.total_matched, 2);
        assert_eq!(page.items[0].title, "Blue Shoe");
    }

    #[test]
    fn reload_swaps_snapshot_and_bumps_version() {
        let store = CatalogStore::from_parts(vec![], vec![]);
        let before = store.snapshot();

        let after = store.reload(&catalog(), &categories()).unwrap();
        assert_eq!(after.version, 2);
        assert_eq!(store.snapshot().products.len(), 3);

        // Old readers keep their snapshot.
        assert!(before.products.is_empty());
        assert_eq!(before.version, 1);
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let source = FlakySource {
            inner: catalog(),
            fail: AtomicBool::new(false),
        };
        let store = CatalogStore::load(&source, &categories()).unwrap();

        source.fail.store(true, Ordering::SeqCst);
        let err = store.reload(&source, &categories()).unwrap_err();
        assert!(matches!(err, CatalogError::TransientIo(_)));

        let snap = store.snapshot();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.products.len(), 3);
    }

    #[test]
    fn concurrent_queries_see_whole_snapshots() {
        let small = StaticCatalog::new(vec![Product::new(9u64, "Solo", "misc", 1.0, 1.0)]);
        let store = Arc::new(CatalogStore::load(&small, &categories()).unwrap());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let page = store.query(&QueryParams::new());
                        assert!(page.total_matched == 1 || page.total_matched == 3);
                        assert_eq!(page.items.len(), page.total_matched);
                    }
                })
            })
            .collect();

        for _ in 0..20 {
            store.reload(&catalog(), &categories()).unwrap();
            store.reload(&small, &categories()).unwrap();
        }

        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.snapshot().version, 41);
    }
}
