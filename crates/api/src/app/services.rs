use std::sync::Arc;
use std::time::Duration;

use storefront_core::CatalogResult;
use storefront_infra::{
    CatalogSnapshot, CatalogSource, CatalogStore, CategorySource, JsonFileCatalog,
    JsonFileCategories,
};
use storefront_products::{Page, QueryParams};

use crate::config::{ApiConfig, PageLimits};

/// Shared application services: the catalog snapshot plus where it came from.
pub struct AppServices {
    store: CatalogStore,
    products_source: Arc<dyn CatalogSource>,
    categories_source: Arc<dyn CategorySource>,
    page_limits: PageLimits,
}

impl AppServices {
    /// Load the catalog once. Errors are fatal to startup.
    pub fn new(
        products_source: Arc<dyn CatalogSource>,
        categories_source: Arc<dyn CategorySource>,
        page_limits: PageLimits,
    ) -> CatalogResult<Self> {
        let store = CatalogStore::load(products_source.as_ref(), categories_source.as_ref())?;
        Ok(Self {
            store,
            products_source,
            categories_source,
            page_limits,
        })
    }

    pub fn from_config(config: &ApiConfig) -> CatalogResult<Self> {
        Self::new(
            Arc::new(JsonFileCatalog::new(&config.catalog_path)),
            Arc::new(JsonFileCategories::new(&config.categories_path)),
            config.page_limits,
        )
    }

    pub fn page_limits(&self) -> PageLimits {
        self.page_limits
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.store.snapshot()
    }

    pub fn query_products(&self, params: &QueryParams) -> Page {
        self.store.query(params)
    }

    /// Re-read both sources and swap in the new snapshot.
    pub fn reload(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        self.store
            .reload(self.products_source.as_ref(), self.categories_source.as_ref())
    }

    /// Reload every `every`; failures keep the previous snapshot.
    pub fn spawn_reload_task(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let services = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick fires immediately; startup already loaded.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let svc = Arc::clone(&services);
                match tokio::task::spawn_blocking(move || svc.reload()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => {
                        tracing::warn!(error = %e, transient = e.is_transient(), "catalog reload failed");
                    }
                    Err(e) => tracing::warn!("catalog reload task failed: {e}"),
                }
            }
        })
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("catalog", &self.products_source.describe())
            .field("categories", &self.categories_source.describe())
            .field("page_limits", &self.page_limits)
            .finish()
    }
}
