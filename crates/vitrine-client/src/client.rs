use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use vitrine_model::{QueryDefaults, Resource};

use crate::{
    cache::PageCache,
    config::ClientConfig,
    error::ClientError,
    fetch::{Fetch, HttpFetcher},
    manager::{QueryOptions, ResourceQuery},
    session::SessionContext,
};

/// Entry point: builds per-resource query handles over one shared transport
/// and one shared page cache.
pub struct StorefrontClient {
    fetcher: Arc<dyn Fetch>,
    cache: PageCache,
    debounce: Duration,
}

impl StorefrontClient {
    /// Anonymous client (public storefront browsing).
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let debounce = config.debounce;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), debounce))
    }

    /// Authenticated client (buyer history, seller and admin dashboards).
    pub fn with_session(config: ClientConfig, session: SessionContext) -> Result<Self, ClientError> {
        let debounce = config.debounce;
        let fetcher = HttpFetcher::new(&config)?.with_session(session);
        Ok(Self::with_fetcher(Arc::new(fetcher), debounce))
    }

    /// Build over a custom transport; the seam used to substitute a fake
    /// backend in tests.
    pub fn with_fetcher(fetcher: Arc<dyn Fetch>, debounce: Duration) -> Self {
        Self {
            fetcher,
            cache: PageCache::new(),
            debounce,
        }
    }

    /// The shared page cache, e.g. for an explicit `clear` on logout.
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Query a resource at its canonical collection path.
    pub fn query<R>(&self, defaults: QueryDefaults<R::Field>) -> ResourceQuery<R>
    where
        R: Resource + DeserializeOwned + Send + Sync + 'static,
    {
        self.query_with(defaults, QueryOptions::default())
    }

    /// Query a resource with explicit options (e.g. initially disabled).
    pub fn query_with<R>(
        &self,
        defaults: QueryDefaults<R::Field>,
        options: QueryOptions,
    ) -> ResourceQuery<R>
    where
        R: Resource + DeserializeOwned + Send + Sync + 'static,
    {
        ResourceQuery::new(
            R::PATH.to_string(),
            defaults,
            options,
            Arc::clone(&self.fetcher),
            self.cache.clone(),
            self.debounce,
        )
    }

    /// Query a resource at a non-canonical path, e.g. a store's own product
    /// listing at `stores/7/products`.
    pub fn query_at<R>(
        &self,
        path: impl Into<String>,
        defaults: QueryDefaults<R::Field>,
    ) -> ResourceQuery<R>
    where
        R: Resource + DeserializeOwned + Send + Sync + 'static,
    {
        ResourceQuery::new(
            path.into(),
            defaults,
            QueryOptions::default(),
            Arc::clone(&self.fetcher),
            self.cache.clone(),
            self.debounce,
        )
    }
}
