use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::{Notify, watch};
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use vitrine_core::QueryController;
use vitrine_model::{
    Filter, OrderBy, Page, PageSummary, QueryDefaults, QueryState, Resource, SearchKey,
};

use crate::{cache::PageCache, error::ClientError, fetch::Fetch};

/// Per-query knobs supplied at initialization time.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// While `false`, state mutations apply locally but no request fires.
    /// Useful when a dependent resource (e.g. the session, or a parent
    /// record) is still loading.
    pub enabled: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl QueryOptions {
    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// Read-model published to the caller after every driver step.
pub struct QuerySnapshot<R> {
    /// Latest page of records, unwrapped from the envelope. `None` until the
    /// first response arrives; on errors the previous value is kept.
    pub data: Option<Arc<Vec<R>>>,
    /// The "showing X to Y of Z" read-out from the latest response.
    pub summary: Option<PageSummary>,
    pub next_page_available: bool,
    pub previous_page_available: bool,
    /// No data yet: first load still pending.
    pub is_loading: bool,
    /// A request is pending or in flight; stale data may be on display.
    pub is_fetching: bool,
    pub error: Option<String>,
}

impl<R> QuerySnapshot<R> {
    fn initial() -> Self {
        Self {
            data: None,
            summary: None,
            next_page_available: false,
            previous_page_available: false,
            is_loading: true,
            is_fetching: false,
            error: None,
        }
    }
}

// Manual impl: `Arc<Vec<R>>` clones without requiring `R: Clone`.
impl<R> Clone for QuerySnapshot<R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            summary: self.summary,
            next_page_available: self.next_page_available,
            previous_page_available: self.previous_page_available,
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
        }
    }
}

/// Handle to one resource's debounced, cached collection query.
///
/// Owns a background driver task that waits for mutations to settle, renders
/// the query string, and fetches through the [`Fetch`] seam. The handle is
/// the single owner (views subscribe through [`ResourceQuery::subscribe`]);
/// dropping it cancels the driver, so an in-flight response for a dead view
/// is discarded rather than applied.
pub struct ResourceQuery<R: Resource> {
    inner: Arc<Inner<R>>,
}

struct Inner<R: Resource> {
    path: String,
    controller: RwLock<QueryController<R::Field>>,
    enabled: AtomicBool,
    skip_debounce: AtomicBool,
    force_refresh: AtomicBool,
    fetcher: Arc<dyn Fetch>,
    cache: PageCache,
    debounce: Duration,
    wake: Notify,
    snapshot_tx: watch::Sender<QuerySnapshot<R>>,
    cancel: CancellationToken,
}

impl<R> ResourceQuery<R>
where
    R: Resource + DeserializeOwned + Send + Sync + 'static,
{
    pub(crate) fn new(
        path: String,
        defaults: QueryDefaults<R::Field>,
        options: QueryOptions,
        fetcher: Arc<dyn Fetch>,
        cache: PageCache,
        debounce: Duration,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(QuerySnapshot::initial());
        let inner = Arc::new(Inner {
            path,
            controller: RwLock::new(QueryController::new(defaults)),
            enabled: AtomicBool::new(options.enabled),
            skip_debounce: AtomicBool::new(false),
            force_refresh: AtomicBool::new(false),
            fetcher,
            cache,
            debounce,
            wake: Notify::new(),
            snapshot_tx,
            cancel: CancellationToken::new(),
        });

        tokio::spawn(drive(Arc::clone(&inner)));
        // Schedule the initial fetch.
        inner.wake.notify_one();

        Self { inner }
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Current read-model.
    pub fn snapshot(&self) -> QuerySnapshot<R> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Change stream for reactive views. Each driver step publishes once.
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot<R>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Copy of the local query state, e.g. for rendering active filters.
    pub fn state(&self) -> QueryState<R::Field> {
        self.inner.controller.read().unwrap().state().clone()
    }

    pub fn set_search_key(&self, search: Option<SearchKey<R::Field>>) {
        self.mutate(|ctl| ctl.set_search_key(search));
    }

    pub fn set_order_by(&self, order_by: Option<OrderBy<R::Field>>) {
        self.mutate(|ctl| ctl.set_order_by(order_by));
    }

    pub fn set_filter(&self, filter: Option<Filter<R::Field>>) {
        self.mutate(|ctl| ctl.set_filter(filter));
    }

    pub fn set_limit(&self, limit: Option<u32>) {
        self.mutate(|ctl| ctl.set_limit(limit));
    }

    pub fn set_page(&self, page: u32) {
        self.mutate(|ctl| ctl.set_page(page));
    }

    /// Advance a page if the latest response says one exists; no-op at the
    /// last page.
    pub fn next_page(&self) {
        self.mutate(|ctl| {
            ctl.next_page();
        });
    }

    /// Go back a page; no-op on page 1.
    pub fn previous_page(&self) {
        self.mutate(|ctl| {
            ctl.previous_page();
        });
    }

    /// Restore the defaults supplied at initialization time.
    pub fn reset_query_state(&self) {
        self.mutate(|ctl| ctl.reset());
    }

    /// Gate network activity. Re-enabling requests the latest settled state
    /// immediately, without waiting out another debounce window (the state
    /// already settled while the query was disabled).
    pub fn set_enabled(&self, enabled: bool) {
        let was_enabled = self.inner.enabled.swap(enabled, Ordering::SeqCst);
        if enabled && !was_enabled {
            self.inner.skip_debounce.store(true, Ordering::SeqCst);
            self.inner.wake.notify_one();
        }
    }

    /// Manual retry: re-request the current state, skipping the cache.
    pub fn refetch(&self) {
        self.inner.force_refresh.store(true, Ordering::SeqCst);
        self.inner.wake.notify_one();
    }

    // Apply a mutation and wake the driver, but only when the controller
    // actually changed (ignored mutations stay silent, so a no-op does not
    // trigger a redundant request).
    fn mutate(&self, f: impl FnOnce(&mut QueryController<R::Field>)) {
        let changed = {
            let mut ctl = self.inner.controller.write().unwrap();
            let before = ctl.generation();
            f(&mut ctl);
            ctl.generation() != before
        };
        if changed {
            self.inner.wake.notify_one();
        }
    }
}

impl<R: Resource> Drop for ResourceQuery<R> {
    fn drop(&mut self) {
        self.inner.cancel.cancel();
    }
}

/// Driver loop: wait for a mutation, let the burst settle, fetch once.
///
/// Requests are issued sequentially from this single task, so responses
/// apply in issue order; a mutation landing mid-flight leaves a stored wake
/// permit and triggers a follow-up round after the current request resolves.
async fn drive<R>(inner: Arc<Inner<R>>)
where
    R: Resource + DeserializeOwned + Send + Sync + 'static,
{
    loop {
        tokio::select! {
            _ = inner.cancel.cancelled() => return,
            _ = inner.wake.notified() => {}
        }

        // Debounce: restart the quiet window while mutations keep arriving.
        // The re-enable path skips it; its state settled while disabled.
        if !inner.skip_debounce.swap(false, Ordering::SeqCst) {
            loop {
                tokio::select! {
                    _ = inner.cancel.cancelled() => return,
                    _ = inner.wake.notified() => continue,
                    _ = tokio::time::sleep(inner.debounce) => break,
                }
            }
        }

        if !inner.enabled.load(Ordering::SeqCst) {
            continue;
        }

        inner.run_fetch().await;
    }
}

impl<R> Inner<R>
where
    R: Resource + DeserializeOwned + Send + Sync + 'static,
{
    async fn run_fetch(&self) {
        let (query, generation) = {
            let ctl = self.controller.read().unwrap();
            (ctl.to_params().to_query_string(), ctl.generation())
        };
        trace!(path = %self.path, generation, %query, "query state settled");

        let key = PageCache::key(&self.path, &query);
        let force = self.force_refresh.swap(false, Ordering::SeqCst);

        // Stale-while-revalidate: a previously seen page shows up
        // immediately, flagged as refreshing.
        let mut revalidating = false;
        if !force && let Some(payload) = self.cache.get(&key) {
            match serde_json::from_value::<Page<R>>(payload) {
                Ok(page) => {
                    self.apply_page(page, true);
                    revalidating = true;
                }
                Err(_) => self.cache.invalidate(&key),
            }
        }
        if !revalidating {
            self.publish_pending();
        }

        match self.fetcher.fetch_page(&self.path, &query).await {
            Ok(payload) => match serde_json::from_value::<Page<R>>(payload.clone()) {
                Ok(page) => {
                    self.cache.put(key, payload);
                    self.apply_page(page, false);
                }
                Err(e) => {
                    let err = ClientError::InvalidResponse(format!("failed to parse page: {e}"));
                    warn!(path = %self.path, error = %err, "page fetch failed");
                    self.publish_error(err.to_string());
                }
            },
            Err(e) => {
                warn!(path = %self.path, error = %e, "page fetch failed");
                self.publish_error(e.to_string());
            }
        }
    }

    fn apply_page(&self, page: Page<R>, revalidating: bool) {
        let meta = page.meta();
        self.controller.write().unwrap().apply_meta(meta);
        self.snapshot_tx.send_modify(|snap| {
            snap.data = Some(Arc::new(page.data));
            snap.summary = Some(meta.summary());
            snap.next_page_available = meta.has_next();
            snap.previous_page_available = meta.has_previous();
            snap.is_loading = false;
            snap.is_fetching = revalidating;
            snap.error = None;
        });
    }

    fn publish_pending(&self) {
        self.snapshot_tx.send_modify(|snap| {
            snap.is_fetching = true;
            snap.is_loading = snap.data.is_none();
        });
    }

    fn publish_error(&self, message: String) {
        self.snapshot_tx.send_modify(|snap| {
            snap.is_fetching = false;
            snap.is_loading = false;
            snap.error = Some(message);
        });
    }
}
