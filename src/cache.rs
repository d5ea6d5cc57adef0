use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;
use url::Url;

/// In-memory LRU of built views keyed by resource URL.
///
/// Views are created at most once while resident: a lookup that misses builds
/// the view under the lock, so concurrent first accesses share one instance.
/// Evicted views are rebuilt on the next access.
pub struct ViewCache<V> {
    entries: Mutex<LruCache<Url, Arc<V>>>,
}

impl<V> fmt::Debug for ViewCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.entries.try_lock().map(|c| c.len());
        f.debug_struct("ViewCache")
            .field("size", &size)
            .finish_non_exhaustive()
    }
}

impl<V> ViewCache<V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get_or_insert_with(&self, url: &Url, build: impl FnOnce() -> V) -> Arc<V> {
        let mut entries = self.entries.lock();
        if let Some(view) = entries.get(url) {
            trace!("View cache hit for {}", url);
            return Arc::clone(view);
        }

        let view = Arc::new(build());
        if let Some((evicted, _)) = entries.push(url.clone(), Arc::clone(&view)) {
            if &evicted != url {
                trace!("Evicted cached view for {}", evicted);
            }
        }
        view
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.entries.lock().contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
