//! Memoization for bundled resources
//!
//! Entries are computed once per logical path and never evicted. Callers
//! racing on the same path wait on that path's cell for the single
//! in-flight load.

use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

type Slot<D> = Arc<OnceLock<Arc<D>>>;

/// Write-once cache keyed by logical resource path
pub struct ResourceCache<D> {
    slots: DashMap<String, Slot<D>>,
}

impl<D> ResourceCache<D> {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Return the cached value for `path`, computing it with `load` on first use
    ///
    /// `load` runs at most once per path for the lifetime of the cache, even
    /// when several threads ask for the same path at the same time.
    pub fn get_or_load<F>(&self, path: &str, load: F) -> Arc<D>
    where
        F: FnOnce() -> D,
    {
        let slot = self.slot(path);
        if let Some(dict) = slot.get() {
            debug!("Resource cache hit: {}", path);
            return Arc::clone(dict);
        }
        Arc::clone(slot.get_or_init(|| Arc::new(load())))
    }

    /// Return the cached value for `path` without loading
    pub fn get(&self, path: &str) -> Option<Arc<D>> {
        self.slots.get(path).and_then(|slot| slot.get().cloned())
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, path: &str) -> Slot<D> {
        if let Some(slot) = self.slots.get(path) {
            return Arc::clone(slot.value());
        }
        let slot = self.slots.entry(path.to_string()).or_default();
        Arc::clone(slot.value())
    }
}

impl<D> Default for ResourceCache<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn loads_once_per_path() {
        let cache = ResourceCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache.get_or_load("a", || {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![1, 2]
        });
        let second = cache.get_or_load("a", || {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![3]
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, vec![1, 2]);
    }

    #[test]
    fn paths_are_independent() {
        let cache = ResourceCache::new();
        cache.get_or_load("a", || 1);
        cache.get_or_load("b", || 2);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").as_deref(), Some(&1));
        assert_eq!(cache.get("b").as_deref(), Some(&2));
        assert!(cache.get("c").is_none());
    }

    #[test]
    fn empty_until_loaded() {
        let cache: ResourceCache<u8> = ResourceCache::default();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn concurrent_callers_share_one_load() {
        const THREADS: usize = 8;
        let cache = ResourceCache::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);
        let (cache, calls, barrier) = (&cache, &calls, &barrier);

        let results: Vec<Arc<String>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(move || {
                        barrier.wait();
                        cache.get_or_load("shared", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(20));
                            "value".to_string()
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }
}
