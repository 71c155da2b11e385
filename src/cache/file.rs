//! Memoization for dictionary files with staleness checks
//!
//! Each entry remembers the file's modification time as observed right
//! after the read. An entry whose time no longer matches the file is
//! evicted and reloaded within the same call. A failed load leaves no
//! entry behind, so the next call retries, and the path's key is dropped
//! from the map once nobody else is waiting on it.
//!
//! # Entry States
//!
//! | State | Slot | Next call |
//! |-------|------|-----------|
//! | Miss | `None` | loads |
//! | Valid | `Some`, time matches | returns cached value |
//! | Stale | `Some`, time differs | evicts, then loads |

use dashmap::DashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;
use tracing::debug;

/// A loaded dictionary and the file time it was read at
#[derive(Debug)]
struct FileEntry<D> {
    dict: Arc<D>,
    modified: SystemTime,
}

type Slot<D> = Arc<Mutex<Option<FileEntry<D>>>>;

/// Cache keyed by file path, invalidated by modification time
///
/// Callers are expected to pass canonical paths so that two spellings of
/// the same file share one entry.
pub struct FileCache<D> {
    slots: DashMap<PathBuf, Slot<D>>,
}

impl<D> FileCache<D> {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Return the cached value for `path` if still fresh, loading it otherwise
    ///
    /// The per-path lock is held across the freshness check, eviction, load
    /// and store, so concurrent callers for one path trigger a single load
    /// and never observe a value paired with the wrong timestamp.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> io::Result<Arc<D>>
    where
        F: FnOnce(&Path) -> io::Result<D>,
    {
        let slot = self.slot(path);
        let result = Self::refresh(&slot, path, load);
        if result.is_err() {
            self.forget_if_empty(path, &slot);
        }
        result
    }

    fn refresh<F>(slot: &Slot<D>, path: &Path, load: F) -> io::Result<Arc<D>>
    where
        F: FnOnce(&Path) -> io::Result<D>,
    {
        let mut entry = lock(slot);

        let current = modified_time(path)?;
        if let Some(cached) = entry.as_ref() {
            if cached.modified == current {
                debug!("File cache hit: {}", path.display());
                return Ok(Arc::clone(&cached.dict));
            }
            debug!("{} changed on disk, evicting cached entry", path.display());
            *entry = None;
        }

        let dict = Arc::new(load(path)?);
        let modified = modified_time(path)?;
        *entry = Some(FileEntry {
            dict: Arc::clone(&dict),
            modified,
        });
        Ok(dict)
    }

    /// Return the cached value for `path` without checking freshness
    pub fn peek(&self, path: &Path) -> Option<Arc<D>> {
        let slot = self.existing_slot(path)?;
        let entry = lock(&slot);
        entry.as_ref().map(|e| Arc::clone(&e.dict))
    }

    /// Modification time recorded for `path`, if cached
    pub fn recorded_modified(&self, path: &Path) -> Option<SystemTime> {
        let slot = self.existing_slot(path)?;
        let entry = lock(&slot);
        entry.as_ref().map(|e| e.modified)
    }

    /// Drop the entry for `path`; returns whether one was present
    pub fn invalidate(&self, path: &Path) -> bool {
        let Some((_, slot)) = self.slots.remove(path) else {
            return false;
        };
        let had_entry = lock(&slot).take().is_some();
        had_entry
    }

    /// Drop every entry
    pub fn clear(&self) {
        let paths: Vec<PathBuf> = self.slots.iter().map(|e| e.key().clone()).collect();
        for path in paths {
            self.invalidate(&path);
        }
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        let slots: Vec<Slot<D>> = self.slots.iter().map(|e| Arc::clone(e.value())).collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, path: &Path) -> Slot<D> {
        if let Some(slot) = self.existing_slot(path) {
            return slot;
        }
        let slot = self
            .slots
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(None)));
        Arc::clone(slot.value())
    }

    fn existing_slot(&self, path: &Path) -> Option<Slot<D>> {
        self.slots.get(path).map(|slot| Arc::clone(slot.value()))
    }

    /// Remove the key for `path` if `slot` is still its slot, is empty and
    /// no other caller holds it
    ///
    /// Must be called without holding the slot lock. Clones of a slot are
    /// only taken under the map's shard lock, which `remove_if` also holds,
    /// so the reference count cannot grow during the check.
    fn forget_if_empty(&self, path: &Path, slot: &Slot<D>) {
        self.slots.remove_if(path, |_, current| {
            Arc::ptr_eq(current, slot)
                && Arc::strong_count(current) == 2
                && current.try_lock().map(|e| e.is_none()).unwrap_or(false)
        });
    }
}

/// Lock a slot, recovering the data if a previous holder panicked
///
/// Slots are only written with fully built values, so a panic inside a
/// loader cannot leave a torn entry behind.
fn lock<D>(slot: &Slot<D>) -> MutexGuard<'_, Option<FileEntry<D>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<D> Default for FileCache<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Current modification time of the file at `path`
pub fn modified_time(path: &Path) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}
