//! Cache-backed dictionary loading
//!
//! `DictionaryLoader` owns one accumulator together with the caches that
//! hold what it builds. Bundled resources are loaded at most once and a
//! missing resource degrades to an empty dictionary. Files go through the
//! sandbox first and are reloaded when their modification time changes.

use crate::cache::{FileCache, ResourceCache};
use crate::dictionary::{fold_lines, Accumulator, BundledResources, ResourceSource};
use crate::error::{DictError, DictResult};
use crate::sandbox::Sandbox;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Loads and caches dictionaries of one kind
pub struct DictionaryLoader<A: Accumulator> {
    accumulator: A,
    resources: Box<dyn ResourceSource>,
    sandbox: Sandbox,
    resource_cache: ResourceCache<A::Dict>,
    file_cache: FileCache<A::Dict>,
}

impl<A: Accumulator> DictionaryLoader<A> {
    /// Create a loader over the bundled resources, sandboxed to the current
    /// directory and `$DICTCACHE_HOME`
    pub fn new(accumulator: A) -> DictResult<Self> {
        Ok(Self::with_parts(
            accumulator,
            BundledResources,
            Sandbox::from_env()?,
        ))
    }

    /// Create a loader from explicit parts
    pub fn with_parts(
        accumulator: A,
        resources: impl ResourceSource + 'static,
        sandbox: Sandbox,
    ) -> Self {
        Self {
            accumulator,
            resources: Box::new(resources),
            sandbox,
            resource_cache: ResourceCache::new(),
            file_cache: FileCache::new(),
        }
    }

    /// Build a dictionary from a stream, bypassing the caches
    pub fn load<R: Read>(&self, reader: R) -> io::Result<A::Dict> {
        fold_lines(&self.accumulator, reader)
    }

    /// Return the dictionary bundled at `path`, loading it on first use
    ///
    /// Never fails: a missing or unreadable resource is logged and cached as
    /// the accumulator's empty dictionary.
    pub fn load_cached_from_resource(&self, path: &str, name: &str) -> Arc<A::Dict> {
        self.resource_cache
            .get_or_load(path, || match self.load_from_resource(path) {
                Ok(dict) => {
                    info!("Succeeded to load {}.", name);
                    dict
                }
                Err(e) => {
                    error!("Failed to load {}:{}: {}", name, path, e);
                    self.accumulator.zero()
                }
            })
    }

    /// Return the dictionary stored in `file`, reloading it if it changed
    ///
    /// # Errors
    ///
    /// - `Security` if the file resolves outside the authorized roots
    /// - `NotFound` if the file does not exist
    /// - `Load` if it cannot be read or decoded; nothing is cached and the
    ///   next call tries again
    pub fn load_cached_from_file(
        &self,
        file: impl AsRef<Path>,
        name: &str,
    ) -> DictResult<Arc<A::Dict>> {
        let path = self.sandbox.ensure_inside_authorized_root(file.as_ref())?;
        if !path.exists() {
            return Err(DictError::NotFound(file.as_ref().to_path_buf()));
        }

        let dict = self
            .file_cache
            .get_or_load(&path, |p| self.load_from_file(p))
            .map_err(|e| {
                error!("Failed to load {}:{}: {}", name, path.display(), e);
                DictError::load(name, &path, e)
            })?;

        info!("Succeeded to load {}.", name);
        Ok(dict)
    }

    /// Sandbox applied to file loads
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Accumulator used to build dictionaries
    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    pub fn resource_cache(&self) -> &ResourceCache<A::Dict> {
        &self.resource_cache
    }

    pub fn file_cache(&self) -> &FileCache<A::Dict> {
        &self.file_cache
    }

    fn load_from_resource(&self, path: &str) -> io::Result<A::Dict> {
        let stream = self.resources.open(path)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Failed to load input {}", path),
            )
        })?;
        self.load(stream)
    }

    fn load_from_file(&self, path: &Path) -> io::Result<A::Dict> {
        self.load(File::open(path)?)
    }
}
