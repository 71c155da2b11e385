//! Loaders for every built-in dictionary kind
//!
//! Configured dictionaries name their kind at runtime, while each
//! `DictionaryLoader` is typed by its accumulator. The registry keeps one
//! loader per kind behind a shared sandbox and resource source, and hands
//! back a `LoadedDictionary` that erases the difference.

use crate::config::{DictionaryConfig, DictionaryKind, DictionarySource};
use crate::dictionary::{BundledResources, KeyValueTable, ResourceSource, WordList, WordSet};
use crate::error::{DictError, DictResult};
use crate::loader::DictionaryLoader;
use crate::sandbox::Sandbox;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

/// A dictionary of any built-in kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoadedDictionary {
    WordSet(Arc<BTreeSet<String>>),
    WordList(Arc<Vec<String>>),
    KeyValue(Arc<BTreeMap<String, String>>),
}

impl LoadedDictionary {
    pub fn kind(&self) -> DictionaryKind {
        match self {
            Self::WordSet(_) => DictionaryKind::WordSet,
            Self::WordList(_) => DictionaryKind::WordList,
            Self::KeyValue(_) => DictionaryKind::KeyValue,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        match self {
            Self::WordSet(d) => d.len(),
            Self::WordList(d) => d.len(),
            Self::KeyValue(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries rendered one per line (`key\tvalue` for tables)
    pub fn entries(&self) -> Vec<String> {
        match self {
            Self::WordSet(d) => d.iter().cloned().collect(),
            Self::WordList(d) => d.to_vec(),
            Self::KeyValue(d) => d.iter().map(|(k, v)| format!("{}\t{}", k, v)).collect(),
        }
    }
}

/// One cache-backed loader per dictionary kind
pub struct DictionaryRegistry {
    word_sets: DictionaryLoader<WordSet>,
    word_lists: DictionaryLoader<WordList>,
    tables: DictionaryLoader<KeyValueTable>,
}

impl DictionaryRegistry {
    /// Registry over the bundled resources
    pub fn new(sandbox: Sandbox) -> Self {
        Self::with_resources(Arc::new(BundledResources), sandbox)
    }

    /// Registry over an explicit resource source
    pub fn with_resources(resources: Arc<dyn ResourceSource>, sandbox: Sandbox) -> Self {
        Self {
            word_sets: DictionaryLoader::with_parts(
                WordSet::new(),
                Arc::clone(&resources),
                sandbox.clone(),
            ),
            word_lists: DictionaryLoader::with_parts(
                WordList,
                Arc::clone(&resources),
                sandbox.clone(),
            ),
            tables: DictionaryLoader::with_parts(KeyValueTable, resources, sandbox),
        }
    }

    pub fn sandbox(&self) -> &Sandbox {
        self.word_sets.sandbox()
    }

    /// Load a bundled resource as `kind`; never fails
    pub fn load_resource(&self, kind: DictionaryKind, path: &str, name: &str) -> LoadedDictionary {
        match kind {
            DictionaryKind::WordSet => {
                LoadedDictionary::WordSet(self.word_sets.load_cached_from_resource(path, name))
            }
            DictionaryKind::WordList => {
                LoadedDictionary::WordList(self.word_lists.load_cached_from_resource(path, name))
            }
            DictionaryKind::KeyValue => {
                LoadedDictionary::KeyValue(self.tables.load_cached_from_resource(path, name))
            }
        }
    }

    /// Load a dictionary file as `kind`
    pub fn load_file(
        &self,
        kind: DictionaryKind,
        file: &Path,
        name: &str,
    ) -> DictResult<LoadedDictionary> {
        Ok(match kind {
            DictionaryKind::WordSet => {
                LoadedDictionary::WordSet(self.word_sets.load_cached_from_file(file, name)?)
            }
            DictionaryKind::WordList => {
                LoadedDictionary::WordList(self.word_lists.load_cached_from_file(file, name)?)
            }
            DictionaryKind::KeyValue => {
                LoadedDictionary::KeyValue(self.tables.load_cached_from_file(file, name)?)
            }
        })
    }

    /// Load a configured dictionary
    pub fn load(&self, dictionary: &DictionaryConfig) -> DictResult<LoadedDictionary> {
        match dictionary.source().map_err(DictError::User)? {
            DictionarySource::Resource(path) => {
                Ok(self.load_resource(dictionary.kind, path, &dictionary.name))
            }
            DictionarySource::File(file) => self.load_file(dictionary.kind, file, &dictionary.name),
        }
    }
}
