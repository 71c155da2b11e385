//! Resource sources for bundled dictionaries
//!
//! Resolves a logical resource path (e.g. `stop-words/en.txt`) to a byte
//! stream, searching one of:
//! 1. Built-in: compiled into the binary via `include_str!`
//! 2. In-memory: registered at runtime by the embedding application
//! 3. Directory: files below a fixed root on disk
//!
//! A missing resource is `Ok(None)`, never an error.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};

// Built-in dictionaries embedded at compile time
const BUILTIN_STOP_WORDS_EN: &str = include_str!("../../resources/stop-words/en.txt");
const BUILTIN_SYMBOLS_EN: &str = include_str!("../../resources/symbols/en.tsv");
const BUILTIN_SYMBOLS_JA: &str = include_str!("../../resources/symbols/ja.tsv");
const BUILTIN_JARGON_EN: &str = include_str!("../../resources/jargon/en.txt");

const BUILTIN: &[(&str, &str)] = &[
    ("stop-words/en.txt", BUILTIN_STOP_WORDS_EN),
    ("symbols/en.tsv", BUILTIN_SYMBOLS_EN),
    ("symbols/ja.tsv", BUILTIN_SYMBOLS_JA),
    ("jargon/en.txt", BUILTIN_JARGON_EN),
];

/// A readable stream handed out by a resource source
pub type ResourceStream<'a> = Box<dyn Read + Send + 'a>;

/// Lookup of read-only dictionary resources by logical path
pub trait ResourceSource: Send + Sync {
    /// Open the resource at `path`, or `Ok(None)` if there is no such resource
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>>;
}

/// Dictionaries compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl BundledResources {
    /// Logical paths of all built-in dictionaries
    pub fn paths() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(path, _)| *path)
    }

    fn lookup(path: &str) -> Option<&'static str> {
        let path = path.trim_start_matches('/');
        BUILTIN
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, content)| *content)
    }
}

impl ResourceSource for BundledResources {
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>> {
        Ok(Self::lookup(path).map(|content| Box::new(content.as_bytes()) as ResourceStream<'_>))
    }
}

/// Resources registered in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the resource at `path`
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), content.into());
    }

    /// Builder-style variant of [`MemoryResources::insert`]
    pub fn with(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }
}

impl ResourceSource for MemoryResources {
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>> {
        Ok(self
            .entries
            .get(path)
            .map(|bytes| Box::new(Cursor::new(bytes.as_slice())) as ResourceStream<'_>))
    }
}

/// Resources stored as files below a root directory
#[derive(Debug, Clone)]
pub struct DirResources {
    root: PathBuf,
}

impl DirResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirResources {
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>> {
        let relative = Path::new(path.trim_start_matches('/'));
        // Resource paths are logical; never let them climb out of the root
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Ok(None);
        }

        match std::fs::File::open(self.root.join(relative)) {
            Ok(file) => Ok(Some(Box::new(file) as ResourceStream<'_>)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Try each source in order, returning the first hit
impl<S: ResourceSource> ResourceSource for Vec<S> {
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>> {
        for source in self {
            if let Some(stream) = source.open(path)? {
                return Ok(Some(stream));
            }
        }
        Ok(None)
    }
}

impl<S: ResourceSource + ?Sized> ResourceSource for std::sync::Arc<S> {
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>> {
        (**self).open(path)
    }
}

impl<S: ResourceSource + ?Sized> ResourceSource for Box<S> {
    fn open(&self, path: &str) -> io::Result<Option<ResourceStream<'_>>> {
        (**self).open(path)
    }
}
