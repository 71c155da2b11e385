//! dictcache - Cache-backed dictionary loader
//!
//! Loads line-oriented dictionaries (word lists, character tables) from
//! bundled resources or from sandboxed files, and keeps them in
//! process-wide caches: bundled resources are loaded once, files are
//! reloaded when their modification time changes.
//!
//! ```rust,no_run
//! use dictcache::dictionary::WordSet;
//! use dictcache::DictionaryLoader;
//!
//! # fn main() -> dictcache::DictResult<()> {
//! let loader = DictionaryLoader::new(WordSet::new())?;
//! let stop_words = loader.load_cached_from_resource("stop-words/en.txt", "stop words");
//! let jargon = loader.load_cached_from_file("dicts/jargon.txt", "jargon")?;
//! # let _ = (stop_words, jargon);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod loader;
pub mod registry;
pub mod sandbox;
pub mod ui;

pub use error::{DictError, DictResult};
pub use loader::DictionaryLoader;
pub use registry::{DictionaryRegistry, LoadedDictionary};
pub use sandbox::Sandbox;
