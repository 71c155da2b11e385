//! Configuration schema for dictcache
//!
//! Configuration is stored at `~/.config/dictcache/config.toml`

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Authorized roots for dictionary files
    pub sandbox: SandboxConfig,

    /// Dictionaries loaded by `dictcache load` when no source is given
    pub dictionaries: Vec<DictionaryConfig>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Sandbox settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Home root accepted in addition to the working directory.
    /// `$DICTCACHE_HOME` takes precedence when set.
    pub home: Option<PathBuf>,
}

/// How the lines of a dictionary are accumulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DictionaryKind {
    /// Set of distinct words
    #[default]
    WordSet,

    /// Words in file order
    WordList,

    /// Tab-separated key/value pairs
    KeyValue,
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WordSet => "word-set",
            Self::WordList => "word-list",
            Self::KeyValue => "key-value",
        };
        write!(f, "{}", name)
    }
}

/// A named dictionary and where to load it from
///
/// Exactly one of `resource` and `file` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Human-readable name used in logs
    pub name: String,

    /// Accumulation kind
    #[serde(default)]
    pub kind: DictionaryKind,

    /// Logical path of a bundled resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Path of a dictionary file, subject to the sandbox
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl DictionaryConfig {
    /// Where this dictionary comes from, or a reason it is misconfigured
    pub fn source(&self) -> Result<DictionarySource<'_>, String> {
        match (&self.resource, &self.file) {
            (Some(resource), None) => Ok(DictionarySource::Resource(resource)),
            (None, Some(file)) => Ok(DictionarySource::File(file)),
            (Some(_), Some(_)) => Err(format!(
                "dictionary '{}' sets both resource and file",
                self.name
            )),
            (None, None) => Err(format!(
                "dictionary '{}' needs either resource or file",
                self.name
            )),
        }
    }
}

/// Resolved source of a configured dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionarySource<'a> {
    Resource(&'a str),
    File(&'a std::path::Path),
}
