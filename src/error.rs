//! Error types for dictcache
//!
//! All modules use `DictResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dictcache operations
pub type DictResult<T> = Result<T, DictError>;

/// All errors that can occur in dictcache
#[derive(Error, Debug)]
pub enum DictError {
    // Dictionary errors
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("{path} is not under $DICTCACHE_HOME({home}) or current directory({working_dir})")]
    Security {
        path: PathBuf,
        home: String,
        working_dir: PathBuf,
    },

    #[error("Failed to load {name}:{path}")]
    Load {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl DictError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for a named dictionary
    pub fn load(name: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Load {
            name: name.into(),
            path: path.into(),
            source,
        }
    }

    /// Check if error is retryable
    ///
    /// Failed loads are never cached, so the next call reads the file again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Security { .. } => Some(
                "Run from a directory containing the dictionary, or set DICTCACHE_HOME to its parent",
            ),
            Self::Load { .. } => Some("Check that the file is readable and encoded as UTF-8"),
            _ => None,
        }
    }
}
