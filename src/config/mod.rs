//! Configuration for dictcache
//!
//! The config file is looked up at `--config`, then `$DICTCACHE_CONFIG`,
//! then `<config dir>/dictcache/config.toml`. A missing file means defaults.
//! Every load and save is validated, so a config that names a dictionary
//! without a source (or with two) is rejected up front instead of failing
//! one dictionary at a time.
//!
//! The home root of the sandbox is resolved here, most specific first:
//!
//! | Source | Example |
//! |--------|---------|
//! | `--home` flag | `dictcache --home /srv/dicts load` |
//! | `$DICTCACHE_HOME` | `DICTCACHE_HOME=/srv/dicts` |
//! | `[sandbox] home` | `home = "/srv/dicts"` |

pub mod schema;

pub use schema::{Config, DictionaryConfig, DictionaryKind, DictionarySource};

use crate::error::{DictError, DictResult};
use crate::sandbox::{self, Sandbox};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Log formats accepted by `general.log_format`
pub const LOG_FORMATS: &[&str] = &["text", "json"];

/// Loads, validates and saves the config file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manage the file at `path`, or the default location when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(Self::default_path),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dictcache")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the config; defaults when the file does not exist
    pub async fn load(&self) -> DictResult<Config> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(DictError::io(
                    format!("reading config from {}", self.path.display()),
                    e,
                ));
            }
        };

        let config: Config = toml::from_str(&content).map_err(|e| self.invalid(e.to_string()))?;
        self.validate(&config)?;
        debug!(
            "Loaded config {} ({} dictionaries)",
            self.path.display(),
            config.dictionaries.len()
        );
        Ok(config)
    }

    /// Validate and write the config, creating its directory if needed
    pub async fn save(&self, config: &Config) -> DictResult<()> {
        self.validate(config)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DictError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| DictError::io(format!("writing config to {}", self.path.display()), e))?;

        info!("Configuration saved to {}", self.path.display());
        Ok(())
    }

    /// Check the parts of a config that serde cannot
    ///
    /// Dictionary names must be unique and each dictionary must name
    /// exactly one source.
    pub fn validate(&self, config: &Config) -> DictResult<()> {
        if !LOG_FORMATS.contains(&config.general.log_format.as_str()) {
            return Err(self.invalid(format!(
                "general.log_format must be one of {}, got '{}'",
                LOG_FORMATS.join(", "),
                config.general.log_format
            )));
        }

        let mut names = HashSet::new();
        for dictionary in &config.dictionaries {
            dictionary.source().map_err(|reason| self.invalid(reason))?;
            if !names.insert(dictionary.name.as_str()) {
                return Err(self.invalid(format!(
                    "dictionary '{}' is defined more than once",
                    dictionary.name
                )));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> DictError {
        DictError::ConfigInvalid {
            path: self.path.clone(),
            reason,
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Config {
    /// Effective home root given an optional `--home` override
    pub fn home_root(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(sandbox::home_from_env)
            .or_else(|| self.sandbox.home.clone())
    }

    /// Sandbox rooted at the current directory and the effective home root
    pub fn build_sandbox(&self, home_flag: Option<&Path>) -> DictResult<Sandbox> {
        let cwd =
            std::env::current_dir().map_err(|e| DictError::io("getting current directory", e))?;
        Sandbox::new(cwd, self.home_root(home_flag))
    }
}
