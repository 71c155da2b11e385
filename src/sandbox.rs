//! Path sandbox for dictionary files
//!
//! Dictionary paths often arrive indirectly (from a config file, from a
//! rule definition), so every file is checked before it is opened: its
//! canonical path must lie inside the working directory or inside
//! `$DICTCACHE_HOME`.
//!
//! # Security Model
//!
//! - Symlinks are resolved before the check, so a link inside a root that
//!   points outside of it is rejected
//! - Containment is decided per path component: `/data/dict2` is not
//!   inside `/data/dict`
//! - `.` and `..` are collapsed before anything touches the filesystem
//! - Paths that do not exist yet are resolved through their deepest
//!   existing ancestor, so a missing file is judged by where it would be

use crate::error::{DictError, DictResult};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Environment variable naming the optional home root
pub const HOME_ENV: &str = "DICTCACHE_HOME";

/// Authorized roots for dictionary files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    working_dir: PathBuf,
    home: Option<PathBuf>,
}

impl Sandbox {
    /// Create a sandbox from explicit roots
    ///
    /// Both roots are canonicalized up front. A relative home root is taken
    /// relative to `working_dir`.
    pub fn new(working_dir: impl AsRef<Path>, home: Option<PathBuf>) -> DictResult<Self> {
        let working_dir = std::fs::canonicalize(working_dir.as_ref()).map_err(|e| {
            DictError::io(
                format!("resolving working directory {}", working_dir.as_ref().display()),
                e,
            )
        })?;

        let home = match home {
            Some(home) => Some(canonicalize_in(&working_dir, &home).map_err(|e| {
                DictError::io(format!("resolving home root {}", home.display()), e)
            })?),
            None => None,
        };

        Ok(Self { working_dir, home })
    }

    /// Create a sandbox rooted at the current directory and `$DICTCACHE_HOME`
    pub fn from_env() -> DictResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DictError::io("getting current directory", e))?;
        Self::new(cwd, home_from_env())
    }

    /// Canonical working directory root
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Canonical home root, if one is configured
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Check that `path` resolves inside one of the authorized roots
    ///
    /// Returns the canonical path on success. Relative paths are resolved
    /// against the sandbox working directory. No file is opened.
    pub fn ensure_inside_authorized_root(&self, path: &Path) -> DictResult<PathBuf> {
        let canonical = canonicalize_in(&self.working_dir, path)
            .map_err(|e| DictError::io(format!("resolving {}", path.display()), e))?;

        if canonical.starts_with(&self.working_dir) {
            return Ok(canonical);
        }

        if let Some(ref home) = self.home {
            if canonical.starts_with(home) {
                return Ok(canonical);
            }
        }

        debug!(
            "Rejected {}: outside {} and {:?}",
            canonical.display(),
            self.working_dir.display(),
            self.home
        );

        Err(DictError::Security {
            path: canonical,
            home: self
                .home
                .as_ref()
                .map(|h| h.display().to_string())
                .unwrap_or_else(|| "not specified".to_string()),
            working_dir: self.working_dir.clone(),
        })
    }
}

/// Check `path` against a sandbox built from the process environment
pub fn ensure_inside_authorized_root(path: impl AsRef<Path>) -> DictResult<PathBuf> {
    Sandbox::from_env()?.ensure_inside_authorized_root(path.as_ref())
}

/// Read the home root from `$DICTCACHE_HOME`, ignoring an empty value
pub fn home_from_env() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Canonicalize `path`, resolving relative paths against `base`
///
/// Unlike `fs::canonicalize` this accepts paths whose tail does not exist.
/// `.` and `..` are collapsed first, then the deepest existing ancestor is
/// resolved through the filesystem and the missing tail is appended. The
/// tail therefore never holds a `..` or an existing symlink.
pub fn canonicalize_in(base: &Path, path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    loop {
        match std::fs::canonicalize(existing) {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev().copied());
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(name), Some(parent)) = (existing.file_name(), existing.parent()) else {
                    return Err(e);
                };
                missing.push(name);
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Collapse `.` and `..` lexically; `..` at the root stays at the root
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
