//! Path canonicalization guard.

pub mod filter;
pub mod resolve;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use warden_core::config::SandboxConfig;
use warden_core::AppResult;
use warden_core::error::{AppError, ErrorKind};

pub use filter::ValidationRule;

/// Why a path was refused.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The raw or decoded input failed the syntactic filter.
    #[error("Invalid filename: {0}")]
    Validation(ValidationRule),
    /// The resolved path is not strictly inside the base directory.
    #[error("Access denied: path escapes the sandbox")]
    TraversalDetected,
    /// The filesystem could not be queried while resolving.
    #[error("Failed to resolve path: {0}")]
    Io(#[from] io::Error),
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Validation(rule) => AppError::validation(format!("Invalid filename: {rule}")),
            GuardError::TraversalDetected => AppError::traversal("Access denied"),
            GuardError::Io(e) => AppError::with_source(ErrorKind::Storage, "Failed to resolve path", e),
        }
    }
}

/// A path that passed every check and may be handed to I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedPath {
    /// Absolute, symlink-resolved location strictly inside the base.
    pub absolute: PathBuf,
    /// The same location relative to the base, `/`-separated.
    pub relative: String,
}

/// Turns untrusted relative path strings into locations guaranteed to lie
/// inside a fixed base directory.
#[derive(Debug, Clone)]
pub struct PathGuard {
    /// Canonical base directory.
    base: PathBuf,
    /// Longest accepted input in bytes.
    max_path_length: usize,
}

impl PathGuard {
    /// Creates a guard over `base_dir`, creating the directory if absent.
    pub fn new(base_dir: impl AsRef<Path>, max_path_length: usize) -> AppResult<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create sandbox directory: {}", base_dir.display()),
                e,
            )
        })?;
        let base = std::fs::canonicalize(base_dir).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to canonicalize sandbox directory: {}", base_dir.display()),
                e,
            )
        })?;

        debug!(base = %base.display(), "Path guard initialized");
        Ok(Self {
            base,
            max_path_length,
        })
    }

    /// Creates a guard from sandbox configuration.
    pub fn from_config(config: &SandboxConfig) -> AppResult<Self> {
        Self::new(&config.base_dir, config.max_path_length)
    }

    /// The canonical base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Judges `raw` and returns the location it names if it is contained.
    ///
    /// Touches the filesystem only to resolve symbolic links; performs no
    /// reads or writes of its own.
    pub fn resolve(&self, raw: &str) -> Result<GuardedPath, GuardError> {
        self.check(raw, raw)?;

        let decoded = filter::decode_once(raw);
        if decoded != raw {
            debug!(raw = ?raw, decoded = ?decoded, "Percent-decoded path input");
            self.check(raw, &decoded)?;
        }

        let absolute = resolve::resolve_within(&self.base, &decoded)?;
        let relative = match self.relative_of(&absolute) {
            Some(relative) => relative,
            None => {
                warn!(
                    raw = ?raw,
                    resolved = %absolute.display(),
                    "Path traversal blocked by containment check"
                );
                return Err(GuardError::TraversalDetected);
            }
        };

        Ok(GuardedPath { absolute, relative })
    }

    fn check(&self, raw: &str, candidate: &str) -> Result<(), GuardError> {
        filter::check(candidate, self.max_path_length).map_err(|rule| {
            warn!(raw = ?raw, rule = %rule, "Path rejected by syntactic filter");
            GuardError::Validation(rule)
        })
    }

    /// `Some(relative)` iff `path` lies strictly below the base.
    fn relative_of(&self, path: &Path) -> Option<String> {
        let rest = path.strip_prefix(&self.base).ok()?;
        if rest.as_os_str().is_empty() {
            return None;
        }
        let parts: Vec<_> = rest
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(parts.join("/"))
    }
}
