//! Guarded local filesystem access.

use std::io;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, warn};

use warden_core::config::SandboxConfig;
use warden_core::error::{AppError, ErrorKind};

use crate::guard::{GuardError, GuardedPath, PathGuard, ValidationRule};

/// A file read from the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContent {
    /// Sandbox-relative path. Never the host location.
    pub path: String,
    /// File contents, verbatim.
    pub content: String,
}

/// Outcome of a refused or failed sandbox access.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The filename failed the syntactic filter.
    #[error("Invalid filename: {0}")]
    ValidationFailed(ValidationRule),
    /// The filename resolved outside the sandbox.
    #[error("Access denied")]
    TraversalDetected,
    /// Contained, but nothing readable is there.
    #[error("File not found")]
    FileNotFound,
    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<GuardError> for ReadError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Validation(rule) => Self::ValidationFailed(rule),
            GuardError::TraversalDetected => Self::TraversalDetected,
            GuardError::Io(e) => Self::Io(e),
        }
    }
}

impl From<ReadError> for AppError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::ValidationFailed(rule) => {
                AppError::validation(format!("Invalid filename: {rule}"))
            }
            ReadError::TraversalDetected => AppError::traversal("Access denied"),
            ReadError::FileNotFound => AppError::not_found("File not found"),
            ReadError::Io(e) => AppError::with_source(ErrorKind::Storage, "File access failed", e),
        }
    }
}

/// Reads and writes files by untrusted name, only ever touching paths the
/// [`PathGuard`] has approved.
#[derive(Debug, Clone)]
pub struct SandboxReader {
    guard: Arc<PathGuard>,
}

impl SandboxReader {
    /// Wraps an existing guard.
    pub fn new(guard: Arc<PathGuard>) -> Self {
        Self { guard }
    }

    /// Builds a guard from configuration and wraps it.
    pub fn from_config(config: &SandboxConfig) -> Result<Self, AppError> {
        Ok(Self::new(Arc::new(PathGuard::from_config(config)?)))
    }

    /// The underlying guard.
    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Runs the guard off the async executor; resolution may stat the disk.
    async fn resolve(&self, filename: &str) -> Result<GuardedPath, ReadError> {
        let guard = Arc::clone(&self.guard);
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || guard.resolve(&filename))
            .await
            .map_err(io::Error::other)?
            .map_err(ReadError::from)
    }

    /// Reads a sandboxed file as UTF-8 text.
    pub async fn read_file(&self, filename: &str) -> Result<FileContent, ReadError> {
        let guarded = self.resolve(filename).await?;

        match fs::read_to_string(&guarded.absolute).await {
            Ok(content) => {
                debug!(path = %guarded.relative, bytes = content.len(), "Read sandboxed file");
                Ok(FileContent {
                    path: guarded.relative,
                    content,
                })
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound
                        | io::ErrorKind::NotADirectory
                        | io::ErrorKind::IsADirectory
                ) =>
            {
                debug!(path = %guarded.relative, "Sandboxed file not found");
                Err(ReadError::FileNotFound)
            }
            Err(e) => {
                error!(path = %guarded.relative, error = %e, "Failed to read sandboxed file");
                Err(ReadError::Io(e))
            }
        }
    }

    /// Writes a sandboxed file, creating parent directories inside the
    /// sandbox as needed.
    pub async fn write_file(&self, filename: &str, content: &str) -> Result<GuardedPath, ReadError> {
        let guarded = self.resolve(filename).await?;

        // Never write through a link that appeared after resolution.
        if let Ok(meta) = fs::symlink_metadata(&guarded.absolute).await {
            if meta.file_type().is_symlink() {
                warn!(path = %guarded.relative, "Refusing to write through a symbolic link");
                return Err(ReadError::TraversalDetected);
            }
        }

        if let Some(parent) = guarded.absolute.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&guarded.absolute, content).await?;

        debug!(path = %guarded.relative, bytes = content.len(), "Wrote sandboxed file");
        Ok(guarded)
    }
}
