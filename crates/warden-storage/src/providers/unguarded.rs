//! **UNSAFE** unchecked file access.
//!
//! [`UnguardedReader`] joins untrusted input straight onto the base
//! directory: no filter, no decoding, no containment. `../` walks out of
//! the base and absolute input replaces it entirely. It is compiled only
//! for tests and under the `unguarded-demo` feature, exists to show what
//! the guarded reader refuses, and must never be reachable from a request
//! handler or command.

use std::io;
use std::path::PathBuf;

use tokio::fs;

/// Reads whatever path the input names. Do not use outside demonstrations.
#[derive(Debug, Clone)]
pub struct UnguardedReader {
    base: PathBuf,
}

impl UnguardedReader {
    /// Creates a reader rooted (nominally) at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Reads `base/filename` with no validation at all.
    pub async fn read_file(&self, filename: &str) -> io::Result<String> {
        fs::read_to_string(self.base.join(filename)).await
    }
}
