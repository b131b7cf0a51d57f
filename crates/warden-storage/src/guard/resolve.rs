//! Lexical absolutization and symlink resolution.

use std::io;
use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use soft_canonicalize::soft_canonicalize;

/// Resolves `relative` against `base`: collapse `.`/`..` lexically, then
/// follow symbolic links, including dangling ones, to where the OS would
/// actually land.
///
/// Containment is judged by the caller.
pub fn resolve_within(base: &Path, relative: &str) -> io::Result<PathBuf> {
    let joined = Path::new(relative).absolutize_from(base)?;
    resolve_links(&joined)
}

/// Canonicalizes `path`, which may not exist yet.
///
/// A regular file used as a directory (`file.txt/child`) resolves to the
/// file's canonical location with the remainder appended.
pub fn resolve_links(path: &Path) -> io::Result<PathBuf> {
    match soft_canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotADirectory => {
            match (path.parent(), path.file_name()) {
                (Some(parent), Some(name)) => {
                    let mut resolved = resolve_links(parent)?;
                    resolved.push(name);
                    Ok(resolved)
                }
                _ => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}
