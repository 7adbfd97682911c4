//! Finding catalog files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use convcat_foundation::{Error, Result};
use glob::Pattern;
use tracing::debug;

/// Pattern that accepts every file name.
pub const ALL_FILES: &str = "*";

/// Collects the files named by `paths`, as absolute paths.
///
/// - A directory contributes every file beneath it, recursively. Symbolic
///   links to directories found during the walk are not followed.
/// - A file contributes itself.
/// - A path that does not exist is ignored.
///
/// Only files whose *name* matches at least one of `patterns` are kept.
/// The result is in discovery order; callers that need a stable order sort it.
///
/// # Errors
///
/// Returns `ConfigError` for an invalid glob pattern and `IoError` if a
/// directory cannot be read.
pub fn discover<P, S>(paths: &[P], patterns: &[S]) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let patterns = patterns
        .iter()
        .map(|p| {
            Pattern::new(p.as_ref())
                .map_err(|e| Error::config(format!("invalid file pattern '{}': {e}", p.as_ref())))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            walk(path, &patterns, &mut files)?;
        } else if path.exists() {
            if matches_any(path, &patterns) {
                files.push(absolute(path)?);
            }
        } else {
            debug!(path = %path.display(), "ignoring missing catalog path");
        }
    }
    Ok(files)
}

fn walk(dir: &Path, patterns: &[Pattern], files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::io(format!("failed to read directory '{}': {e}", dir.display())))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::io(format!("failed to read directory '{}': {e}", dir.display())))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io(format!("failed to inspect '{}': {e}", path.display())))?;
        if file_type.is_dir() {
            walk(&path, patterns, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "not following directory link");
        } else if matches_any(&path, patterns) {
            files.push(absolute(&path)?);
        }
    }
    Ok(())
}

fn matches_any(path: &Path, patterns: &[Pattern]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    patterns.iter().any(|p| p.matches(name))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| Error::io(format!("failed to resolve '{}': {e}", path.display())))
}
