//! Directory listing for the filesystem level of completion.

use std::path::{Path, PathBuf};

use crate::errors::CompleteError;

/// Join `base` segments onto `root`.
pub fn base_dir(root: &Path, base: &[String]) -> PathBuf {
    let mut dir = root.to_path_buf();
    dir.extend(base);
    dir
}

/// List the entries of `root/base...` whose names start with `prefix`.
///
/// Directories are returned by name; regular files with their final
/// extension removed (`mod.py` -> `mod`, `a.tar.gz` -> `a.tar`). A missing
/// directory yields an empty list. Entry order follows the OS listing.
pub fn list_matches(
    root: &Path,
    base: &[String],
    prefix: &str,
) -> Result<Vec<String>, CompleteError> {
    let dir = base_dir(root, base);
    if !dir.is_dir() {
        tracing::trace!(dir = %dir.display(), "not a directory");
        return Ok(Vec::new());
    }

    let read_err = |source| CompleteError::Read {
        path: dir.clone(),
        source,
    };

    let mut matches = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::trace!(entry = ?file_name, "skipping non-UTF-8 name");
            continue;
        };
        if !name.starts_with(prefix) {
            continue;
        }
        // Follows symlinks, so a link to a file is treated as a file.
        if entry.path().is_file() {
            matches.push(strip_extension(name).to_string());
        } else {
            matches.push(name.to_string());
        }
    }
    Ok(matches)
}

/// Drop the final `.ext` from a file name. Leading-dot names keep their dot.
fn strip_extension(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}
