use std::{fs, io, path::Path};

use walkdir::WalkDir;

use crate::error::ScaffoldError;

/// File suffixes whose contents carry the module import path.
pub const REWRITE_SUFFIXES: [&str; 2] = [".go", ".mod"];

/// Replaces every occurrence of `old_import` with `new_import` in the Go sources
/// and module files under `dir`. Stops at the first file that cannot be read or written.
///
/// Symlinks are never written through: a link into the tree is covered by its
/// target, a link leading outside is left alone, a dangling link is an error.
pub fn replace_imports_in_dir(
    dir: &Path,
    old_import: &str,
    new_import: &str,
) -> Result<usize, ScaffoldError> {
    let rewrite_err = |path: &Path, source: io::Error| ScaffoldError::Rewrite {
        path: path.to_path_buf(),
        source,
    };
    let root = fs::canonicalize(dir).map_err(|e| rewrite_err(dir, e))?;

    let mut rewritten = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            rewrite_err(&path, e.into())
        })?;
        if entry.file_type().is_dir() || !has_rewrite_suffix(entry.path()) {
            continue;
        }
        if entry.path_is_symlink() {
            let target =
                fs::canonicalize(entry.path()).map_err(|e| rewrite_err(entry.path(), e))?;
            if !target.starts_with(&root) {
                log::warn!(
                    "skipping {}: links outside the project to {}",
                    entry.path().display(),
                    target.display()
                );
            }
            continue;
        }
        let changed = replace_in_file(entry.path(), old_import, new_import)
            .map_err(|e| rewrite_err(entry.path(), e))?;
        if changed {
            log::debug!("rewrote imports in {}", entry.path().display());
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

fn has_rewrite_suffix(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| REWRITE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

/// Rewrites `path` in place, keeping its permission bits. Returns whether anything changed.
pub fn replace_in_file(path: &Path, old: &str, new: &str) -> io::Result<bool> {
    let permissions = fs::metadata(path)?.permissions();
    let contents = fs::read(path)?;
    let Some(replaced) = replace_all(&contents, old.as_bytes(), new.as_bytes()) else {
        return Ok(false);
    };
    fs::write(path, replaced)?;
    fs::set_permissions(path, permissions)?;
    Ok(true)
}

/// Literal replacement over raw bytes. `None` when `old` never occurs.
fn replace_all(haystack: &[u8], old: &[u8], new: &[u8]) -> Option<Vec<u8>> {
    if old.is_empty() {
        return None;
    }
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    let mut found = false;
    while let Some(pos) = rest.windows(old.len()).position(|w| w == old) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(new);
        rest = &rest[pos + old.len()..];
        found = true;
    }
    if !found {
        return None;
    }
    out.extend_from_slice(rest);
    Some(out)
}
