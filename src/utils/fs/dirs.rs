//! Directory operations: predicates, creation, removal and non-destructive tree copy.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::copy::copy_file;
use super::tree::list_tree;
use crate::core::{BookError, FileOperation, FileResultExt};

/// Returns true if a filesystem entry is present at `path`.
///
/// Symbolic links are not followed, so a dangling link counts as present. Access
/// errors (for example a parent directory without search permission) are folded into
/// `false`.
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Returns true if `path` exists and is a directory (following symlinks).
///
/// Any stat failure yields `false`.
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_dir())
}

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Returns
///
/// - `Ok(())` if the directory exists or was successfully created
/// - `Err` if the path exists but is not a directory, or creation fails
///
/// # Examples
///
/// ```rust,no_run
/// use bookgen::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("_book/chapter1/section"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_file_context(
            FileOperation::CreateDir,
            path,
            "ensuring directory exists",
        )?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
///
/// Paths without a parent (e.g., a bare file name) are accepted as-is.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Removes whatever is at `path`: a directory tree, a file or a symlink.
///
/// Missing paths are not an error. Symlinks are removed without touching their
/// targets.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path).with_file_context(
            FileOperation::Remove,
            path,
            "removing directory tree",
        )?;
    } else {
        fs::remove_file(path).with_file_context(FileOperation::Remove, path, "removing file")?;
    }
    Ok(())
}

/// Destroys `path` if present and recreates it as an empty directory.
///
/// Not synchronized: two callers resetting overlapping paths race each other.
pub fn reset_dir(path: &Path) -> Result<()> {
    remove_dir_all(path)?;
    fs::create_dir_all(path).with_file_context(
        FileOperation::CreateDir,
        path,
        "recreating directory",
    )?;
    Ok(())
}

/// Recursively copies `src` into a new directory `dest`.
///
/// The copy is non-destructive: if anything exists at `dest` the call fails with
/// [`BookError::AlreadyExists`] before touching the filesystem. Otherwise `dest` is
/// created and every entry from [`list_tree`] is mirrored into it, directories via
/// [`ensure_dir`] and files via [`copy_file`] (which keeps mtimes, permissions and
/// symlinks).
///
/// `filter` receives each listing path (directories end with `/`) and returns `true`
/// to exclude that entry. Excluding a directory does not exclude its contents.
///
/// # Errors
///
/// Aborts on the first failure. Whatever was copied so far stays in `dest`.
///
/// # Examples
///
/// ```rust,no_run
/// use bookgen::utils::fs::copy_tree;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// // Copy theme assets, leaving out source maps
/// let skip_maps = |path: &str| path.ends_with(".map");
/// copy_tree(Path::new("themes/gitbook/assets"), Path::new("_book/gitbook"), Some(&skip_maps))?;
/// # Ok(())
/// # }
/// ```
pub fn copy_tree(src: &Path, dest: &Path, filter: Option<&dyn Fn(&str) -> bool>) -> Result<()> {
    if exists(dest) {
        return Err(BookError::AlreadyExists {
            path: dest.display().to_string(),
        }
        .into());
    }

    ensure_dir(dest)?;

    let listing = list_tree(src, true)
        .with_context(|| format!("Failed to list {} for copying", src.display()))?;

    for relative in listing {
        if filter.is_some_and(|f| f(&relative)) {
            tracing::trace!("Filtered out {}", relative);
            continue;
        }

        if let Some(dir) = relative.strip_suffix('/') {
            ensure_dir(&dest.join(dir))?;
        } else {
            let target = dest.join(&relative);
            copy_file(&src.join(&relative), &target).with_context(|| {
                format!("Failed to copy {} into {}", relative, dest.display())
            })?;
            tracing::debug!("Copied {}", target.display());
        }
    }

    Ok(())
}
