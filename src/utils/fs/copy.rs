//! Single-file copy that preserves content, modification time and permissions.

use anyhow::Result;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

use crate::core::{FileOperation, FileResultExt};

/// Copies one file from `src` to `dest`, preserving metadata.
///
/// # Behavior
///
/// - **Symbolic link**: `dest` is created as a symlink pointing at the same target as
///   `src`, and nothing else happens. Timestamps and permissions are not propagated
///   for symlinks.
/// - **Regular file**: the full byte content is streamed to `dest` (created or
///   truncated), then `dest`'s access/modification times and permission bits are set
///   to match `src`.
///
/// # Errors
///
/// Returns an error if reading `src`, creating or writing `dest`, or restoring
/// metadata fails. A partially written `dest` is left in place.
///
/// # Examples
///
/// ```rust,no_run
/// use bookgen::utils::fs::copy_file;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// copy_file(Path::new("themes/gitbook/assets/style.css"), Path::new("_book/gitbook/style.css"))?;
/// # Ok(())
/// # }
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(src).with_file_context(
        FileOperation::Metadata,
        src,
        "inspecting copy source",
    )?;

    if metadata.file_type().is_symlink() {
        let target = fs::read_link(src).with_file_context(
            FileOperation::Read,
            src,
            "reading symlink target",
        )?;
        create_symlink(&target, dest).with_file_context(
            FileOperation::Symlink,
            dest,
            "recreating symlink",
        )?;
        return Ok(());
    }

    {
        let mut reader =
            File::open(src).with_file_context(FileOperation::Read, src, "copying file")?;
        let mut writer =
            File::create(dest).with_file_context(FileOperation::Write, dest, "copying file")?;

        io::copy(&mut reader, &mut writer).with_file_context(
            FileOperation::Copy,
            dest,
            "copying file content",
        )?;

        let modified = metadata.modified().with_file_context(
            FileOperation::Metadata,
            src,
            "reading modification time",
        )?;
        writer
            .set_times(FileTimes::new().set_accessed(modified).set_modified(modified))
            .with_file_context(FileOperation::Metadata, dest, "restoring modification time")?;
    }

    fs::set_permissions(dest, metadata.permissions()).with_file_context(
        FileOperation::Metadata,
        dest,
        "restoring permissions",
    )?;

    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    // Relative targets resolve against the link's directory
    let resolved = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target.to_path_buf(),
    };
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
