//! Depth-first directory traversal yielding typed entries.
//!
//! [`TreeWalker`] is the single traversal used by the tree copy and by the book
//! build. It walks with `walkdir`'s explicit directory stack, so deep trees do not
//! grow the call stack, and it yields entries lazily.
//!
//! # Ordering
//!
//! Traversal is depth-first and pre-order: a directory's own entry precedes its
//! descendants. Siblings are visited in byte-wise file name order, so listings and
//! generated sites are identical across platforms.
//!
//! # Skipped entries
//!
//! Any entry whose name contains [`METADATA_MARKER`] is skipped along with its
//! subtree. Symbolic links are never followed; a link is reported as a file.

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::dirs::is_dir;
use crate::core::{BookError, FileOperation, FileOperationError};

/// OS metadata file name fragment excluded from every listing
pub const METADATA_MARKER: &str = ".DS_Store";

/// Kind of a [`TreeEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file, symlink or other non-directory entry
    File,
    /// Directory
    Directory,
}

/// One entry produced by a [`TreeWalker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Full path on disk
    pub path: PathBuf,
    /// Path relative to the walk root, always `/`-separated, no trailing slash
    pub relative: String,
    /// File or directory
    pub kind: EntryKind,
    /// Number of separators in `relative` (0 for direct children of the root)
    pub depth: usize,
}

impl TreeEntry {
    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Whether this entry is a file with an `.md` extension
    pub fn is_markdown(&self) -> bool {
        self.kind == EntryKind::File
            && self.path.extension().is_some_and(|ext| ext == "md")
    }

    /// The relative path in listing form: directories carry a trailing `/`
    pub fn listing_path(&self) -> String {
        match self.kind {
            EntryKind::Directory => format!("{}/", self.relative),
            EntryKind::File => self.relative.clone(),
        }
    }
}

/// Restartable depth-first walker over a directory tree.
///
/// Configuration is held by the walker; every call to [`entries`](Self::entries)
/// starts a fresh traversal.
///
/// # Examples
///
/// ```rust,no_run
/// use bookgen::utils::fs::TreeWalker;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let walker = TreeWalker::new(Path::new("book"))
///     .include_dirs(true)
///     .skip(|relative| relative == "_book");
///
/// for entry in walker.entries()? {
///     let entry = entry?;
///     println!("{} (depth {})", entry.listing_path(), entry.depth);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TreeWalker<'a> {
    root: PathBuf,
    include_dirs: bool,
    skip: Option<Box<dyn Fn(&str) -> bool + 'a>>,
}

impl<'a> TreeWalker<'a> {
    /// Walker over `root` yielding files only
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_dirs: false,
            skip: None,
        }
    }

    /// Whether directory entries are yielded (files are always yielded)
    #[must_use]
    pub fn include_dirs(mut self, include: bool) -> Self {
        self.include_dirs = include;
        self
    }

    /// Prune entries whose relative path matches `predicate`.
    ///
    /// A pruned directory is not descended into.
    #[must_use]
    pub fn skip(mut self, predicate: impl Fn(&str) -> bool + 'a) -> Self {
        self.skip = Some(Box::new(predicate));
        self
    }

    /// Root directory of the walk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a traversal.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::NotADirectory`] if the root does not exist or is not a
    /// directory. Errors met while walking are yielded by the iterator.
    pub fn entries(&self) -> Result<TreeEntries<'_, 'a>> {
        if !is_dir(&self.root) {
            return Err(BookError::NotADirectory {
                path: self.root.display().to_string(),
            }
            .into());
        }

        let inner = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(TreeEntries {
            walker: self,
            inner,
        })
    }
}

/// Iterator returned by [`TreeWalker::entries`]
pub struct TreeEntries<'w, 'a> {
    walker: &'w TreeWalker<'a>,
    inner: walkdir::IntoIter,
}

impl Iterator for TreeEntries<'_, '_> {
    type Item = Result<TreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| self.walker.root.clone(), Path::to_path_buf);
                    return Some(Err(match err.into_io_error() {
                        Some(source) => FileOperationError::new(
                            FileOperation::ReadDir,
                            path,
                            "walking directory tree",
                            source,
                        )
                        .into(),
                        None => anyhow!("Symlink loop while walking {}", path.display()),
                    }));
                }
            };

            let is_directory = entry.file_type().is_dir();

            if entry.file_name().to_string_lossy().contains(METADATA_MARKER) {
                if is_directory {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.walker.root) {
                Ok(relative) => to_slash(relative),
                Err(err) => {
                    return Some(Err(err).with_context(|| {
                        format!("Entry {} escaped walk root", entry.path().display())
                    }));
                }
            };

            if let Some(skip) = &self.walker.skip
                && skip(&relative)
            {
                if is_directory {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            if is_directory && !self.walker.include_dirs {
                continue;
            }

            let depth = relative.matches('/').count();
            return Some(Ok(TreeEntry {
                path: entry.into_path(),
                relative,
                kind: if is_directory {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                depth,
            }));
        }
    }
}

/// Lists a directory tree depth-first as relative path strings.
///
/// With `include_dirs`, each directory appears (suffixed with `/`) before its
/// contents. The root itself is never listed.
///
/// # Errors
///
/// Returns [`BookError::NotADirectory`] if `root` is missing or not a directory, or
/// the first IO error met during the walk.
///
/// # Examples
///
/// ```rust,no_run
/// use bookgen::utils::fs::list_tree;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// // ["assets/", "assets/style.css", "index.html"]
/// let listing = list_tree(Path::new("site"), true)?;
/// # Ok(())
/// # }
/// ```
pub fn list_tree(root: &Path, include_dirs: bool) -> Result<Vec<String>> {
    TreeWalker::new(root)
        .include_dirs(include_dirs)
        .entries()?
        .map(|entry| entry.map(|e| e.listing_path()))
        .collect()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
