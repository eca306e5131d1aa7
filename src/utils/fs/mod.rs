//! File system utilities used by the book build
//!
//! # Key Features
//!
//! - **Predicates**: [`exists`] and [`is_dir`] never fail, folding errors into `false`
//! - **Metadata-preserving copy**: [`copy_file`] keeps bytes, mtime and permission
//!   bits, and recreates symbolic links instead of following them
//! - **Deterministic traversal**: [`TreeWalker`] and [`list_tree`] walk depth-first in
//!   sorted order without recursion
//! - **Non-destructive tree copy**: [`copy_tree`] refuses to merge into an existing
//!   destination
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookgen::utils::fs::{copy_tree, list_tree, reset_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! reset_dir(Path::new("_book"))?;
//! copy_tree(Path::new("themes/gitbook/assets"), Path::new("_book/gitbook"), None)?;
//!
//! for path in list_tree(Path::new("_book"), true)? {
//!     println!("{path}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Platform Considerations
//!
//! Relative paths produced by the traversal always use `/`. Permission bits are
//! copied through [`std::fs::Permissions`], which on Windows carries only the
//! read-only flag.

pub mod copy;
pub mod dirs;
pub mod tree;

pub use copy::copy_file;
pub use dirs::{copy_tree, ensure_dir, ensure_parent_dir, exists, is_dir, remove_dir_all, reset_dir};
pub use tree::{EntryKind, METADATA_MARKER, TreeEntries, TreeEntry, TreeWalker, list_tree};
