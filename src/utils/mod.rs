//! Cross-platform utilities
//!
//! # Modules
//!
//! - [`fs`] - Directory predicates, metadata-preserving copies and tree traversal

pub mod fs;

pub use fs::{copy_file, copy_tree, ensure_dir, exists, is_dir, list_tree};
