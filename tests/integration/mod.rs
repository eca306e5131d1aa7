//! Integration test suite for bookgen
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build_pipeline**: End-to-end builds through the library API
//! - **cli**: The `bookgen` binary (`build`, `init`, exit codes, output)
//! - **tree_copy**: Directory listing and metadata-preserving tree copy

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod build_pipeline;
mod cli;
mod tree_copy;
