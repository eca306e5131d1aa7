//! Test utilities for bookgen
//!
//! Helpers shared by unit tests and the integration suite: one-time tracing setup and
//! [`BookFixture`], a throwaway book source plus theme in a temporary directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookgen::builder::BookBuilder;
//! use bookgen::test_utils::BookFixture;
//!
//! let fixture = BookFixture::new().unwrap();
//! fixture.write("chapter1/README.md", "# Chapter 1").unwrap();
//!
//! let report = BookBuilder::new(fixture.config()).build().unwrap();
//! assert!(fixture.dest().join("chapter1/index.html").exists());
//! assert_eq!(report.pages.len(), 2);
//! ```

pub mod fixtures;

pub use fixtures::{BookFixture, FIXTURE_FRAME};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise `RUST_LOG`;
/// with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=bookgen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
