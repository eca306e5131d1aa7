//! bookgen - static HTML books from markdown
//!
//! bookgen reads a book source directory and writes a browsable static site:
//!
//! ```text
//! book/                          _book/
//! ├── book.json                  ├── index.html
//! ├── SUMMARY.md         ──▶     ├── chapter1/
//! ├── README.md                  │   ├── index.html
//! └── chapter1/                  │   └── section.html
//!     ├── README.md              └── gitbook/        (theme assets)
//!     └── section.md
//! ```
//!
//! Every page is the theme's frame template filled with the page body, the navigation
//! summary and the book metadata. Links in nested pages are prefixed with `../` so
//! that book-root-relative links keep working at any depth.
//!
//! # Modules
//!
//! - [`builder`] - The build pipeline and its report
//! - [`book`] - `book.json` descriptor
//! - [`markdown`] - Markdown conversion with link prefixing and fallback on failure
//! - [`templating`] - Tera frame template and page context
//! - [`config`] - Build configuration and fixed file names
//! - [`utils`] - Directory listing, traversal and tree copy
//! - [`core`] - Error types
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use bookgen::builder::BookBuilder;
//! use bookgen::config::{BuildConfig, FailurePolicy};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = BuildConfig::new("book", "book/_book")
//!     .with_theme_dir("themes/gitbook")
//!     .with_failure_policy(FailurePolicy::Continue);
//!
//! let report = BookBuilder::new(config).build()?;
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.source.display(), failure.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod book;
pub mod builder;
pub mod cli;
pub mod config;
pub mod core;
pub mod markdown;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
