//! Error handling for bookgen
//!
//! This module provides the typed error enum used across the build pipeline and the
//! user-facing error reporting used by the CLI. The split mirrors how errors flow:
//! 1. **Strongly-typed errors** ([`BookError`]) are raised where a failure mode is known
//!    (missing book input, non-destructive copy target present, template failure)
//! 2. **User-friendly messages** ([`ErrorContext`]) are built once at the CLI boundary
//!    with actionable suggestions
//!
//! Library functions return [`anyhow::Result`] and attach context to IO failures with
//! `.with_context(...)`. A [`BookError`] raised anywhere in the chain can be recovered
//! with `downcast_ref`, which is what [`user_friendly_error`] and the tests do.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookgen::core::{BookError, user_friendly_error};
//!
//! let error = anyhow::Error::from(BookError::AlreadyExists {
//!     path: "_book/gitbook".to_string(),
//! });
//!
//! if let Some(BookError::AlreadyExists { path }) = error.downcast_ref::<BookError>() {
//!     println!("refusing to merge into {path}");
//! }
//!
//! user_friendly_error(error).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::file_error::FileOperationError;

/// The main error type for bookgen operations
///
/// # Error Categories
///
/// ## Book inputs
/// - [`NotFound`] - descriptor, summary, readme or template missing
/// - [`DescriptorParse`] - `book.json` is not valid JSON for the descriptor shape
///
/// ## File system
/// - [`AlreadyExists`] - a non-destructive copy target is already present
/// - [`NotADirectory`] - a tree listing root is missing or is a file
/// - [`InvalidDestination`] - the build destination would destroy the source
///
/// Read, write, stat, permission and timestamp failures are not variants here: they
/// travel as [`FileOperationError`] (operation, path and purpose) inside the
/// [`anyhow::Error`] chain.
///
/// ## Rendering
/// - [`RenderError`] - template compilation or execution failed
///
/// Markdown conversion failures are absent: they are contained by
/// [`crate::markdown::Rendered::Fallback`] and never become errors.
///
/// [`NotFound`]: BookError::NotFound
/// [`DescriptorParse`]: BookError::DescriptorParse
/// [`AlreadyExists`]: BookError::AlreadyExists
/// [`NotADirectory`]: BookError::NotADirectory
/// [`InvalidDestination`]: BookError::InvalidDestination
/// [`RenderError`]: BookError::RenderError
#[derive(Error, Debug)]
pub enum BookError {
    /// A required book input is missing
    ///
    /// # Fields
    /// - `what`: Human name of the input (e.g., "book descriptor", "summary")
    /// - `path`: Where it was expected
    #[error("{what} not found: {path}")]
    NotFound {
        /// Human name of the missing input
        what: String,
        /// Path that was expected to exist
        path: String,
    },

    /// Target of a non-destructive copy already exists
    #[error("File or directory already exists: {path}")]
    AlreadyExists {
        /// The pre-existing destination
        path: String,
    },

    /// Tree listing root is missing or not a directory
    #[error("Not a directory or does not exist: {path}")]
    NotADirectory {
        /// The path that was expected to be a directory
        path: String,
    },

    /// `book.json` could not be parsed
    #[error("Invalid book descriptor {path}: {reason}")]
    DescriptorParse {
        /// Descriptor file path
        path: String,
        /// Parser message
        reason: String,
    },

    /// Template compilation or execution failed
    #[error("Failed to render template '{template}': {message}")]
    RenderError {
        /// Template name
        template: String,
        /// Flattened Tera error chain
        message: String,
    },

    /// The destination cannot be reset without deleting the source
    #[error("Refusing to use {path} as build destination: {reason}")]
    InvalidDestination {
        /// Requested destination
        path: String,
        /// Why it was rejected
        reason: String,
    },
}

impl BookError {
    /// Shorthand for [`BookError::NotFound`]
    pub fn not_found(what: impl Into<String>, path: &std::path::Path) -> Self {
        Self::NotFound {
            what: what.into(),
            path: path.display().to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`BookError`] anywhere in the chain, then falls back to the kind of
/// the underlying [`std::io::Error`] (bare or inside a
/// [`FileOperationError`]), then to a generic message carrying the full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = message_with_chain(&error);

    if let Some(book_error) = error.chain().find_map(|e| e.downcast_ref::<BookError>()) {
        return create_error_context(book_error, message);
    }

    let io_kind = error.chain().find_map(|e| {
        e.downcast_ref::<FileOperationError>()
            .map(FileOperationError::kind)
            .or_else(|| e.downcast_ref::<std::io::Error>().map(std::io::Error::kind))
    });

    if let Some(kind) = io_kind {
        match kind {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(message)
                    .with_suggestion("Check ownership and permissions of the source and destination directories");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(message)
                    .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    ErrorContext::new(message)
}

/// Top-level message followed by a numbered "Caused by" list
fn message_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

fn create_error_context(error: &BookError, message: String) -> ErrorContext {
    match error {
        BookError::NotFound { what, .. } => ErrorContext::new(message)
            .with_suggestion(format!(
                "Create the missing {what}, or run 'bookgen init' to scaffold a new book"
            ))
            .with_details("A book source needs book.json, SUMMARY.md and README.md at its root"),

        BookError::DescriptorParse { .. } => ErrorContext::new(message)
            .with_suggestion(
                "book.json must be a JSON object with string fields: name, author, lang, desc",
            ),

        BookError::AlreadyExists { path } => ErrorContext::new(message)
            .with_suggestion(format!("Remove {path} before copying, the copy never merges"))
            .with_details("Tree copies are non-destructive and refuse to write into an existing directory"),

        BookError::NotADirectory { .. } => ErrorContext::new(message)
            .with_suggestion("Point the command at an existing directory"),

        BookError::RenderError { .. } => ErrorContext::new(message)
            .with_suggestion(
                "Check the frame template: it may use summary, content, level_path, title and book.*",
            )
            .with_details("Referencing a variable that is not in the render context is an error"),

        BookError::InvalidDestination { .. } => ErrorContext::new(message)
            .with_suggestion("Choose an output directory that is not the source or one of its parents (default: <source>/_book)"),
    }
}
