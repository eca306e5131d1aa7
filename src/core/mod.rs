//! Core types and error handling for bookgen
//!
//! # Modules
//!
//! - [`error`] - [`BookError`] and the CLI-facing [`ErrorContext`]
//! - [`file_error`] - File operation errors carrying path and purpose
//!
//! # Error Handling Pattern
//!
//! Library code returns [`anyhow::Result`]. Known failure modes are raised as
//! [`BookError`] variants so callers can match on them with `downcast_ref`; IO failures
//! carry a [`FileOperationError`] describing what was being done and why.

pub mod error;
pub mod file_error;

pub use error::{BookError, ErrorContext, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
