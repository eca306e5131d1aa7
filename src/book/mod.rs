//! Book descriptor (`book.json`) loading.
//!
//! ```json
//! {
//!   "name": "The Rust Field Guide",
//!   "author": "Jane Doe",
//!   "lang": "en",
//!   "desc": "Notes collected while learning Rust"
//! }
//! ```
//!
//! `language` and `description` are accepted as spellings of `lang` and `desc`.
//! Absent fields default to empty strings; anything that is not a JSON object with
//! string fields is rejected.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{BookError, FileOperation, FileOperationError};

/// Metadata identifying a book; read-only for the duration of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDescriptor {
    /// Book title
    pub name: String,
    /// Author
    pub author: String,
    /// Language code, e.g. `en`
    #[serde(rename(deserialize = "lang"), alias = "language")]
    pub language: String,
    /// Short description
    #[serde(rename(deserialize = "desc"), alias = "description")]
    pub description: String,
}

impl BookDescriptor {
    /// Parse a descriptor from JSON text. `origin` is only used in error messages.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            BookError::DescriptorParse {
                path: origin.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Load the descriptor file.
    ///
    /// # Errors
    ///
    /// - [`BookError::NotFound`] if the file does not exist
    /// - [`BookError::DescriptorParse`] if it is not a valid descriptor
    /// - a file operation error for any other read failure
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BookError::not_found("book descriptor", path).into());
            }
            Err(e) => {
                return Err(FileOperationError::new(
                    FileOperation::Read,
                    path,
                    "loading book descriptor",
                    e,
                )
                .into());
            }
        };

        let book = Self::from_json(&json, path)?;
        tracing::debug!("Loaded book descriptor '{}' from {}", book.name, path.display());
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_short_keys() {
        let book = BookDescriptor::from_json(
            r#"{"name": "Guide", "author": "Ann", "lang": "en", "desc": "A guide"}"#,
            Path::new("book.json"),
        )
        .unwrap();

        assert_eq!(book.name, "Guide");
        assert_eq!(book.author, "Ann");
        assert_eq!(book.language, "en");
        assert_eq!(book.description, "A guide");
    }

    #[test]
    fn test_parse_long_keys_and_missing_fields() {
        let book = BookDescriptor::from_json(
            r#"{"name": "Guide", "language": "fr", "description": "Un guide"}"#,
            Path::new("book.json"),
        )
        .unwrap();

        assert_eq!(book.language, "fr");
        assert_eq!(book.description, "Un guide");
        assert_eq!(book.author, "");
    }

    #[test]
    fn test_parse_malformed() {
        for json in ["{", r#""just a string""#, r#"{"name": 3}"#] {
            let err = BookDescriptor::from_json(json, Path::new("book.json")).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<BookError>(), Some(BookError::DescriptorParse { .. })),
                "expected parse error for {json}"
            );
        }
    }

    #[test]
    fn test_load_missing() {
        let temp = tempdir().unwrap();
        let err = BookDescriptor::load(&temp.path().join("book.json")).unwrap_err();

        assert!(matches!(err.downcast_ref::<BookError>(), Some(BookError::NotFound { .. })));
    }

    #[test]
    fn test_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("book.json");
        std::fs::write(&path, r#"{"name": "Loaded"}"#).unwrap();

        assert_eq!(BookDescriptor::load(&path).unwrap().name, "Loaded");
    }

    #[test]
    fn test_serializes_long_names() {
        let book = BookDescriptor {
            name: "N".to_string(),
            author: "A".to_string(),
            language: "en".to_string(),
            description: "D".to_string(),
        };
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value["language"], "en");
        assert_eq!(value["description"], "D");
    }
}
