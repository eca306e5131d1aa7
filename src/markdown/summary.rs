//! Navigation summary (`SUMMARY.md`) rendering.
//!
//! The summary is rendered once per page, each time with that page's link prefix, and
//! its `.md` links are pointed at the generated `.html` files.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{MarkdownRenderer, Rendered};
use crate::core::{BookError, FileOperation, FileOperationError};

/// Heading text removed from the summary before rendering
pub const SUMMARY_HEADING: &str = "# Summary";

/// Point summary links at generated pages: `README.md"` becomes `index.html"`, then
/// any remaining `.md"` becomes `.html"`.
///
/// Only quoted attribute endings are touched, so link text mentioning `.md` is kept.
pub fn rewrite_summary_links(html: &str) -> String {
    html.replace(r#"README.md""#, r#"index.html""#)
        .replace(r#".md""#, r#".html""#)
}

impl MarkdownRenderer {
    /// Render summary markdown with `link_prefix` and rewrite its links to `.html`.
    ///
    /// Every `# Summary` occurrence is stripped first. A fallback carries the
    /// unstripped input.
    pub fn render_summary(&self, markdown: &str, link_prefix: &str) -> Rendered {
        let stripped = markdown.replace(SUMMARY_HEADING, "");
        match self.render(&stripped, link_prefix) {
            Rendered::Html(html) => Rendered::Html(rewrite_summary_links(&html)),
            Rendered::Fallback { diagnostic, .. } => Rendered::Fallback {
                original: markdown.to_string(),
                diagnostic,
            },
        }
    }
}

/// A book's navigation summary, read once and rendered for each page.
#[derive(Debug, Clone)]
pub struct Summary {
    path: PathBuf,
    markdown: String,
}

impl Summary {
    /// Read the summary file.
    ///
    /// # Errors
    ///
    /// [`BookError::NotFound`] when the file is missing; a file operation error for any
    /// other read failure.
    pub fn load(path: &Path) -> Result<Self> {
        let markdown = match std::fs::read_to_string(path) {
            Ok(markdown) => markdown,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BookError::not_found("summary", path).into());
            }
            Err(e) => {
                return Err(
                    FileOperationError::new(FileOperation::Read, path, "loading summary", e)
                        .into(),
                );
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            markdown,
        })
    }

    /// Summary held in memory
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from(crate::config::SUMMARY_FILE),
            markdown: markdown.into(),
        }
    }

    /// Where the summary was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw markdown
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Render for a page whose level path is `link_prefix`
    pub fn render(&self, renderer: &MarkdownRenderer, link_prefix: &str) -> Rendered {
        renderer.render_summary(&self.markdown, link_prefix)
    }
}
