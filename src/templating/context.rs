use serde::Serialize;

use crate::book::BookDescriptor;

/// Variables for one execution of a frame template.
///
/// Built fresh for every page; the descriptor is borrowed for the whole build.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    /// Navigation HTML
    pub summary: String,
    /// Page body HTML
    pub content: String,
    /// Relative prefix from the page back to the output root
    pub level_path: String,
    /// Book metadata
    pub book: &'a BookDescriptor,
    /// Page title, empty for nested pages
    pub title: String,
}

impl<'a> RenderContext<'a> {
    /// Context for a root-level page with no title and empty fragments
    pub fn new(book: &'a BookDescriptor) -> Self {
        Self {
            summary: String::new(),
            content: String::new(),
            level_path: "./".to_string(),
            book,
            title: String::new(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_level_path(mut self, level_path: impl Into<String>) -> Self {
        self.level_path = level_path.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub(crate) fn to_tera(&self) -> tera::Result<tera::Context> {
        tera::Context::from_serialize(self)
    }
}
