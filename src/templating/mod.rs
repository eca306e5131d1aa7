//! Page frame templating with Tera.
//!
//! A theme supplies one frame template that wraps every generated page. The template
//! is compiled once per build by [`FrameTemplate::load`] and executed for each page
//! against a fresh [`RenderContext`].
//!
//! # Template Variables
//!
//! | Variable | Content |
//! |---|---|
//! | `summary` | Navigation HTML for this page |
//! | `content` | Page body HTML |
//! | `level_path` | `./` or `../` repeated once per directory level |
//! | `book.name`, `book.author`, `book.language`, `book.description` | Book descriptor |
//! | `title` | Page title; only the root page has one |
//!
//! Templates registered under a name ending in `.html` are autoescaped, so themes
//! insert the two HTML fragments with the `safe` filter:
//!
//! ```html
//! <nav>{{ summary | safe }}</nav>
//! <link rel="stylesheet" href="{{ level_path }}gitbook/style.css">
//! <main>{{ content | safe }}</main>
//! ```
//!
//! Referencing a variable that is not in the context is an error, never an empty
//! string.

mod context;

pub use context::RenderContext;

use anyhow::Result;
use std::path::Path;
use tera::Tera;

use crate::core::{BookError, FileOperation, FileOperationError};

/// A compiled page frame template.
#[derive(Debug)]
pub struct FrameTemplate {
    tera: Tera,
    name: String,
}

impl FrameTemplate {
    /// Read and compile the template at `path`.
    ///
    /// The template is registered under its file name, which decides autoescaping.
    ///
    /// # Errors
    ///
    /// - [`BookError::NotFound`] if the file does not exist
    /// - [`BookError::RenderError`] if the template does not compile
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use bookgen::templating::FrameTemplate;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let template = FrameTemplate::load(Path::new("themes/gitbook/templates/frame.html"))?;
    /// assert_eq!(template.name(), "frame.html");
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BookError::not_found("template", path).into());
            }
            Err(e) => {
                return Err(
                    FileOperationError::new(FileOperation::Read, path, "loading template", e)
                        .into(),
                );
            }
        };

        let name = path
            .file_name()
            .map_or_else(|| "frame.html".to_string(), |n| n.to_string_lossy().into_owned());

        let template = Self::from_source(&name, &source)?;
        tracing::debug!("Compiled template {}", path.display());
        Ok(template)
    }

    /// Compile an in-memory template registered as `name`.
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, source).map_err(|e| BookError::RenderError {
            template: name.to_string(),
            message: format_tera_error(&e),
        })?;

        Ok(Self {
            tera,
            name: name.to_string(),
        })
    }

    /// Name the template is registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render one page.
    ///
    /// # Errors
    ///
    /// [`BookError::RenderError`] when execution fails, e.g. on an undefined variable.
    pub fn execute(&self, context: &RenderContext<'_>) -> Result<String> {
        let render_error = |message: String| BookError::RenderError {
            template: self.name.clone(),
            message,
        };

        let tera_context = context.to_tera().map_err(|e| render_error(format_tera_error(&e)))?;
        let html = self
            .tera
            .render(&self.name, &tera_context)
            .map_err(|e| render_error(format_tera_error(&e)))?;
        Ok(html)
    }
}

/// Flatten a Tera error and its sources into one message.
///
/// Tera's top-level message is usually just "Failed to render 'x'"; the useful part
/// (undefined variable, parse position) sits further down the source chain.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    messages
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join("\n  → ")
}
