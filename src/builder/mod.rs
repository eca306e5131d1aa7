//! Book build pipeline.
//!
//! [`BookBuilder::build`] turns a book source directory into a static site:
//!
//! 1. compile the theme's frame template
//! 2. load `book.json`
//! 3. wipe and recreate the destination
//! 4. load `SUMMARY.md` and render `README.md` to `index.html`
//! 5. walk the rest of the source tree, mirroring directories and rendering every
//!    `.md` file to `.html`
//! 6. copy the theme's asset directory into the destination
//!
//! Any failure before the walk aborts the build. Page failures during the walk follow
//! the configured [`FailurePolicy`]. The build is single-threaded; two builds writing
//! the same destination must not run at the same time.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookgen::builder::BookBuilder;
//! use bookgen::config::BuildConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let report = BookBuilder::new(BuildConfig::new("docs", "docs/_book")).build()?;
//! println!("{} pages", report.pages.len());
//! # Ok(())
//! # }
//! ```

pub mod paths;
mod report;

pub use report::{BuildReport, PageFailure};

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::book::BookDescriptor;
use crate::config::{BuildConfig, FailurePolicy, README_FILE};
use crate::core::{BookError, FileOperation, FileOperationError, FileResultExt};
use crate::markdown::{MarkdownRenderer, Summary};
use crate::templating::{FrameTemplate, RenderContext};
use crate::utils::fs::{TreeEntry, TreeWalker, copy_tree, ensure_dir, ensure_parent_dir, reset_dir};
use paths::{level_path, output_path};

/// Per-build state shared by every page
struct BuildInputs<'a> {
    template: &'a FrameTemplate,
    book: &'a BookDescriptor,
    summary: &'a Summary,
}

/// Builds one book according to a [`BuildConfig`].
pub struct BookBuilder {
    config: BuildConfig,
    markdown: MarkdownRenderer,
}

impl BookBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Replace the markdown renderer
    #[must_use]
    pub fn with_markdown_renderer(mut self, markdown: MarkdownRenderer) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the whole pipeline.
    ///
    /// # Errors
    ///
    /// - template, descriptor, summary or root README problems
    ///   ([`BookError::NotFound`], [`BookError::DescriptorParse`], [`BookError::RenderError`])
    /// - [`BookError::InvalidDestination`] when the destination would swallow the source
    /// - the first page failure under [`FailurePolicy::Abort`]
    /// - any asset copy failure
    ///
    /// Nothing written before a failure is cleaned up.
    pub fn build(&self) -> Result<BuildReport> {
        let config = &self.config;

        let template = FrameTemplate::load(&config.template_path())?;
        let book = BookDescriptor::load(&config.descriptor_path())?;

        let dest_in_source = self.check_destination()?;
        reset_dir(config.dest())?;
        tracing::info!(
            "Building '{}' from {} into {}",
            book.name,
            config.source().display(),
            config.dest().display()
        );

        let summary = Summary::load(&config.summary_path())?;
        let inputs = BuildInputs {
            template: &template,
            book: &book,
            summary: &summary,
        };

        let mut report = BuildReport::default();

        let readme_path = config.readme_path();
        let readme = read_markdown(&readme_path, "README")?;
        self.write_page(&inputs, &readme_path, &readme, README_FILE, 0, &mut report)
            .context("Failed to build root page")?;

        self.walk(&inputs, dest_in_source.as_deref(), &mut report)?;

        let assets = config.assets_dir();
        let asset_dest = config.asset_output_dir();
        copy_tree(&assets, &asset_dest, None).with_context(|| {
            format!("Failed to copy theme assets from {}", assets.display())
        })?;
        report.assets_copied = true;
        tracing::debug!("Copied theme assets into {}", asset_dest.display());

        tracing::info!(
            "Built {} pages ({} fallbacks, {} failures)",
            report.pages.len(),
            report.fallbacks.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Refuse destinations that contain the source; return the destination's
    /// source-relative path when it lies inside the source.
    fn check_destination(&self) -> Result<Option<String>> {
        let source = resolve(self.config.source())?;
        let dest = resolve(self.config.dest())?;

        if source.starts_with(&dest) {
            let reason = if source == dest {
                "destination is the source directory"
            } else {
                "destination contains the source directory"
            };
            return Err(BookError::InvalidDestination {
                path: self.config.dest().display().to_string(),
                reason: reason.to_string(),
            }
            .into());
        }

        Ok(dest.strip_prefix(&source).ok().map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        }))
    }

    fn walk(
        &self,
        inputs: &BuildInputs<'_>,
        dest_in_source: Option<&str>,
        report: &mut BuildReport,
    ) -> Result<()> {
        let config = &self.config;
        let inside_dest = |relative: &str| {
            dest_in_source.is_some_and(|dest| {
                relative == dest
                    || relative.strip_prefix(dest).is_some_and(|rest| rest.starts_with('/'))
            })
        };

        let walker = TreeWalker::new(config.source()).include_dirs(true).skip(|relative| {
            config.is_excluded(relative) || config.is_root_input(relative) || inside_dest(relative)
        });

        for entry in walker.entries()? {
            let entry = entry?;

            if let Err(err) = self.process_entry(inputs, &entry, report) {
                match config.failure_policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Continue => {
                        tracing::warn!("Skipping {}: {:#}", entry.relative, err);
                        report.failures.push(PageFailure {
                            source: entry.path.clone(),
                            message: format!("{err:#}"),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn process_entry(
        &self,
        inputs: &BuildInputs<'_>,
        entry: &TreeEntry,
        report: &mut BuildReport,
    ) -> Result<()> {
        if entry.is_dir() {
            return ensure_dir(&self.config.dest().join(&entry.relative));
        }
        if !entry.is_markdown() {
            tracing::trace!("Not a page: {}", entry.relative);
            return Ok(());
        }

        let markdown = read_markdown(&entry.path, "page")?;
        self.write_page(inputs, &entry.path, &markdown, &entry.relative, entry.depth, report)
            .with_context(|| format!("Failed to build page {}", entry.relative))
    }

    fn write_page(
        &self,
        inputs: &BuildInputs<'_>,
        source: &Path,
        markdown: &str,
        relative: &str,
        depth: usize,
        report: &mut BuildReport,
    ) -> Result<()> {
        let prefix = level_path(depth);

        let content = self.markdown.render(markdown, &prefix);
        if content.is_fallback() {
            report.fallbacks.push(source.to_path_buf());
        }
        let summary = inputs.summary.render(&self.markdown, &prefix);

        let title = if depth == 0 && relative == README_FILE {
            self.config.root_title.as_str()
        } else {
            ""
        };

        let context = RenderContext::new(inputs.book)
            .with_summary(summary.into_html())
            .with_content(content.into_html())
            .with_level_path(prefix)
            .with_title(title);
        let html = inputs.template.execute(&context)?;

        let target = self.config.dest().join(output_path(relative));
        ensure_parent_dir(&target)?;
        fs::write(&target, html).with_file_context(FileOperation::Write, &target, "writing page")?;

        tracing::debug!("Wrote {}", target.display());
        report.pages.push(target);
        Ok(())
    }
}

/// Read a markdown source. Invalid UTF-8 is replaced rather than rejected.
fn read_markdown(path: &Path, what: &str) -> Result<String> {
    match fs::read(path) {
        Ok(bytes) => Ok(match String::from_utf8_lossy(&bytes) {
            Cow::Borrowed(text) => text.to_string(),
            Cow::Owned(text) => {
                tracing::warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
                text
            }
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BookError::not_found(what, path).into())
        }
        Err(e) => Err(FileOperationError::new(FileOperation::Read, path, "reading markdown", e).into()),
    }
}

/// Absolute, symlink-free form of `path`. Missing trailing components are kept as-is
/// on top of the deepest existing ancestor.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute =
        std::path::absolute(path).with_file_context(FileOperation::Metadata, path, "resolving path")?;

    let mut base = absolute.clone();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = base.canonicalize() {
            return Ok(missing.iter().rev().fold(canonical, |acc: PathBuf, part| acc.join(part)));
        }
        match (base.file_name().map(ToOwned::to_owned), base.parent()) {
            (Some(name), Some(parent)) => {
                missing.push(name);
                base = parent.to_path_buf();
            }
            _ => return Ok(absolute),
        }
    }
}
