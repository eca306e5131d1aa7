//! Sample book fixtures

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::BuildConfig;

/// Frame template installed by [`BookFixture::new`].
///
/// Each variable sits on its own line so tests can match on it.
pub const FIXTURE_FRAME: &str = r#"<!DOCTYPE html>
<title>{{ title }}</title>
<meta name="book" content="{{ book.name }}">
<meta name="author" content="{{ book.author }}">
<link rel="stylesheet" href="{{ level_path }}gitbook/style.css">
<nav>{{ summary | safe }}</nav>
<main>{{ content | safe }}</main>
"#;

const DESCRIPTOR: &str =
    r#"{"name": "Fixture Book", "author": "Test Author", "lang": "en", "desc": "A test book"}"#;

const SUMMARY: &str = "# Summary\n\n* [Introduction](README.md)\n";

const README: &str = "# Welcome\n\nThis is the introduction.\n";

/// A book source directory and a theme, inside one temporary directory.
///
/// Layout:
///
/// ```text
/// <temp>/book/{book.json, SUMMARY.md, README.md}
/// <temp>/theme/templates/frame.html
/// <temp>/theme/assets/style.css
/// <temp>/site/            (build destination, not created)
/// ```
///
/// The directory is removed when the fixture is dropped.
pub struct BookFixture {
    temp: TempDir,
}

impl BookFixture {
    /// Minimal buildable book with the fixture theme
    pub fn new() -> Result<Self> {
        let fixture = Self::empty()?;
        fixture.write("book.json", DESCRIPTOR)?;
        fixture.write("SUMMARY.md", SUMMARY)?;
        fixture.write("README.md", README)?;
        fixture.write_theme("templates/frame.html", FIXTURE_FRAME)?;
        fixture.write_theme("assets/style.css", "body { margin: 0; }\n")?;
        Ok(fixture)
    }

    /// Empty `book/` and `theme/` directories
    pub fn empty() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp directory")?;
        fs::create_dir_all(temp.path().join("book"))?;
        fs::create_dir_all(temp.path().join("theme"))?;
        Ok(Self { temp })
    }

    /// Temporary root holding everything
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Book source directory
    pub fn source(&self) -> PathBuf {
        self.temp.path().join("book")
    }

    /// Theme directory
    pub fn theme(&self) -> PathBuf {
        self.temp.path().join("theme")
    }

    /// Build destination
    pub fn dest(&self) -> PathBuf {
        self.temp.path().join("site")
    }

    /// Build configuration wiring the three directories together
    pub fn config(&self) -> BuildConfig {
        BuildConfig::new(self.source(), self.dest()).with_theme_dir(self.theme())
    }

    /// Write a file under the book source, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        write_file(&self.source().join(relative), content)
    }

    /// Write a file under the theme, creating parent directories
    pub fn write_theme(&self, relative: &str, content: &str) -> Result<PathBuf> {
        write_file(&self.theme().join(relative), content)
    }

    /// Remove a file from the book source
    pub fn remove(&self, relative: &str) -> Result<()> {
        let path = self.source().join(relative);
        fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))
    }

    /// Read a generated output file
    pub fn read_output(&self, relative: &str) -> Result<String> {
        let path = self.dest().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn write_file(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
