//! Shared helpers for the bookgen integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use bookgen::test_utils::{BookFixture, init_test_logging};

/// The `bookgen` binary under test
pub fn bookgen() -> Command {
    Command::cargo_bin("bookgen").expect("bookgen binary should be built")
}

/// The theme shipped in the repository
pub fn bundled_theme() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("themes").join("gitbook")
}

/// Every file under `root` keyed by `/`-separated relative path
pub fn snapshot(root: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    for relative in bookgen::utils::list_tree(root, false)? {
        let path = root.join(&relative);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        files.insert(relative, bytes);
    }
    Ok(files)
}

/// A fixture book with a few chapters at different depths
pub fn chaptered_book() -> Result<BookFixture> {
    let fixture = BookFixture::new()?;
    fixture.write(
        "SUMMARY.md",
        "# Summary\n\n\
         * [Introduction](README.md)\n\
         * [Chapter 1](chapter1/README.md)\n    \
         * [Setup](chapter1/setup.md)\n\
         * [Deep](part/a/b/deep.md)\n",
    )?;
    fixture.write("chapter1/README.md", "# Chapter 1\n\nSee [setup](chapter1/setup.md).\n")?;
    fixture.write("chapter1/setup.md", "# Setup\n\n![diagram](images/setup.png)\n")?;
    fixture.write("part/a/b/deep.md", "# Deep\n\n[Back home](/README.md)\n")?;
    fixture.write("images/setup.png", "not really a png")?;
    Ok(fixture)
}
