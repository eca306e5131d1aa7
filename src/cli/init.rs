//! Scaffold a new book.
//!
//! Creates `book.json`, `SUMMARY.md` and `README.md` in the target directory
//! (created if needed). Existing files are left alone unless `--force` is given.
//!
//! ```bash
//! bookgen init my-book
//! bookgen init --force
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DESCRIPTOR_FILE, README_FILE, SUMMARY_FILE};
use crate::core::{BookError, FileOperation, FileResultExt};
use crate::utils::fs::{ensure_dir, exists};

/// Arguments of `bookgen init`
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Overwrite existing book files
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    pub fn execute(self) -> Result<()> {
        let files = scaffold(&self.path);

        if !self.force
            && let Some((existing, _)) = files.iter().find(|(path, _)| exists(path))
        {
            return Err(BookError::AlreadyExists {
                path: existing.display().to_string(),
            }
            .into());
        }

        ensure_dir(&self.path)?;
        for (path, content) in &files {
            fs::write(path, content).with_file_context(
                FileOperation::Write,
                path,
                "scaffolding book",
            )?;
            tracing::debug!("Wrote {}", path.display());
        }

        println!("{} Initialized book at {}", "✓".green(), self.path.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Add chapters to {} and run:", SUMMARY_FILE.bright_white());
        println!("    bookgen build {}", self.path.display());

        Ok(())
    }
}

fn scaffold(dir: &Path) -> Vec<(PathBuf, String)> {
    let name = book_name(dir);
    let descriptor = serde_json::json!({
        "name": name,
        "author": "",
        "lang": "en",
        "desc": "",
    });

    vec![
        (
            dir.join(DESCRIPTOR_FILE),
            format!("{}\n", serde_json::to_string_pretty(&descriptor).unwrap_or_default()),
        ),
        (
            dir.join(SUMMARY_FILE),
            "# Summary\n\n* [Introduction](README.md)\n".to_string(),
        ),
        (dir.join(README_FILE), format!("# {name}\n\nStart writing here.\n")),
    ]
}

/// Title derived from the directory name, falling back to a generic one
fn book_name(dir: &Path) -> String {
    std::path::absolute(dir)
        .ok()
        .and_then(|abs| abs.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "My Book".to_string())
}
