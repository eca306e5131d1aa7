//! Render a book source directory into a static site.
//!
//! ```bash
//! # Source ".", output "./_book", theme "./themes/gitbook"
//! bookgen build
//!
//! bookgen build docs --output public --theme vendor/themes/gitbook
//! ```
//!
//! The output directory is deleted and recreated on every build. With
//! `--keep-going`, pages that fail are listed at the end and the command exits
//! non-zero; without it the first failure stops the build.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::builder::{BookBuilder, BuildReport};
use crate::config::{BuildConfig, DEFAULT_OUTPUT_DIR, DEFAULT_THEME_DIR, FailurePolicy};

/// Arguments of `bookgen build`
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Book source directory
    #[arg(default_value = ".")]
    source: PathBuf,

    /// Output directory [default: <SOURCE>/_book]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Theme directory holding templates/frame.html and assets/
    #[arg(long, default_value = DEFAULT_THEME_DIR)]
    theme: PathBuf,

    /// Keep building after a page fails and report every failure at the end
    #[arg(long)]
    keep_going: bool,
}

impl BuildCommand {
    /// Build configuration described by the arguments
    pub fn config(&self) -> BuildConfig {
        let dest = self.output.clone().unwrap_or_else(|| self.source.join(DEFAULT_OUTPUT_DIR));
        let policy = if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        BuildConfig::new(&self.source, dest)
            .with_theme_dir(&self.theme)
            .with_failure_policy(policy)
    }

    /// Run the build, printing a summary unless `quiet`
    pub fn execute(self, quiet: bool) -> Result<()> {
        let config = self.config();
        let report = BookBuilder::new(config.clone()).build()?;

        if !quiet {
            print_report(&report, config.dest());
        }

        if !report.is_success() {
            bail!("{} page(s) failed to build", report.failures.len());
        }
        Ok(())
    }
}

fn print_report(report: &BuildReport, dest: &Path) {
    println!(
        "{} Built {} page(s) into {}",
        "✓".green(),
        report.pages.len(),
        dest.display()
    );

    if !report.fallbacks.is_empty() {
        println!(
            "{} {} page(s) could not be converted and contain raw markdown:",
            "⚠".yellow(),
            report.fallbacks.len()
        );
        for path in &report.fallbacks {
            println!("  {}", path.display());
        }
    }

    if !report.failures.is_empty() {
        println!("{} {} page(s) failed:", "✗".red(), report.failures.len());
        for failure in &report.failures {
            println!("  {}: {}", failure.source.display().to_string().bold(), failure.message);
        }
    }
}
