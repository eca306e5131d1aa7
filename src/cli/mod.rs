//! Command-line interface for bookgen.
//!
//! # Commands
//!
//! - `build` - Render a book source directory into a static HTML site
//! - `init` - Scaffold `book.json`, `SUMMARY.md` and `README.md` in a directory
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: warnings and errors only, no build summary
//!
//! `RUST_LOG`, when set, overrides both flags.
//!
//! # Examples
//!
//! ```bash
//! # Build the book in the current directory into ./_book
//! bookgen build
//!
//! # Build with a custom theme, collecting page failures instead of stopping
//! bookgen build docs -o site --theme themes/dark --keep-going
//!
//! # Start a new book
//! bookgen init my-book
//! ```

mod build;
mod init;

pub use build::BuildCommand;
pub use init::InitCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure for bookgen.
#[derive(Parser, Debug)]
#[command(
    name = "bookgen",
    about = "Build static HTML books from markdown",
    version,
    author,
    long_about = "bookgen renders a directory of markdown chapters, a SUMMARY.md table of contents and a book.json descriptor into a navigable static site."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output with debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors, and skip the build summary
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a book into a static site
    Build(BuildCommand),

    /// Create a new book skeleton
    Init(InitCommand),
}

impl Cli {
    /// Run the selected command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Build(cmd) => cmd.execute(self.quiet),
            Commands::Init(cmd) => cmd.execute(),
        }
    }

    /// Log level implied by the global flags
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// `RUST_LOG` if set, otherwise [`log_level`](Self::log_level)
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level()))
    }
}
