//! bookgen CLI entry point
//!
//! Parses arguments, installs the tracing subscriber and runs the selected command.
//! Errors are printed with context and suggestions, and the process exits with
//! status 1.

use bookgen::cli;
use bookgen::core::user_friendly_error;
use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    // Logs go to stderr so the build summary on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
