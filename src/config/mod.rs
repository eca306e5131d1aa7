//! Build configuration
//!
//! A build is a function of its inputs: the book source directory, the destination
//! directory and the theme. [`BuildConfig`] carries those paths plus the handful of
//! layout choices the pipeline needs (excluded subdirectories, asset output name, root
//! page title, failure policy). The file names inside the source directory are fixed
//! and exposed as constants.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookgen::config::{BuildConfig, FailurePolicy};
//!
//! let config = BuildConfig::new("docs", "site")
//!     .with_theme_dir("themes/dark")
//!     .with_failure_policy(FailurePolicy::Continue);
//!
//! assert!(config.template_path().ends_with("templates/frame.html"));
//! ```

use std::path::{Path, PathBuf};

/// Book descriptor file name, at the source root
pub const DESCRIPTOR_FILE: &str = "book.json";

/// Navigation summary file name, at the source root
pub const SUMMARY_FILE: &str = "SUMMARY.md";

/// Root content file name; also the name mapped to `index.html` at any depth
pub const README_FILE: &str = "README.md";

/// Default theme location, relative to the working directory
pub const DEFAULT_THEME_DIR: &str = "themes/gitbook";

/// Default build output directory name when none is given (created inside the source)
pub const DEFAULT_OUTPUT_DIR: &str = "_book";

/// What the tree walk does when a single page fails to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing page and return its error. Pages already written
    /// stay on disk.
    #[default]
    Abort,
    /// Record the failure in the build report and move on to the next entry.
    Continue,
}

/// Everything the build pipeline needs to know about where things live.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Book source directory
    pub source_dir: PathBuf,
    /// Output directory; destroyed and recreated on every build
    pub dest_dir: PathBuf,
    /// Theme root
    pub theme_dir: PathBuf,
    /// Frame template path, relative to `theme_dir`
    pub template: PathBuf,
    /// Static asset directory, relative to `theme_dir`
    pub assets: PathBuf,
    /// Name of the asset directory created inside `dest_dir`
    pub asset_dir_name: String,
    /// Top-level source subdirectories never treated as book content
    pub exclude_dirs: Vec<String>,
    /// Title given to the root index page (nested pages get an empty title)
    pub root_title: String,
    /// Per-page failure handling during the tree walk
    pub failure_policy: FailurePolicy,
}

impl BuildConfig {
    /// Config with the default theme layout.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            theme_dir: PathBuf::from(DEFAULT_THEME_DIR),
            template: PathBuf::from("templates").join("frame.html"),
            assets: PathBuf::from("assets"),
            asset_dir_name: "gitbook".to_string(),
            exclude_dirs: vec![DEFAULT_OUTPUT_DIR.to_string(), "themes".to_string()],
            root_title: "Home".to_string(),
            failure_policy: FailurePolicy::Abort,
        }
    }

    /// Use a different theme root
    #[must_use]
    pub fn with_theme_dir(mut self, theme_dir: impl Into<PathBuf>) -> Self {
        self.theme_dir = theme_dir.into();
        self
    }

    /// Set the per-page failure policy
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Add a top-level source subdirectory to skip during the walk
    #[must_use]
    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        self.exclude_dirs.push(name.into());
        self
    }

    /// Rename the asset directory inside the output
    #[must_use]
    pub fn with_asset_dir_name(mut self, name: impl Into<String>) -> Self {
        self.asset_dir_name = name.into();
        self
    }

    /// `<source>/book.json`
    pub fn descriptor_path(&self) -> PathBuf {
        self.source_dir.join(DESCRIPTOR_FILE)
    }

    /// `<source>/SUMMARY.md`
    pub fn summary_path(&self) -> PathBuf {
        self.source_dir.join(SUMMARY_FILE)
    }

    /// `<source>/README.md`
    pub fn readme_path(&self) -> PathBuf {
        self.source_dir.join(README_FILE)
    }

    /// `<theme>/<template>`
    pub fn template_path(&self) -> PathBuf {
        self.theme_dir.join(&self.template)
    }

    /// `<theme>/<assets>`
    pub fn assets_dir(&self) -> PathBuf {
        self.theme_dir.join(&self.assets)
    }

    /// `<dest>/<asset_dir_name>`
    pub fn asset_output_dir(&self) -> PathBuf {
        self.dest_dir.join(&self.asset_dir_name)
    }

    /// Whether a source-relative path (`/`-separated) lies in an excluded subdirectory
    pub fn is_excluded(&self, relative: &str) -> bool {
        let first = relative.split('/').next().unwrap_or(relative);
        self.exclude_dirs.iter().any(|dir| dir == first)
    }

    /// Whether a source-relative path is one of the root inputs rendered up front
    pub fn is_root_input(&self, relative: &str) -> bool {
        relative == README_FILE || relative == SUMMARY_FILE
    }

    /// Source directory
    pub fn source(&self) -> &Path {
        &self.source_dir
    }

    /// Destination directory
    pub fn dest(&self) -> &Path {
        &self.dest_dir
    }
}
