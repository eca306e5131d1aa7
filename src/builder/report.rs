use std::path::PathBuf;

/// A page that could not be built under [`FailurePolicy::Continue`](crate::config::FailurePolicy::Continue)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Source file (or directory) the failure belongs to
    pub source: PathBuf,
    /// Error with its cause chain
    pub message: String,
}

/// What a build produced.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Every HTML file written, `index.html` included
    pub pages: Vec<PathBuf>,
    /// Source pages whose markdown was emitted as raw text
    pub fallbacks: Vec<PathBuf>,
    /// Pages skipped because of an error
    pub failures: Vec<PageFailure>,
    /// Whether the theme assets were copied
    pub assets_copied: bool,
}

impl BuildReport {
    /// No page failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
