//! Source to output path mapping.

use crate::config::README_FILE;

/// Output name of a `README.md` at any depth
pub const INDEX_FILE: &str = "index.html";

/// Prefix leading from a page `depth` directories below the root back to the root.
///
/// `./` at depth 0, otherwise `../` repeated `depth` times.
///
/// # Examples
///
/// ```rust,no_run
/// use bookgen::builder::paths::level_path;
///
/// assert_eq!(level_path(0), "./");
/// assert_eq!(level_path(2), "../../");
/// ```
pub fn level_path(depth: usize) -> String {
    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

/// Output path for a `/`-separated source-relative path.
///
/// A file named exactly `README.md` becomes `index.html`; any other `.md` suffix
/// becomes `.html`. Directory components are never changed.
pub fn output_path(relative: &str) -> String {
    let (dir, file) = match relative.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, relative),
    };

    let mapped = if file == README_FILE {
        INDEX_FILE.to_string()
    } else if let Some(stem) = file.strip_suffix(".md") {
        format!("{stem}.html")
    } else {
        file.to_string()
    };

    match dir {
        Some(dir) => format!("{dir}/{mapped}"),
        None => mapped,
    }
}
