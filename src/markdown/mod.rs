//! Markdown to HTML conversion with link prefixing and failure containment.
//!
//! Every page of a book goes through [`MarkdownRenderer::render`], which returns a
//! [`Rendered`] value instead of an error. A document that cannot be converted (the
//! converter returns an error or panics) comes back as [`Rendered::Fallback`] holding
//! the untouched source text, so one broken chapter shows up as raw text instead of
//! stopping the build.
//!
//! # Link prefixing
//!
//! Book documents link to each other relative to the book root (`chapter1/intro.md`).
//! A page nested `n` directories deep is rendered with a prefix of `n` times `../`
//! so those links still resolve from its position in the output tree. The rule,
//! applied to link and image destinations:
//!
//! | Destination | Result with prefix `../` |
//! |---|---|
//! | `chapter1.md` | `../chapter1.md` |
//! | `/chapter1.md` | `../chapter1.md` |
//! | `./local.md`, `../up.md` | unchanged |
//! | `#anchor` | unchanged |
//! | `https://…`, `mailto:…`, `//cdn…` | unchanged |
//! | `<https://…>`, `<team@example.com>` | unchanged |
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookgen::markdown::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! let html = renderer.render("[Next](part2/next.md)", "../").into_html();
//! assert!(html.contains(r#"href="../part2/next.md""#));
//! ```

pub mod summary;

pub use summary::{Summary, rewrite_summary_links};

use anyhow::Result;
use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

/// Outcome of converting one markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Converted HTML fragment
    Html(String),
    /// Conversion failed; `original` is the unmodified input text
    Fallback {
        /// The markdown exactly as it was passed in
        original: String,
        /// What went wrong
        diagnostic: String,
    },
}

impl Rendered {
    /// Whether conversion fell back to the raw text
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback { .. })
    }

    /// The HTML, or the original text for a fallback
    pub fn into_html(self) -> String {
        match self {
            Rendered::Html(html) => html,
            Rendered::Fallback { original, .. } => original,
        }
    }
}

/// Markdown conversion backend.
///
/// Implementations may fail by returning an error or by panicking; both are contained
/// by [`MarkdownRenderer`].
pub trait Converter {
    /// Convert `markdown` to an HTML fragment, prefixing book-relative links with
    /// `link_prefix`
    fn convert(&self, markdown: &str, link_prefix: &str) -> Result<String>;
}

/// CommonMark conversion with pulldown-cmark.
///
/// Enabled extensions: tables, strikethrough, task lists and smart punctuation. Bare
/// URLs in running text become links.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkConverter;

impl CmarkConverter {
    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
    }
}

impl Converter for CmarkConverter {
    fn convert(&self, markdown: &str, link_prefix: &str) -> Result<String> {
        let mut link_depth = 0usize;
        let mut in_code_block = false;

        let events = TextMergeStream::new(Parser::new_ext(markdown, Self::options())).flat_map(
            |event| match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    link_depth += 1;
                    // Autolinks are absolute; the writer adds `mailto:` to email ones
                    let dest_url = match link_type {
                        LinkType::Autolink | LinkType::Email => dest_url,
                        _ => prefixed(dest_url, link_prefix),
                    };
                    vec![Event::Start(Tag::Link {
                        link_type,
                        dest_url,
                        title,
                        id,
                    })]
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    link_depth += 1;
                    vec![Event::Start(Tag::Image {
                        link_type,
                        dest_url: prefixed(dest_url, link_prefix),
                        title,
                        id,
                    })]
                }
                Event::End(TagEnd::Link | TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                    vec![event]
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    vec![event]
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    vec![event]
                }
                Event::Text(text) if link_depth == 0 && !in_code_block => linkify(text),
                other => vec![other],
            },
        );

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events);
        Ok(output)
    }
}

/// Bare `http`, `https`, `ftp`, `file` and `mailto` URLs in running text.
fn bare_url_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"\b(?:(?:https?|ftp|file)://|mailto:)[^\s<>"]+"#).ok())
        .as_ref()
}

/// Split a text run into text and autolink events around bare URLs.
///
/// Trailing sentence punctuation is not part of the URL.
fn linkify(text: CowStr<'_>) -> Vec<Event<'_>> {
    let Some(pattern) = bare_url_pattern() else {
        return vec![Event::Text(text)];
    };
    let spans: Vec<(usize, usize)> = pattern
        .find_iter(&text)
        .filter_map(|found| {
            let url = found
                .as_str()
                .trim_end_matches(['.', ',', ':', ';', '!', '?', ')', '\'']);
            let target = url.split_once(':').map_or("", |(_, rest)| rest);
            (!target.trim_start_matches('/').is_empty())
                .then(|| (found.start(), found.start() + url.len()))
        })
        .collect();
    if spans.is_empty() {
        return vec![Event::Text(text)];
    }

    let mut events = Vec::with_capacity(spans.len() * 3 + 1);
    let mut last = 0;
    for (start, end) in spans {
        if start > last {
            events.push(Event::Text(text[last..start].to_string().into()));
        }
        let url = &text[start..end];
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: url.to_string().into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(url.to_string().into()));
        events.push(Event::End(TagEnd::Link));
        last = end;
    }
    if last < text.len() {
        events.push(Event::Text(text[last..].to_string().into()));
    }
    events
}

fn prefixed<'a>(dest: CowStr<'a>, link_prefix: &str) -> CowStr<'a> {
    match apply_link_prefix(&dest, link_prefix) {
        Some(rewritten) => CowStr::from(rewritten),
        None => dest,
    }
}

/// Apply the link-prefix rule to one destination.
///
/// Returns `None` when the destination is left as-is.
pub fn apply_link_prefix(dest: &str, link_prefix: &str) -> Option<String> {
    if link_prefix.is_empty() || dest.is_empty() {
        return None;
    }
    if dest.starts_with("//") || dest.starts_with('#') || is_dot_relative(dest) {
        return None;
    }
    if let Some(rest) = dest.strip_prefix('/') {
        return Some(format!("{link_prefix}{rest}"));
    }
    if has_scheme(dest) {
        return None;
    }
    Some(format!("{link_prefix}{dest}"))
}

/// Explicitly relative to the current page: `.`, `..`, `./…` or `../…`
fn is_dot_relative(dest: &str) -> bool {
    matches!(dest, "." | "..") || dest.starts_with("./") || dest.starts_with("../")
}

/// `scheme ":"` per RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`
fn has_scheme(dest: &str) -> bool {
    let Some((scheme, _)) = dest.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Failure-isolating markdown renderer.
pub struct MarkdownRenderer {
    converter: Box<dyn Converter>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Renderer backed by [`CmarkConverter`]
    pub fn new() -> Self {
        Self::with_converter(CmarkConverter)
    }

    /// Renderer backed by a custom converter
    pub fn with_converter(converter: impl Converter + 'static) -> Self {
        Self {
            converter: Box::new(converter),
        }
    }

    /// Convert `markdown`, prefixing book-relative links with `link_prefix`.
    ///
    /// Never fails: a converter error or panic yields [`Rendered::Fallback`] with the
    /// input text and logs a warning.
    pub fn render(&self, markdown: &str, link_prefix: &str) -> Rendered {
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| self.converter.convert(markdown, link_prefix)));

        let diagnostic = match outcome {
            Ok(Ok(html)) => return Rendered::Html(html),
            Ok(Err(err)) => format!("{err:#}"),
            Err(payload) => panic_message(payload.as_ref()),
        };

        tracing::warn!("Render Markdown failed, using raw text: {}", diagnostic);
        Rendered::Fallback {
            original: markdown.to_string(),
            diagnostic,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "converter panicked".to_string()
    }
}
