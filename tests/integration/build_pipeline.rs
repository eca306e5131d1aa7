//! End-to-end builds through the library API

use bookgen::builder::BookBuilder;
use bookgen::config::{BuildConfig, FailurePolicy};
use bookgen::core::BookError;
use std::fs;

use crate::common::{BookFixture, bundled_theme, chaptered_book, init_test_logging, snapshot};

#[test]
fn test_minimal_book_produces_index_and_assets_only() {
    init_test_logging(None);
    let fixture = BookFixture::new().unwrap();

    BookBuilder::new(fixture.config()).build().unwrap();

    let files: Vec<String> = snapshot(&fixture.dest()).unwrap().into_keys().collect();
    assert_eq!(files, vec!["gitbook/style.css", "index.html"]);
}

#[test]
fn test_chaptered_book_layout() {
    let fixture = chaptered_book().unwrap();

    let report = BookBuilder::new(fixture.config()).build().unwrap();

    let files: Vec<String> = snapshot(&fixture.dest()).unwrap().into_keys().collect();
    assert_eq!(
        files,
        vec![
            "chapter1/index.html",
            "chapter1/setup.html",
            "gitbook/style.css",
            "index.html",
            "part/a/b/deep.html",
        ]
    );
    assert_eq!(report.pages.len(), 4);
    assert!(report.fallbacks.is_empty());
    // Directories are mirrored even when they hold no pages
    assert!(fixture.dest().join("images").is_dir());
}

#[test]
fn test_summary_links_point_at_html_at_every_depth() {
    let fixture = chaptered_book().unwrap();
    BookBuilder::new(fixture.config()).build().unwrap();

    let index = fixture.read_output("index.html").unwrap();
    assert!(index.contains(r#"href="./index.html""#));
    assert!(index.contains(r#"href="./chapter1/index.html""#));
    assert!(index.contains(r#"href="./chapter1/setup.html""#));
    assert!(!index.contains(r#".md""#));

    let setup = fixture.read_output("chapter1/setup.html").unwrap();
    assert!(setup.contains(r#"href="../index.html""#));
    assert!(setup.contains(r#"href="../part/a/b/deep.html""#));

    let deep = fixture.read_output("part/a/b/deep.html").unwrap();
    assert!(deep.contains(r#"href="../../../chapter1/setup.html""#));
    assert!(!deep.contains("Summary</h1>"));
}

#[test]
fn test_content_links_are_prefixed_by_depth() {
    let fixture = chaptered_book().unwrap();
    BookBuilder::new(fixture.config()).build().unwrap();

    let deep = fixture.read_output("part/a/b/deep.html").unwrap();
    assert!(deep.contains(r#"href="../../../gitbook/style.css""#));
    assert!(deep.contains(r#"href="../../../README.md""#));

    let setup = fixture.read_output("chapter1/setup.html").unwrap();
    assert!(setup.contains(r#"src="../images/setup.png""#));

    let chapter = fixture.read_output("chapter1/index.html").unwrap();
    assert!(chapter.contains(r#"href="../chapter1/setup.md""#));
}

#[test]
fn test_only_root_page_has_title() {
    let fixture = chaptered_book().unwrap();
    BookBuilder::new(fixture.config()).build().unwrap();

    assert!(fixture.read_output("index.html").unwrap().contains("<title>Home</title>"));
    assert!(fixture.read_output("chapter1/index.html").unwrap().contains("<title></title>"));
}

#[test]
fn test_stale_destination_content_is_removed() {
    let fixture = BookFixture::new().unwrap();
    fs::create_dir_all(fixture.dest().join("old/nested")).unwrap();
    fs::write(fixture.dest().join("old/nested/page.html"), "stale").unwrap();
    fs::write(fixture.dest().join("unrelated.txt"), "stale").unwrap();

    BookBuilder::new(fixture.config()).build().unwrap();

    assert!(!fixture.dest().join("old").exists());
    assert!(!fixture.dest().join("unrelated.txt").exists());
    assert!(fixture.dest().join("index.html").exists());
}

#[test]
fn test_rebuild_is_deterministic() {
    let fixture = chaptered_book().unwrap();

    BookBuilder::new(fixture.config()).build().unwrap();
    let first = snapshot(&fixture.dest()).unwrap();
    BookBuilder::new(fixture.config()).build().unwrap();
    let second = snapshot(&fixture.dest()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_bundled_theme() {
    let fixture = chaptered_book().unwrap();
    let config = BuildConfig::new(fixture.source(), fixture.dest()).with_theme_dir(bundled_theme());

    BookBuilder::new(config).build().unwrap();

    let index = fixture.read_output("index.html").unwrap();
    assert!(index.contains("<title>Home · Fixture Book</title>"));
    assert!(index.contains(r#"<html lang="en">"#));
    assert!(index.contains(r#"href="./gitbook/style.css""#));

    let deep = fixture.read_output("part/a/b/deep.html").unwrap();
    assert!(deep.contains("<title>Fixture Book</title>"));
    assert!(deep.contains(r#"href="../../../index.html""#));

    assert_eq!(
        fs::read(fixture.dest().join("gitbook/style.css")).unwrap(),
        fs::read(bundled_theme().join("assets/style.css")).unwrap()
    );
}

#[test]
fn test_missing_summary_aborts() {
    let fixture = BookFixture::new().unwrap();
    fixture.remove("SUMMARY.md").unwrap();

    let err = BookBuilder::new(fixture.config()).build().unwrap_err();

    match err.downcast_ref::<BookError>() {
        Some(BookError::NotFound { what, .. }) => assert_eq!(what, "summary"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(!fixture.dest().join("index.html").exists());
}

#[test]
fn test_malformed_descriptor_aborts() {
    let fixture = BookFixture::new().unwrap();
    fixture.write("book.json", "{ not json").unwrap();

    let err = BookBuilder::new(fixture.config()).build().unwrap_err();
    assert!(matches!(err.downcast_ref::<BookError>(), Some(BookError::DescriptorParse { .. })));
}

#[test]
fn test_missing_template_aborts_before_output() {
    let fixture = BookFixture::new().unwrap();
    fs::create_dir_all(fixture.dest()).unwrap();
    fs::write(fixture.dest().join("keep.html"), "keep").unwrap();
    let config = fixture.config().with_theme_dir(fixture.root().join("no-theme"));

    let err = BookBuilder::new(config).build().unwrap_err();

    assert!(matches!(err.downcast_ref::<BookError>(), Some(BookError::NotFound { .. })));
    assert!(fixture.dest().join("keep.html").exists());
}

#[test]
fn test_asset_copy_conflict_keeps_pages() {
    let fixture = BookFixture::new().unwrap();
    // A source directory named like the asset directory is mirrored first
    fixture.write("gitbook/notes.md", "notes").unwrap();

    let err = BookBuilder::new(fixture.config()).build().unwrap_err();

    assert!(err.chain().any(|e| matches!(
        e.downcast_ref::<BookError>(),
        Some(BookError::AlreadyExists { .. })
    )));
    assert!(fixture.dest().join("index.html").exists());
    assert!(fixture.dest().join("gitbook/notes.html").exists());
}

#[test]
fn test_failure_policy_abort_and_continue() {
    let fixture = BookFixture::new().unwrap();
    fixture
        .write_theme(
            "templates/frame.html",
            "{% if content is containing('explode') %}{{ undefined_variable }}{% endif %}{{ content | safe }}",
        )
        .unwrap();
    fixture.write("a.md", "first").unwrap();
    let bad = fixture.write("b.md", "explode").unwrap();
    fixture.write("c.md", "last").unwrap();

    let err = BookBuilder::new(fixture.config()).build().unwrap_err();
    assert!(err.chain().any(|e| matches!(
        e.downcast_ref::<BookError>(),
        Some(BookError::RenderError { .. })
    )));
    assert!(fixture.dest().join("a.html").exists());
    assert!(!fixture.dest().join("c.html").exists());
    assert!(!fixture.dest().join("gitbook").exists());

    let report = BookBuilder::new(fixture.config().with_failure_policy(FailurePolicy::Continue))
        .build()
        .unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, bad);
    assert!(!fixture.dest().join("b.html").exists());
    assert!(fixture.dest().join("c.html").exists());
    assert!(report.assets_copied);
}
