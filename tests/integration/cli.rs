//! The `bookgen` binary

use predicates::prelude::*;
use std::fs;

use crate::common::{BookFixture, bookgen, bundled_theme, chaptered_book};

#[test]
fn test_build_reports_pages() {
    let fixture = chaptered_book().unwrap();

    bookgen()
        .arg("build")
        .arg(fixture.source())
        .arg("--output")
        .arg(fixture.dest())
        .arg("--theme")
        .arg(fixture.theme())
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 4 page(s)"));

    assert!(fixture.dest().join("part/a/b/deep.html").exists());
}

#[test]
fn test_build_defaults_to_book_directory_in_source() {
    let fixture = BookFixture::new().unwrap();

    bookgen()
        .current_dir(fixture.source())
        .args(["build", "--theme"])
        .arg(bundled_theme())
        .assert()
        .success();

    assert!(fixture.source().join("_book/index.html").exists());
    assert!(fixture.source().join("_book/gitbook/style.css").exists());
}

#[test]
fn test_build_quiet_prints_nothing() {
    let fixture = BookFixture::new().unwrap();

    bookgen()
        .arg("--quiet")
        .arg("build")
        .arg(fixture.source())
        .arg("-o")
        .arg(fixture.dest())
        .arg("--theme")
        .arg(fixture.theme())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_build_missing_descriptor_fails_with_suggestion() {
    let fixture = BookFixture::new().unwrap();
    fixture.remove("book.json").unwrap();

    bookgen()
        .arg("build")
        .arg(fixture.source())
        .arg("-o")
        .arg(fixture.dest())
        .arg("--theme")
        .arg(fixture.theme())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("book descriptor not found"))
        .stderr(predicate::str::contains("bookgen init"));
}

#[test]
fn test_build_refuses_source_as_destination() {
    let fixture = BookFixture::new().unwrap();

    bookgen()
        .arg("build")
        .arg(fixture.source())
        .arg("-o")
        .arg(fixture.source())
        .arg("--theme")
        .arg(fixture.theme())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to use"));

    assert!(fixture.source().join("book.json").exists());
}

#[test]
fn test_build_keep_going_lists_failures_and_exits_non_zero() {
    let fixture = BookFixture::new().unwrap();
    fixture
        .write_theme(
            "templates/frame.html",
            "{% if title == '' %}{{ nope }}{% endif %}{{ content | safe }}",
        )
        .unwrap();
    fixture.write("one.md", "one").unwrap();
    fixture.write("two.md", "two").unwrap();

    bookgen()
        .arg("build")
        .arg(fixture.source())
        .arg("-o")
        .arg(fixture.dest())
        .arg("--theme")
        .arg(fixture.theme())
        .arg("--keep-going")
        .assert()
        .failure()
        .stdout(predicate::str::contains("2 page(s) failed"))
        .stdout(predicate::str::contains("one.md"))
        .stderr(predicate::str::contains("2 page(s) failed to build"));

    assert!(fixture.dest().join("index.html").exists());
    assert!(fixture.dest().join("gitbook/style.css").exists());
}

#[test]
fn test_init_then_build() {
    let temp = tempfile::tempdir().unwrap();
    let book = temp.path().join("handbook");

    bookgen()
        .arg("init")
        .arg(&book)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized book"));

    bookgen()
        .arg("build")
        .arg(&book)
        .arg("--theme")
        .arg(bundled_theme())
        .assert()
        .success();

    let index = fs::read_to_string(book.join("_book/index.html")).unwrap();
    assert!(index.contains("<title>Home · handbook</title>"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("SUMMARY.md"), "* [Mine](mine.md)\n").unwrap();

    bookgen()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(temp.path().join("SUMMARY.md")).unwrap(),
        "* [Mine](mine.md)\n"
    );

    bookgen().arg("init").arg(temp.path()).arg("--force").assert().success();
    assert!(temp.path().join("book.json").exists());
}
