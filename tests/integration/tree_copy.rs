//! Directory listing and metadata-preserving copies

use bookgen::core::BookError;
use bookgen::utils::fs::{copy_file, copy_tree, list_tree};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use crate::common::snapshot;

fn sample_tree(root: &Path) {
    fs::create_dir_all(root.join("docs/guide/advanced")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("README.md"), "# Root\n").unwrap();
    fs::write(root.join("docs/intro.md"), "intro").unwrap();
    fs::write(root.join("docs/guide/advanced/tips.md"), "tips").unwrap();
    fs::write(root.join("docs/guide/logo.bin"), (0u8..=255).collect::<Vec<u8>>()).unwrap();
    fs::write(root.join("docs/.DS_Store"), "finder junk").unwrap();
}

#[test]
fn test_list_tree_replay_reproduces_tree() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    sample_tree(&src);
    fs::create_dir(&dst).unwrap();

    for relative in list_tree(&src, true).unwrap() {
        if let Some(dir) = relative.strip_suffix('/') {
            fs::create_dir(dst.join(dir)).unwrap();
        } else {
            copy_file(&src.join(&relative), &dst.join(&relative)).unwrap();
        }
    }

    assert_eq!(snapshot(&dst).unwrap(), snapshot(&src).unwrap());
    assert!(dst.join("empty").is_dir());
    assert!(!dst.join("docs/.DS_Store").exists());
}

#[test]
fn test_list_tree_order() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());

    assert_eq!(
        list_tree(temp.path(), true).unwrap(),
        vec![
            "README.md",
            "docs/",
            "docs/guide/",
            "docs/guide/advanced/",
            "docs/guide/advanced/tips.md",
            "docs/guide/logo.bin",
            "docs/intro.md",
            "empty/",
        ]
    );
}

#[test]
fn test_copy_tree_matches_source() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    sample_tree(&src);

    copy_tree(&src, &dst, None).unwrap();

    assert_eq!(snapshot(&dst).unwrap(), snapshot(&src).unwrap());
    assert!(!dst.join("docs/.DS_Store").exists());
}

#[test]
fn test_copy_tree_into_existing_destination_changes_nothing() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    sample_tree(&src);
    fs::create_dir_all(dst.join("mine")).unwrap();
    fs::write(dst.join("mine/file.txt"), "keep").unwrap();
    let before = snapshot(&dst).unwrap();

    let err = copy_tree(&src, &dst, None).unwrap_err();

    assert!(matches!(err.downcast_ref::<BookError>(), Some(BookError::AlreadyExists { .. })));
    assert_eq!(snapshot(&dst).unwrap(), before);
}

#[test]
#[cfg(unix)]
fn test_copy_tree_preserves_metadata_and_links() {
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, SystemTime};

    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    sample_tree(&src);

    let script = src.join("docs/run.sh");
    fs::write(&script, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o754)).unwrap();
    let old = SystemTime::now() - Duration::from_secs(86_400);
    fs::File::options().write(true).open(&script).unwrap().set_modified(old).unwrap();
    std::os::unix::fs::symlink("intro.md", src.join("docs/alias.md")).unwrap();

    copy_tree(&src, &dst, None).unwrap();

    let copied = fs::metadata(dst.join("docs/run.sh")).unwrap();
    assert_eq!(copied.permissions().mode() & 0o777, 0o754);
    let drift = copied
        .modified()
        .unwrap()
        .duration_since(old)
        .unwrap_or_else(|e| e.duration());
    assert!(drift < Duration::from_secs(1));

    let link = dst.join("docs/alias.md");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), Path::new("intro.md"));
}
