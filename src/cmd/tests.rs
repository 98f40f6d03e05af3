// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cmd::list::format_listing;
use crate::cmd::sync::prepare_root;
use crate::error::{FsError, MirrorError};
use crate::model::{Group, Project};

fn sample_groups() -> Vec<Group> {
    vec![
        Group::new(
            "Acme",
            "acme",
            vec![Project::new("api", "acme/api", "git@gitlab.example.com:acme/api.git")],
        ),
        Group::new(
            "Platform",
            "acme/platform",
            vec![Project::new(
                "deploy",
                "acme/platform/deploy",
                "git@gitlab.example.com:acme/platform/deploy.git",
            )],
        ),
        Group::new("Empty", "acme/empty", Vec::new()),
    ]
}

#[test]
fn test_format_listing() {
    insta::assert_snapshot!(format_listing(&sample_groups()).join("\n"), @r"
    acme (Acme)
      acme/api              git@gitlab.example.com:acme/api.git
    acme/platform (Platform)
      acme/platform/deploy  git@gitlab.example.com:acme/platform/deploy.git
    acme/empty (Empty)
    ");
}

#[test]
fn test_format_listing_empty() {
    assert!(format_listing(&[]).is_empty());
}

#[test]
fn test_prepare_root_creates_missing_directories() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("mirror/nested");

    prepare_root(&root).unwrap();

    assert!(root.is_dir());
    // The write probe is removed again.
    assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn test_prepare_root_rejects_a_file() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("not-a-dir");
    std::fs::write(&root, "x").unwrap();

    let err = prepare_root(&root).unwrap_err();
    assert!(matches!(err, MirrorError::Fs(ref e) if matches!(**e, FsError::IoError { .. })));
}
