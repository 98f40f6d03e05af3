// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::SyncEngine;
use super::outcome::{ProjectReport, SyncOutcome, SyncReport};
use crate::config::types::SyncSettings;
use crate::model::{Group, Project};
use crate::progress::SyncProgress;
use std::path::PathBuf;

fn entry(path: &str, outcome: SyncOutcome) -> ProjectReport {
    ProjectReport::new(path, Some(PathBuf::from("/m").join(path)), outcome, false)
}

#[test]
fn test_outcome_display() {
    insta::assert_snapshot!(SyncOutcome::Cloned.to_string(), @"cloned");
    insta::assert_snapshot!(SyncOutcome::SkippedDirty.to_string(), @"skipped (uncommitted changes)");
    insta::assert_snapshot!(
        SyncOutcome::Failed { reason: "boom".to_string() }.to_string(),
        @"failed: boom"
    );
}

#[test]
fn test_report_counts() {
    let report = SyncReport::new(vec![
        entry("acme/a", SyncOutcome::Cloned),
        entry("acme/b", SyncOutcome::Updated),
        entry("acme/c", SyncOutcome::Updated),
        entry("acme/d", SyncOutcome::SkippedDirty),
        ProjectReport::new(
            "acme/e",
            None,
            SyncOutcome::Failed {
                reason: "refusing unsafe project path 'acme/e'".to_string(),
            },
            false,
        ),
        ProjectReport::new("acme/f", None, SyncOutcome::Updated, true),
    ]);

    assert_eq!(report.len(), 6);
    assert_eq!(report.cloned(), 1);
    assert_eq!(report.updated(), 3);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.repaired(), 1);
}

#[test]
fn test_summary_lines() {
    let report = SyncReport::new(vec![
        entry("acme/api", SyncOutcome::Cloned),
        entry("acme/docs", SyncOutcome::SkippedDirty),
        entry(
            "acme/web",
            SyncOutcome::Failed {
                reason: "timed out".to_string(),
            },
        ),
    ]);

    insta::assert_snapshot!(report.summary_lines().join("\n"), @r"
    3 projects: 1 cloned, 0 updated, 1 skipped, 1 failed
      acme/docs  skipped (uncommitted changes)
      acme/web   failed: timed out
    ");
}

#[test]
fn test_empty_report_summary() {
    let report = SyncReport::default();
    assert!(report.is_empty());
    insta::assert_snapshot!(
        report.summary_lines().join("\n"),
        @"0 projects: 0 cloned, 0 updated, 0 skipped, 0 failed"
    );
}

#[tokio::test]
async fn test_engine_with_no_projects() {
    let temp = tempfile::tempdir().unwrap();
    let settings = SyncSettings::builder().root(temp.path()).build();
    let groups = vec![Group::new("Acme", "acme", vec![])];
    let progress = SyncProgress::hidden(0);

    let report = SyncEngine::new(&settings).run(&groups, &progress).await;

    assert!(report.is_empty());
    assert_eq!(progress.position(), 0);
}

#[tokio::test]
async fn test_engine_reports_unsafe_paths_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let settings = SyncSettings::builder().root(temp.path()).jobs(4).build();
    let groups = vec![Group::new(
        "Acme",
        "acme",
        vec![
            Project::new("up", "acme/../../escape", "file:///nowhere.git"),
            Project::new("abs", "/etc/acme", "file:///nowhere.git"),
        ],
    )];
    let progress = SyncProgress::hidden(2);

    let report = SyncEngine::new(&settings).run(&groups, &progress).await;

    assert_eq!(progress.position(), 2);
    let paths: Vec<_> = report.entries().iter().map(ProjectReport::full_path).collect();
    assert_eq!(paths, ["acme/../../escape", "/etc/acme"]);
    assert!(report.entries().iter().all(|e| e.outcome().is_failure()));
    assert!(report.entries().iter().all(|e| e.repo_dir().is_none()));
}
