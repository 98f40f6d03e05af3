// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-project outcomes and the run report.

use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A fresh working copy was cloned.
    Cloned,
    /// An existing working copy was fetched (and rebased, if requested).
    Updated,
    /// Fetched, but tracked files had local changes so the tree was left alone.
    SkippedDirty,
    /// Nothing usable happened; the working copy is as it was.
    Failed { reason: String },
}

impl SyncOutcome {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cloned => "cloned",
            Self::Updated => "updated",
            Self::SkippedDirty => "skipped",
            Self::Failed { .. } => "failed",
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedDirty => write!(f, "skipped (uncommitted changes)"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Outcome of one project plus where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReport {
    full_path: String,
    repo_dir: Option<PathBuf>,
    outcome: SyncOutcome,
    remote_repaired: bool,
}

impl ProjectReport {
    #[must_use]
    pub fn new(
        full_path: impl Into<String>,
        repo_dir: Option<PathBuf>,
        outcome: SyncOutcome,
        remote_repaired: bool,
    ) -> Self {
        Self {
            full_path: full_path.into(),
            repo_dir,
            outcome,
            remote_repaired,
        }
    }

    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Working copy directory; `None` when the project path was rejected.
    #[must_use]
    pub fn repo_dir(&self) -> Option<&Path> {
        self.repo_dir.as_deref()
    }

    #[must_use]
    pub const fn outcome(&self) -> &SyncOutcome {
        &self.outcome
    }

    /// Whether `origin` had to be added or repointed.
    #[must_use]
    pub const fn remote_repaired(&self) -> bool {
        self.remote_repaired
    }
}

/// Per-project results of a run, in group then project order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    entries: Vec<ProjectReport>,
}

impl SyncReport {
    #[must_use]
    pub const fn new(entries: Vec<ProjectReport>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ProjectReport] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn cloned(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Cloned))
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Updated))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::SkippedDirty))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(SyncOutcome::is_failure)
    }

    #[must_use]
    pub fn repaired(&self) -> usize {
        self.entries.iter().filter(|e| e.remote_repaired).count()
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    /// Totals line followed by one line per skipped or failed project.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} projects: {} cloned, {} updated, {} skipped, {} failed",
            self.len(),
            self.cloned(),
            self.updated(),
            self.skipped(),
            self.failed()
        )];
        if self.repaired() > 0 {
            lines.push(format!("origin repaired in {} working copies", self.repaired()));
        }

        let width = self
            .entries
            .iter()
            .filter(|e| !matches!(e.outcome, SyncOutcome::Cloned | SyncOutcome::Updated))
            .map(|e| e.full_path.len())
            .max()
            .unwrap_or(0);
        for entry in &self.entries {
            if matches!(entry.outcome, SyncOutcome::SkippedDirty | SyncOutcome::Failed { .. }) {
                lines.push(format!("  {:<width$}  {}", entry.full_path, entry.outcome));
            }
        }
        lines
    }
}
