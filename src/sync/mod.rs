// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror every selected project into the local root.
//!
//! ```text
//! SyncEngine::new(&SyncSettings)
//!   .run(&[Group], &SyncProgress)
//!        |
//!   (index, project) in group/project order
//!        |
//!   buffer_unordered(jobs)  --> reconcile() per project
//!        |                      progress.start / progress.advance
//!        v
//!   sort by index --> SyncReport
//! ```
//!
//! Project directories are disjoint, so concurrent reconciles share nothing.

pub mod outcome;
pub mod reconcile;

#[cfg(test)]
mod tests;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::config::types::SyncSettings;
use crate::model::{Group, total_projects};
use crate::progress::SyncProgress;

use outcome::{ProjectReport, SyncReport};
use reconcile::reconcile;

/// Runs reconciliation for a list of groups.
pub struct SyncEngine<'a> {
    settings: &'a SyncSettings,
}

impl<'a> SyncEngine<'a> {
    #[must_use]
    pub const fn new(settings: &'a SyncSettings) -> Self {
        Self { settings }
    }

    /// Reconcile every project of `groups`, at most `jobs` at a time.
    ///
    /// Per-project failures are recorded in the report; this never fails.
    pub async fn run(&self, groups: &[Group], progress: &SyncProgress) -> SyncReport {
        let jobs = self.settings.jobs.max(1);
        info!(
            root = %self.settings.root.display(),
            groups = groups.len(),
            projects = total_projects(groups),
            jobs,
            update = %self.settings.update,
            "starting sync"
        );
        for group in groups {
            debug!(group = %group.full_path(), projects = group.projects().len(), "queued group");
        }

        let projects = groups.iter().flat_map(Group::projects).enumerate();
        let mut entries: Vec<(usize, ProjectReport)> = stream::iter(projects)
            .map(|(index, project)| async move {
                progress.start(project.full_path());
                let report = reconcile(project, self.settings).await;
                progress.advance();
                (index, report)
            })
            .buffer_unordered(jobs)
            .collect()
            .await;

        entries.sort_by_key(|(index, _)| *index);
        SyncReport::new(entries.into_iter().map(|(_, report)| report).collect())
    }
}
