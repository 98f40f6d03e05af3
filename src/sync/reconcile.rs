// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bring one working copy in line with its project.
//!
//! ```text
//! working_copy_dir(root, full_path) --unsafe--> Failed
//!        |
//!     inspect()
//!        |-- Missing / Empty --> clone_into_place --> Cloned
//!        |-- Occupied        --> Failed (left untouched)
//!        '-- Repository
//!               |
//!          ensure_remote(origin) --> fetch origin
//!               |
//!          FetchOnly --> Updated
//!          Rebase    --> dirty?    --> SkippedDirty
//!                        upstream? --> rebase (abort on failure) --> Updated
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::types::{SyncSettings, UpdateMode};
use crate::error::{GitError, MirrorError, MirrorResult};
use crate::git::discovery::{WorkingCopy, inspect, working_copy_dir};
use crate::git::ops::{RebaseOutcome, clone_into_place, ensure_remote, rebase_onto_upstream};
use crate::git::{cmd, query};
use crate::model::Project;

use super::outcome::{ProjectReport, SyncOutcome};

const ORIGIN: &str = "origin";

/// Reconcile `project` below `settings.root`. Never fails: every error
/// becomes [`SyncOutcome::Failed`] for this project only.
pub async fn reconcile(project: &Project, settings: &SyncSettings) -> ProjectReport {
    let mut remote_repaired = false;
    let (repo_dir, result) = match working_copy_dir(&settings.root, project.full_path()) {
        Ok(dir) => {
            let result = reconcile_dir(project, &dir, settings, &mut remote_repaired).await;
            (Some(dir), result)
        }
        Err(e) => (None, Err(e)),
    };

    let outcome = match result {
        Ok(outcome) => {
            info!(project = %project.full_path(), outcome = outcome.label(), "project done");
            outcome
        }
        Err(e) => {
            let reason = e.to_string();
            if e.is_timeout() {
                warn!(project = %project.full_path(), %reason, "git exceeded its time limit");
            } else {
                warn!(project = %project.full_path(), %reason, "project failed");
            }
            SyncOutcome::Failed { reason }
        }
    };

    ProjectReport::new(project.full_path(), repo_dir, outcome, remote_repaired)
}

async fn reconcile_dir(
    project: &Project,
    dir: &Path,
    settings: &SyncSettings,
    remote_repaired: &mut bool,
) -> MirrorResult<SyncOutcome> {
    match inspect(dir)? {
        WorkingCopy::Missing | WorkingCopy::Empty => {
            debug!(project = %project.full_path(), dir = %dir.display(), "cloning");
            clone_into_place(project.git_path(), dir, settings.clone_timeout).await?;
            Ok(SyncOutcome::Cloned)
        }
        WorkingCopy::Occupied => Err(GitError::NotARepository {
            path: dir.display().to_string(),
        }
        .into()),
        WorkingCopy::Repository => update(project, dir, settings, remote_repaired).await,
    }
}

async fn update(
    project: &Project,
    dir: &Path,
    settings: &SyncSettings,
    remote_repaired: &mut bool,
) -> MirrorResult<SyncOutcome> {
    let repair = ensure_remote(dir, ORIGIN, project.git_path()).await?;
    if repair.changed() {
        *remote_repaired = true;
        info!(project = %project.full_path(), ?repair, "repaired origin");
    }

    cmd::fetch(dir, ORIGIN, settings.fetch_timeout).await?;

    match settings.update {
        UpdateMode::FetchOnly => Ok(SyncOutcome::Updated),
        UpdateMode::Rebase => {
            if has_tracked_changes(dir.to_path_buf()).await? {
                debug!(project = %project.full_path(), "tracked files modified, not rebasing");
                return Ok(SyncOutcome::SkippedDirty);
            }
            match rebase_onto_upstream(dir, settings.clone_timeout).await? {
                RebaseOutcome::Rebased { upstream } => {
                    debug!(project = %project.full_path(), %upstream, "rebased");
                }
                RebaseOutcome::NoUpstream => {
                    debug!(project = %project.full_path(), "no upstream, fetched only");
                }
            }
            Ok(SyncOutcome::Updated)
        }
    }
}

/// Status walk off the async workers; it reads the whole work tree.
async fn has_tracked_changes(dir: PathBuf) -> MirrorResult<bool> {
    tokio::task::spawn_blocking(move || query::has_tracked_changes(&dir))
        .await
        .map_err(|e| MirrorError::Other(format!("status check panicked: {e}").into_boxed_str()))?
}
