// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-step git operations for a single working copy.
//!
//! ```text
//! clone_into_place      staging dir --> rename into place
//! ensure_remote         add or repoint a remote
//! rebase_onto_upstream  rebase, abort on failure
//! ```

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{FsError, GitError, MirrorResult};

use super::cmd;

/// Prefix of the staging directories created next to a clone destination.
pub const STAGING_PREFIX: &str = ".gmirror-clone-";

/// How a remote was brought in line with the expected URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRepair {
    /// The remote already pointed at the expected URL.
    Unchanged,
    /// The remote was missing and has been added.
    Added,
    /// The remote pointed elsewhere and has been repointed.
    Repointed { previous: String },
}

impl RemoteRepair {
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Result of trying to rebase onto the upstream branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// The current branch was rebased (or fast-forwarded) onto its upstream.
    Rebased { upstream: String },
    /// HEAD is detached or the branch tracks nothing.
    NoUpstream,
}

/// Clone `url` so that `dest` either becomes a complete working copy or is
/// left exactly as it was.
///
/// The clone runs in a staging directory beside `dest` and is renamed into
/// place only after git succeeds. `dest` itself must be absent or empty.
///
/// # Errors
///
/// Returns an error if the parent cannot be created, git fails or times out,
/// or the finished clone cannot be moved into place.
pub async fn clone_into_place(url: &str, dest: &Path, timeout: Duration) -> MirrorResult<()> {
    let parent = dest.parent().ok_or_else(|| GitError::CloneFailed {
        url: url.to_string(),
        message: format!("{} has no parent directory", dest.display()),
    })?;
    std::fs::create_dir_all(parent).map_err(|source| FsError::IoError {
        path: parent.display().to_string(),
        source,
    })?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|source| FsError::IoError {
            path: parent.display().to_string(),
            source,
        })?;
    debug!(url, staging = %staging.path().display(), "cloning into staging directory");

    // Dropping `staging` on error removes the partial clone.
    cmd::clone(url, staging.path(), timeout).await?;

    if dest.is_dir() {
        std::fs::remove_dir(dest).map_err(|source| FsError::IoError {
            path: dest.display().to_string(),
            source,
        })?;
    }

    let staged = staging.keep();
    if let Err(source) = std::fs::rename(&staged, dest) {
        if let Err(e) = std::fs::remove_dir_all(&staged) {
            warn!(path = %staged.display(), error = %e, "failed to remove staging directory");
        }
        return Err(FsError::IoError {
            path: dest.display().to_string(),
            source,
        }
        .into());
    }
    Ok(())
}

/// Make sure remote `name` exists and points at `url`.
///
/// # Errors
///
/// Returns an error if git cannot read or change the remote.
pub async fn ensure_remote(repo_path: &Path, name: &str, url: &str) -> MirrorResult<RemoteRepair> {
    match cmd::remote_url(repo_path, name).await? {
        Some(current) if current == url => Ok(RemoteRepair::Unchanged),
        Some(previous) => {
            cmd::set_remote_url(repo_path, name, url).await?;
            Ok(RemoteRepair::Repointed { previous })
        }
        None => {
            cmd::add_remote(repo_path, name, url).await?;
            Ok(RemoteRepair::Added)
        }
    }
}

/// Rebase the current branch onto its upstream.
///
/// A rebase that stops is aborted so the working copy returns to its
/// previous state.
///
/// # Errors
///
/// Returns `GitError::RebaseFailed` if the rebase did not complete, or an
/// error if git cannot be executed.
pub async fn rebase_onto_upstream(
    repo_path: &Path,
    timeout: Duration,
) -> MirrorResult<RebaseOutcome> {
    let Some(upstream) = cmd::upstream(repo_path).await? else {
        debug!(repo = %repo_path.display(), "no upstream, skipping rebase");
        return Ok(RebaseOutcome::NoUpstream);
    };

    if let Err(e) = cmd::rebase(repo_path, &upstream, timeout).await {
        if let Err(abort) = cmd::abort_rebase(repo_path).await {
            warn!(repo = %repo_path.display(), error = %abort, "failed to abort rebase");
        }
        return Err(GitError::RebaseFailed {
            upstream,
            message: e.to_string(),
        }
        .into());
    }
    Ok(RebaseOutcome::Rebased { upstream })
}
