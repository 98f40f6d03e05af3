// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::MirrorResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

/// Whether `path` is the top of a git work tree.
#[must_use]
pub fn is_repo_root(path: &Path) -> bool {
    GixBackend::is_repo_root(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or HEAD cannot be resolved.
pub fn current_branch(path: &Path) -> MirrorResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Check for modified, staged or deleted tracked files. Untracked files do
/// not count.
///
/// # Errors
///
/// Returns a `GitError` if the repository cannot be opened or the status check fails.
pub fn has_tracked_changes(path: &Path) -> MirrorResult<bool> {
    GixBackend::has_uncommitted_changes(path, false)
}
