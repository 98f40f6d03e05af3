// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (non-interactive, time-limited)
//! ```

use crate::error::MirrorResult;
use std::path::Path;
use std::time::Duration;

use super::backend::ShellBackend;

/// Clone a repository into `dest`.
///
/// # Errors
///
/// Returns an error if the clone fails or exceeds `timeout`.
pub async fn clone(url: &str, dest: &Path, timeout: Duration) -> MirrorResult<()> {
    ShellBackend::clone(url, dest, timeout).await
}

/// Fetch from remote.
///
/// # Errors
///
/// Returns an error if the fetch fails or exceeds `timeout`.
pub async fn fetch(repo_path: &Path, remote: &str, timeout: Duration) -> MirrorResult<()> {
    ShellBackend::fetch(repo_path, remote, timeout).await
}

/// Configured URL of a remote, if the remote exists.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn remote_url(repo_path: &Path, name: &str) -> MirrorResult<Option<String>> {
    ShellBackend::remote_url(repo_path, name).await
}

/// Add a remote.
///
/// # Errors
///
/// Returns an error if the remote cannot be added.
pub async fn add_remote(repo_path: &Path, name: &str, url: &str) -> MirrorResult<()> {
    ShellBackend::add_remote(repo_path, name, url).await
}

/// Point an existing remote at a new URL.
///
/// # Errors
///
/// Returns an error if the URL cannot be set.
pub async fn set_remote_url(repo_path: &Path, name: &str, url: &str) -> MirrorResult<()> {
    ShellBackend::set_remote_url(repo_path, name, url).await
}

/// Upstream tracking ref of the current branch.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn upstream(repo_path: &Path) -> MirrorResult<Option<String>> {
    ShellBackend::upstream(repo_path).await
}

/// Rebase the current branch onto `onto`.
///
/// # Errors
///
/// Returns an error if the rebase stops or exceeds `timeout`.
pub async fn rebase(repo_path: &Path, onto: &str, timeout: Duration) -> MirrorResult<()> {
    ShellBackend::rebase(repo_path, onto, timeout).await
}

/// Abort an in-progress rebase.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn abort_rebase(repo_path: &Path) -> MirrorResult<()> {
    ShellBackend::abort_rebase(repo_path).await
}
