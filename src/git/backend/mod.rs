// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend   (pure Rust gix)
//!                     --> ShellBackend (git CLI)
//! mutations (async)   --> ShellBackend (git CLI, timeouts)
//! ```

use std::path::Path;
use std::time::Duration;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{GitError, GixError, MirrorResult};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if `path` is the top of a git work tree (not merely inside one).
    fn is_repo_root(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or HEAD cannot be resolved.
    fn current_branch(path: &Path) -> MirrorResult<Option<String>>;

    /// Check for uncommitted changes to tracked files, optionally counting
    /// untracked files as well.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or the status check fails.
    fn has_uncommitted_changes(path: &Path, include_untracked: bool) -> MirrorResult<bool>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_repo_root(path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(path: &Path) -> MirrorResult<Option<String>> {
        let repo = gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path, include_untracked: bool) -> MirrorResult<bool> {
        use gix::status::UntrackedFiles;

        let repo = gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))?;
        if repo.workdir().is_none() {
            return Err(GitError::Gix(GixError::BareRepository).into());
        }

        let untracked = if include_untracked {
            UntrackedFiles::Files
        } else {
            UntrackedFiles::None
        };

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(untracked)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for every network operation (SSH agents, credential helpers)
/// and for anything that writes to the repository.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a blocking git query. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> MirrorResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Prepare an async git invocation that can never stop to ask for input.
    ///
    /// `GIT_SSH_COMMAND` is only forced into batch mode when the operator has
    /// not configured their own SSH command.
    pub(crate) fn git(cwd: &Path) -> MirrorResult<ProcessBuilder> {
        let mut builder = ProcessBuilder::which("git")?
            .name("git")
            .cwd(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never");
        if std::env::var_os("GIT_SSH_COMMAND").is_none() && std::env::var_os("GIT_SSH").is_none()
        {
            builder = builder.env("GIT_SSH_COMMAND", "ssh -o BatchMode=yes");
        }
        Ok(builder)
    }

    /// Clone `url` into `dest`, which must be absent or an empty directory.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::CloneFailed` for an unusable destination, or the
    /// underlying `ProcessError` (including timeouts) from git.
    pub async fn clone(url: &str, dest: &Path, timeout: Duration) -> MirrorResult<()> {
        let parent = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;

        Self::git(parent)?
            .args(["clone", "--quiet", "--", url, dest_str])
            .timeout(timeout)
            .run()
            .await?;
        Ok(())
    }

    /// Fetch all refs of `remote`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `ProcessError` (including timeouts) from git.
    pub async fn fetch(repo_path: &Path, remote: &str, timeout: Duration) -> MirrorResult<()> {
        Self::git(repo_path)?
            .args(["fetch", "--quiet", remote])
            .timeout(timeout)
            .run()
            .await?;
        Ok(())
    }

    /// Add a remote.
    ///
    /// # Errors
    ///
    /// Returns the underlying `ProcessError` if git rejects the remote.
    pub async fn add_remote(repo_path: &Path, name: &str, url: &str) -> MirrorResult<()> {
        Self::git(repo_path)?
            .args(["remote", "add", name, url])
            .run()
            .await?;
        Ok(())
    }

    /// Point an existing remote at a new URL.
    ///
    /// # Errors
    ///
    /// Returns the underlying `ProcessError` if the remote does not exist.
    pub async fn set_remote_url(repo_path: &Path, name: &str, url: &str) -> MirrorResult<()> {
        Self::git(repo_path)?
            .args(["remote", "set-url", name, url])
            .run()
            .await?;
        Ok(())
    }

    /// Configured fetch URL of a remote, `None` when the remote is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be executed at all.
    pub async fn remote_url(repo_path: &Path, name: &str) -> MirrorResult<Option<String>> {
        let key = format!("remote.{name}.url");
        let output = Self::git(repo_path)?
            .args(["config", "--get", &key])
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        Ok(output
            .success()
            .then(|| output.stdout().to_string())
            .filter(|url| !url.is_empty()))
    }

    /// Upstream of the current branch (e.g. `origin/main`), `None` when HEAD
    /// is detached or the branch does not track anything.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be executed at all.
    pub async fn upstream(repo_path: &Path) -> MirrorResult<Option<String>> {
        let output = Self::git(repo_path)?
            .args(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{upstream}"])
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        Ok(output
            .success()
            .then(|| output.stdout().to_string())
            .filter(|upstream| !upstream.is_empty()))
    }

    /// Rebase the current branch onto `onto`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `ProcessError` when the rebase stops; the caller
    /// is responsible for aborting it.
    pub async fn rebase(repo_path: &Path, onto: &str, timeout: Duration) -> MirrorResult<()> {
        Self::git(repo_path)?
            .args(["rebase", "--quiet", "--no-autostash", onto])
            .timeout(timeout)
            .run()
            .await?;
        Ok(())
    }

    /// Abort an in-progress rebase. Succeeds when there is nothing to abort.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be executed at all.
    pub async fn abort_rebase(repo_path: &Path) -> MirrorResult<()> {
        Self::git(repo_path)?
            .args(["rebase", "--abort"])
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        Ok(())
    }

    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    pub fn init_repo(path: &Path) -> MirrorResult<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_repo_root(path: &Path) -> bool {
        // At the top of a work tree git reports the relative ".git".
        Self::git_command(&["rev-parse", "--git-dir"], path).is_ok_and(|dir| dir == ".git")
    }

    fn current_branch(path: &Path) -> MirrorResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn has_uncommitted_changes(path: &Path, include_untracked: bool) -> MirrorResult<bool> {
        let untracked = if include_untracked {
            "--untracked-files=normal"
        } else {
            "--untracked-files=no"
        };
        let output = Self::git_command(&["status", "--porcelain", untracked], path)?;
        Ok(!output.is_empty())
    }
}
