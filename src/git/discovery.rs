// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working copy location and state.
//!
//! ```text
//! root/
//!   acme/
//!     api/          full_path "acme/api"        (Repository)
//!     platform/
//!       infra/      full_path "acme/platform/infra" (Missing)
//!     notes/        plain directory with files  (Occupied)
//! ```

use std::path::{Component, Path, PathBuf};

use crate::error::{FsError, GitError, MirrorResult};

use super::query::is_repo_root;

/// What currently occupies a project's working copy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingCopy {
    /// Nothing exists at the path.
    Missing,
    /// An empty directory exists; it is treated like a missing one.
    Empty,
    /// The path is the root of a git work tree.
    Repository,
    /// A file or non-empty directory that is not a repository.
    Occupied,
}

/// Map a project's `full_path` to its directory below `root`.
///
/// Each `/`-separated segment becomes one directory level. Paths that are
/// empty, absolute, or contain `.`/`..` segments are rejected so no project
/// can land outside `root`.
///
/// # Errors
///
/// Returns `GitError::UnsafePath` for a path that cannot be mapped safely.
pub fn working_copy_dir(root: &Path, full_path: &str) -> MirrorResult<PathBuf> {
    let unsafe_path = || GitError::UnsafePath {
        path: full_path.to_string(),
    };

    if full_path.is_empty() || full_path.contains('\\') {
        return Err(unsafe_path().into());
    }

    let mut dir = root.to_path_buf();
    for segment in full_path.split('/') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => dir.push(name),
            _ => return Err(unsafe_path().into()),
        }
    }
    Ok(dir)
}

/// Inspect what is at `path`.
///
/// # Errors
///
/// Returns `FsError::IoError` if the path exists but cannot be read.
pub fn inspect(path: &Path) -> MirrorResult<WorkingCopy> {
    let io_error = |source| FsError::IoError {
        path: path.display().to_string(),
        source,
    };

    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(WorkingCopy::Missing),
        Err(e) => return Err(io_error(e).into()),
    };

    if !metadata.is_dir() {
        return Ok(WorkingCopy::Occupied);
    }

    let mut entries = std::fs::read_dir(path).map_err(io_error)?;
    if entries.next().is_none() {
        return Ok(WorkingCopy::Empty);
    }

    if is_repo_root(path) {
        Ok(WorkingCopy::Repository)
    } else {
        Ok(WorkingCopy::Occupied)
    }
}
