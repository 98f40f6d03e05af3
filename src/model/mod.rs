// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Groups and projects selected for mirroring.
//!
//! ```text
//! RawGroup (API)                     Vec<Group> (flat)
//!   projects            build_groups   [0] root group
//!   descendantGroups  ------------->   [1..] one per descendant, API order
//!     projects                          each: Vec<Project>
//! ```
//!
//! Records are immutable once built.

pub mod builder;


pub use builder::{build_groups, max_path_width, total_projects};

/// A repository hosted under a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    full_path: String,
    git_path: String,
}

impl Project {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        full_path: impl Into<String>,
        git_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            git_path: git_path.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace path, e.g. `acme/platform/infra`.
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Clone URL for the selected transport.
    #[must_use]
    pub fn git_path(&self) -> &str {
        &self.git_path
    }
}

/// A group and the projects directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    full_path: String,
    projects: Vec<Project>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>, full_path: impl Into<String>, projects: Vec<Project>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            projects,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}
