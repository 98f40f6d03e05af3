// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flattening and filtering of the API group tree.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::types::FilterPolicy;
use crate::gateway::schema::{RawGroup, RawProject};

use super::{Group, Project};

/// Flatten `root` into the root group followed by every descendant group,
/// both in API order, keeping only projects `filter` admits.
///
/// Projects without a clone URL and repeated `full_path`s are dropped with
/// a warning; the first occurrence of a path wins.
#[must_use]
pub fn build_groups(root: &RawGroup, filter: FilterPolicy) -> Vec<Group> {
    let mut seen = HashSet::new();
    let descendants = root
        .descendant_groups
        .iter()
        .flat_map(|connection| connection.nodes.iter().flatten());

    std::iter::once(root)
        .chain(descendants)
        .map(|raw| build_group(raw, filter, &mut seen))
        .collect()
}

fn build_group<'a>(raw: &'a RawGroup, filter: FilterPolicy, seen: &mut HashSet<&'a str>) -> Group {
    let mut projects = Vec::new();

    for project in raw.projects.nodes.iter().flatten() {
        if !admits(filter, project) {
            debug!(project = %project.full_path, %filter, "filtered out");
            continue;
        }
        let Some(url) = project.clone_url.as_deref().filter(|u| !u.is_empty()) else {
            warn!(project = %project.full_path, "no clone URL available, skipping");
            continue;
        };
        if !seen.insert(project.full_path.as_str()) {
            warn!(project = %project.full_path, "duplicate project path, skipping");
            continue;
        }
        projects.push(Project::new(&project.name, &project.full_path, url));
    }

    Group::new(&raw.full_name, &raw.full_path, projects)
}

fn admits(filter: FilterPolicy, project: &RawProject) -> bool {
    match filter {
        FilterPolicy::Permissive => true,
        FilterPolicy::Strict => project
            .repository
            .as_ref()
            .is_some_and(|repo| repo.exists == Some(true) && repo.empty != Some(true)),
    }
}

/// Number of projects across all groups.
#[must_use]
pub fn total_projects(groups: &[Group]) -> usize {
    groups.iter().map(|g| g.projects().len()).sum()
}

/// Length of the longest project path; 0 when there are no projects.
#[must_use]
pub fn max_path_width(groups: &[Group]) -> usize {
    groups
        .iter()
        .flat_map(Group::projects)
        .map(|p| p.full_path().chars().count())
        .max()
        .unwrap_or(0)
}
