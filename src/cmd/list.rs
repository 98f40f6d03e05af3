// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for group-mirror.

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::config::prompt::StdinPrompter;
use crate::config::types::Selection;
use crate::error::Result;
use crate::gateway::GraphQlGateway;
use crate::model::{Group, build_groups, max_path_width, total_projects};

/// Fetch the group tree and flatten it into the groups that get mirrored.
///
/// # Errors
///
/// Returns an error if the gateway request fails.
pub async fn fetch_groups(gateway: &GraphQlGateway, selection: &Selection) -> Result<Vec<Group>> {
    let raw = gateway
        .fetch_group_tree(selection)
        .await
        .with_context(|| format!("failed to enumerate group '{}'", selection.group))?;
    let groups = build_groups(&raw, selection.filter);
    info!(
        group = %selection.group,
        groups = groups.len(),
        projects = total_projects(&groups),
        transport = %selection.transport,
        filter = %selection.filter,
        "enumerated group"
    );
    Ok(groups)
}

/// One line per group, then its projects with their clone URLs.
#[must_use]
pub fn format_listing(groups: &[Group]) -> Vec<String> {
    let width = max_path_width(groups);
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("{} ({})", group.full_path(), group.name()));
        for project in group.projects() {
            lines.push(format!(
                "  {:<width$}  {}",
                project.full_path(),
                project.git_path()
            ));
        }
    }
    lines
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the endpoint, token or group cannot be resolved, or
/// the gateway request fails.
pub async fn run_list_command(config: &Config) -> Result<()> {
    let mut prompter = StdinPrompter;
    let gateway_settings = config.gateway_settings(&mut prompter)?;
    let selection = config.selection(&mut prompter)?;

    let gateway = GraphQlGateway::new(&gateway_settings)?;
    let groups = fetch_groups(&gateway, &selection).await?;

    if total_projects(&groups) == 0 {
        println!("No projects found in '{}'", selection.group);
        return Ok(());
    }
    for line in format_listing(&groups) {
        println!("{line}");
    }
    Ok(())
}
