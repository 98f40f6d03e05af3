// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command: the default mirror run.
//!
//! ```text
//! Config --> Settings (prompt for missing URL/token/group/root)
//!   --> prepare_root (create + write probe)
//!   --> current_user (token check)
//!   --> fetch_groups --> SyncEngine::run --> summary
//! ```
//!
//! Only errors before the engine starts are fatal; per-project failures
//! end up in the summary and the command still succeeds.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::cmd::list::fetch_groups;
use crate::config::Config;
use crate::config::prompt::StdinPrompter;
use crate::config::types::Settings;
use crate::error::{FsError, MirrorResult, Result};
use crate::gateway::GraphQlGateway;
use crate::model::{max_path_width, total_projects};
use crate::progress::{ProgressDisplay, SyncProgress};
use crate::sync::SyncEngine;
use crate::sync::outcome::SyncReport;

/// Make sure `root` exists and files can be created in it.
///
/// # Errors
///
/// Returns `FsError::IoError` if the directory cannot be created and
/// `FsError::NotWritable` if a probe file cannot be written into it.
pub fn prepare_root(root: &Path) -> MirrorResult<()> {
    std::fs::create_dir_all(root).map_err(|source| FsError::IoError {
        path: root.display().to_string(),
        source,
    })?;
    tempfile::Builder::new()
        .prefix(".gmirror-probe-")
        .tempfile_in(root)
        .map_err(|source| FsError::NotWritable {
            path: root.display().to_string(),
            source,
        })?;
    Ok(())
}

/// Run one complete mirror pass with resolved settings.
///
/// # Errors
///
/// Returns an error if the root is unusable, the token is rejected, or the
/// group cannot be enumerated. Per-project failures are part of the report.
pub async fn mirror(settings: &Settings, display: ProgressDisplay) -> Result<SyncReport> {
    let root = &settings.sync.root;
    prepare_root(root).with_context(|| format!("cannot use {} as mirror root", root.display()))?;

    let gateway = GraphQlGateway::new(&settings.gateway)?;
    let user = gateway
        .current_user()
        .await
        .with_context(|| format!("failed to authenticate against {}", gateway.endpoint()))?;
    info!(user = %user.username, endpoint = %gateway.endpoint(), "authenticated");

    let groups = fetch_groups(&gateway, &settings.selection).await?;

    let progress = SyncProgress::new(total_projects(&groups), max_path_width(&groups), display);
    let report = SyncEngine::new(&settings.sync).run(&groups, &progress).await;
    progress.finish();

    if report.failed() > 0 {
        warn!(failed = report.failed(), "some projects could not be mirrored");
    }
    Ok(report)
}

/// Main handler for sync command.
///
/// # Errors
///
/// Returns an error if a required setting is missing or the run cannot
/// start; see [`mirror`].
pub async fn run_sync_command(config: &Config) -> Result<()> {
    let settings = config.settings(&mut StdinPrompter)?;
    let display = if config.global.output_log_level.is_silent() {
        ProgressDisplay::Silent
    } else {
        ProgressDisplay::Bar
    };

    let report = mirror(&settings, display).await?;
    for line in report.summary_lines() {
        println!("{line}");
    }
    Ok(())
}
