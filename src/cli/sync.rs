// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `sync` and `list` commands.

use clap::Args;

use crate::config::types::{FilterPolicy, TransportMode, UpdateMode};

/// Which projects are selected and how they are cloned.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Clone URL flavor: ssh or https.
    #[arg(long, value_name = "MODE")]
    pub transport: Option<TransportMode>,

    /// Project filter: strict (non-empty, existing repositories) or permissive.
    /// Defaults to strict for ssh and permissive for https.
    #[arg(long, value_name = "POLICY")]
    pub filter: Option<FilterPolicy>,
}

impl SelectionArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = Vec::new();
        if let Some(transport) = self.transport {
            overrides.push(("gitlab.transport".to_string(), transport.to_string()));
        }
        if let Some(filter) = self.filter {
            overrides.push(("gitlab.filter".to_string(), filter.to_string()));
        }
        overrides
    }
}

/// Mirror the group into the root directory.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Update discipline for existing working copies: fetch-only or rebase.
    #[arg(long, value_name = "MODE")]
    pub update: Option<UpdateMode>,

    /// Number of projects reconciled concurrently.
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Time limit for one fetch, in seconds.
    #[arg(long = "fetch-timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub fetch_timeout: Option<u64>,

    /// Time limit for one clone, in seconds.
    #[arg(long = "clone-timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub clone_timeout: Option<u64>,
}

impl SyncArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = self.selection.to_config_overrides();
        if let Some(update) = self.update {
            overrides.push(("sync.update".to_string(), update.to_string()));
        }
        if let Some(jobs) = self.jobs {
            overrides.push(("sync.jobs".to_string(), jobs.to_string()));
        }
        if let Some(secs) = self.fetch_timeout {
            overrides.push(("sync.fetch_timeout_secs".to_string(), secs.to_string()));
        }
        if let Some(secs) = self.clone_timeout {
            overrides.push(("sync.clone_timeout_secs".to_string(), secs.to_string()));
        }
        overrides
    }
}

/// Print the projects that would be mirrored.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}
