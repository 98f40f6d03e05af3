// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for group-mirror.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gmirror.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GMIRROR_* env vars
//! 5. legacy env vars URL / AUTH / GROUP / ROOT
//! 6. CLI flags and --set overrides
//! 7. interactive prompt (terminal only)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GMIRROR_GITLAB__URL=https://...   → gitlab.url
//! GMIRROR_GITLAB__TRANSPORT=https   → gitlab.transport
//! GMIRROR_SYNC__JOBS=4              → sync.jobs
//! ```
//!
//! # Example
//!
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.com/api/graphql"
//! group = "acme/platform"
//! transport = "https"
//!
//! [sync]
//! root = "/srv/mirror"
//! update = "fetch-only"
//! jobs = 4
//! ```

pub mod loader;
pub mod prompt;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, MirrorError, MirrorResult, Result};

use loader::ConfigLoader;
use prompt::Prompter;
use types::{
    GatewaySettings, GitLabConfig, GlobalConfig, Selection, Settings, SyncConfig, SyncSettings,
};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// GitLab endpoint and selection.
    pub gitlab: GitLabConfig,
    /// Local mirror options.
    pub sync: SyncConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use group_mirror::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gmirror.toml")
    ///     .with_env_prefix("GMIRROR")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject values no run could work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for zero jobs or a zero timeout.
    pub fn validate(&self) -> MirrorResult<()> {
        let positive = |section: &str, key: &str, value: u64| {
            if value == 0 {
                Err(ConfigError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    message: "must be greater than zero".to_string(),
                })
            } else {
                Ok(())
            }
        };

        positive("gitlab", "timeout_secs", self.gitlab.timeout_secs)?;
        positive("sync", "jobs", self.sync.jobs.try_into().unwrap_or(u64::MAX))?;
        positive("sync", "fetch_timeout_secs", self.sync.fetch_timeout_secs)?;
        positive("sync", "clone_timeout_secs", self.sync.clone_timeout_secs)?;
        Ok(())
    }

    /// Resolve the endpoint and token, prompting for whatever is missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if a value is missing and cannot be
    /// prompted for, or `ConfigError::InvalidValue` for a malformed URL.
    pub fn gateway_settings(&self, prompter: &mut dyn Prompter) -> Result<GatewaySettings> {
        let url = required(
            self.gitlab.url.as_deref(),
            prompter,
            "GitLab GraphQL URL",
            "gitlab",
            "url",
        )?;
        validate_endpoint(&url)?;
        let token = required(
            self.gitlab.token.as_deref(),
            prompter,
            "GitLab Access Token",
            "gitlab",
            "token",
        )?;

        Ok(GatewaySettings::builder()
            .endpoint(url)
            .token(token)
            .timeout(Duration::from_secs(self.gitlab.timeout_secs))
            .build())
    }

    /// Resolve the group to enumerate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no group is configured and none
    /// can be prompted for.
    pub fn selection(&self, prompter: &mut dyn Prompter) -> Result<Selection> {
        let group = required(
            self.gitlab.group.as_deref(),
            prompter,
            "Group",
            "gitlab",
            "group",
        )?;
        let group = group.trim_matches('/').to_string();
        Ok(Selection::new(
            group,
            self.gitlab.transport,
            self.gitlab.filter,
        ))
    }

    /// Resolve the mirror root and reconciliation settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no root is configured and none
    /// can be prompted for.
    pub fn sync_settings(&self, prompter: &mut dyn Prompter) -> Result<SyncSettings> {
        let root = match &self.sync.root {
            Some(root) if !root.as_os_str().is_empty() => root.clone(),
            _ => PathBuf::from(required(None, prompter, "Root Path", "sync", "root")?),
        };

        Ok(SyncSettings::builder()
            .root(root)
            .update(self.sync.update)
            .jobs(self.sync.jobs)
            .fetch_timeout(Duration::from_secs(self.sync.fetch_timeout_secs))
            .clone_timeout(Duration::from_secs(self.sync.clone_timeout_secs))
            .build())
    }

    /// Resolve everything a mirror run needs, asking in the order
    /// URL, token, group, root.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn settings(&self, prompter: &mut dyn Prompter) -> Result<Settings> {
        Ok(Settings {
            gateway: self.gateway_settings(prompter)?,
            selection: self.selection(prompter)?,
            sync: self.sync_settings(prompter)?,
        })
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings representing all configuration options.
    /// The access token is hidden with a `[hidden]` marker.
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_gitlab_options(&mut options);
        self.format_sync_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_gitlab_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "gitlab.url".into(),
            self.gitlab.url.clone().unwrap_or_default(),
        );
        if self.gitlab.token.as_deref().is_some_and(|t| !t.is_empty()) {
            options.insert("gitlab.token".into(), "[hidden]".into());
        } else {
            options.insert("gitlab.token".into(), String::new());
        }
        options.insert(
            "gitlab.group".into(),
            self.gitlab.group.clone().unwrap_or_default(),
        );
        options.insert(
            "gitlab.transport".into(),
            self.gitlab.transport.to_string(),
        );
        options.insert(
            "gitlab.filter".into(),
            self.gitlab.effective_filter().to_string(),
        );
        options.insert(
            "gitlab.timeout_secs".into(),
            self.gitlab.timeout_secs.to_string(),
        );
    }

    fn format_sync_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "sync.root".into(),
            self.sync
                .root
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("sync.update".into(), self.sync.update.to_string());
        options.insert("sync.jobs".into(), self.sync.jobs.to_string());
        options.insert(
            "sync.fetch_timeout_secs".into(),
            self.sync.fetch_timeout_secs.to_string(),
        );
        options.insert(
            "sync.clone_timeout_secs".into(),
            self.sync.clone_timeout_secs.to_string(),
        );
    }
}

/// Use `configured` if non-empty, otherwise ask `prompter`.
fn required(
    configured: Option<&str>,
    prompter: &mut dyn Prompter,
    label: &str,
    section: &str,
    key: &str,
) -> Result<String> {
    if let Some(value) = configured.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }

    prompter
        .ask(label)?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            MirrorError::from(ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
            .into()
        })
}

fn validate_endpoint(url: &str) -> MirrorResult<()> {
    let invalid = |message: String| ConfigError::InvalidValue {
        section: "gitlab".to_string(),
        key: "url".to_string(),
        message,
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(format!("'{url}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'")).into()),
    }
}
