// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for group-mirror.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GitLabConfig, SyncConfig
//! ```
//!
//! # Run Modes
//!
//! ```text
//! TransportMode: Ssh (default) | Https
//! FilterPolicy:  Strict | Permissive   (default follows transport)
//! UpdateMode:    FetchOnly | Rebase (default)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Which clone URL a project is mirrored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// `sshUrlToRepo`.
    #[default]
    Ssh,
    /// `httpUrlToRepo`.
    Https,
}

impl TransportMode {
    /// GraphQL field holding the clone URL for this transport.
    #[must_use]
    pub const fn url_field(self) -> &'static str {
        match self {
            Self::Ssh => "sshUrlToRepo",
            Self::Https => "httpUrlToRepo",
        }
    }

    /// Filter applied when none is configured.
    #[must_use]
    pub const fn default_filter(self) -> FilterPolicy {
        match self {
            Self::Ssh => FilterPolicy::Strict,
            Self::Https => FilterPolicy::Permissive,
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Https => write!(f, "https"),
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ssh" => Ok(Self::Ssh),
            "https" | "http" => Ok(Self::Https),
            _ => Err(ConfigError::InvalidValue {
                section: "gitlab".to_string(),
                key: "transport".to_string(),
                message: format!("expected 'ssh' or 'https', got '{s}'"),
            }),
        }
    }
}

/// Which projects returned by the API are mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Only projects whose repository exists and is not empty.
    Strict,
    /// Every project returned.
    Permissive,
}

impl FilterPolicy {
    /// Whether the query has to ask for repository metadata.
    #[must_use]
    pub const fn needs_repository(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl std::fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

impl std::str::FromStr for FilterPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(ConfigError::InvalidValue {
                section: "gitlab".to_string(),
                key: "filter".to_string(),
                message: format!("expected 'strict' or 'permissive', got '{s}'"),
            }),
        }
    }
}

/// How an existing working copy is brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateMode {
    /// Fetch only; the working tree is never touched.
    FetchOnly,
    /// Fetch, then rebase a clean working tree onto its upstream.
    #[default]
    Rebase,
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchOnly => write!(f, "fetch-only"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl std::str::FromStr for UpdateMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fetch-only" | "fetch_only" | "fetch" => Ok(Self::FetchOnly),
            "rebase" => Ok(Self::Rebase),
            _ => Err(ConfigError::InvalidValue {
                section: "sync".to_string(),
                key: "update".to_string(),
                message: format!("expected 'fetch-only' or 'rebase', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// GitLab endpoint and project selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitLabConfig {
    /// GraphQL endpoint, e.g. `https://gitlab.example.com/api/graphql`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Personal or group access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Full path of the root group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Clone URL flavor.
    pub transport: TransportMode,
    /// Project filter; follows `transport` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterPolicy>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            group: None,
            transport: TransportMode::default(),
            filter: None,
            timeout_secs: 30,
        }
    }
}

impl GitLabConfig {
    /// Filter in effect for this configuration.
    #[must_use]
    pub fn effective_filter(&self) -> FilterPolicy {
        self.filter
            .unwrap_or_else(|| self.transport.default_filter())
    }
}

/// Local mirror settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Directory the group tree is mirrored into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Update discipline for existing working copies.
    pub update: UpdateMode,
    /// Number of projects reconciled concurrently.
    pub jobs: usize,
    /// Time limit for one fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Time limit for one clone, in seconds.
    pub clone_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            root: None,
            update: UpdateMode::default(),
            jobs: 1,
            fetch_timeout_secs: 10,
            clone_timeout_secs: 600,
        }
    }
}

// --- Resolved settings ---

/// Connection settings for the GraphQL endpoint.
#[derive(Clone, bon::Builder)]
pub struct GatewaySettings {
    #[builder(into)]
    pub endpoint: String,
    #[builder(into)]
    pub token: String,
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,
}

impl std::fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("endpoint", &self.endpoint)
            .field("token", &"[hidden]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Which group is enumerated and how its projects are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub group: String,
    pub transport: TransportMode,
    pub filter: FilterPolicy,
}

impl Selection {
    /// Select `group`; an unset filter follows the transport's default.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        transport: TransportMode,
        filter: Option<FilterPolicy>,
    ) -> Self {
        Self {
            group: group.into(),
            transport,
            filter: filter.unwrap_or_else(|| transport.default_filter()),
        }
    }
}

/// Settings for reconciling working copies.
#[derive(Debug, Clone, bon::Builder)]
pub struct SyncSettings {
    #[builder(into)]
    pub root: PathBuf,
    #[builder(default)]
    pub update: UpdateMode,
    #[builder(default = 1)]
    pub jobs: usize,
    #[builder(default = Duration::from_secs(10))]
    pub fetch_timeout: Duration,
    #[builder(default = Duration::from_secs(600))]
    pub clone_timeout: Duration,
}

/// Everything a mirror run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub selection: Selection,
    pub sync: SyncSettings,
}
