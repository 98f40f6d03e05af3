// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --url / --token / --group / --root  ← also read from URL, AUTH, GROUP, ROOT
//! --config FILE       ← Additional config files (can repeat)
//! --set KEY=VAL       ← Direct config override (can repeat)
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level N  ← File verbosity (defaults to --log-level)
//! --log-file FILE     ← Enables the file log
//!
//! Precedence: dedicated flags > --set > GMIRROR_* env > --config > gmirror.toml
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// GitLab GraphQL endpoint, e.g. https://gitlab.example.com/api/graphql.
    #[arg(long, env = "URL", global = true, value_name = "URL")]
    pub url: Option<String>,

    /// GitLab access token.
    #[arg(long, env = "AUTH", global = true, hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Full path of the group to mirror, e.g. acme/platform.
    #[arg(long, env = "GROUP", global = true, value_name = "PATH")]
    pub group: Option<String>,

    /// Local directory the group is mirrored into.
    #[arg(long, env = "ROOT", global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Sets an option, such as 'sync.jobs=4' or 'gitlab.transport=https'.
    /// Can be specified multiple times.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        global = true,
        action = clap::ArgAction::Append,
        value_parser = parse_key_value
    )]
    pub options: Vec<(String, String)>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides, `--set`
    /// first so dedicated flags win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = self.options.clone();
        let mut push = |key: &str, value: String| overrides.push((key.to_string(), value));

        if let Some(url) = &self.url {
            push("gitlab.url", url.clone());
        }
        if let Some(token) = &self.token {
            push("gitlab.token", token.clone());
        }
        if let Some(group) = &self.group {
            push("gitlab.group", group.clone());
        }
        if let Some(root) = &self.root {
            push("sync.root", root.display().to_string());
        }
        if let Some(level) = self.log_level {
            push("global.output_log_level", level.to_string());
        }
        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            push("global.file_log_level", level.to_string());
        }
        if let Some(path) = &self.log_file {
            push("global.log_file", path.display().to_string());
        }

        overrides
    }
}

/// Parse a `section.key=value` override. `section/key` is accepted too.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim().replace('/', ".");
    if key.is_empty() || !key.contains('.') {
        return Err(format!("expected a 'section.key' name, got '{key}'"));
    }
    Ok((key, value.trim().to_string()))
}
