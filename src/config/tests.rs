// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Config;
use super::prompt::{NoPrompt, Prompter};
use super::types::{FilterPolicy, TransportMode, UpdateMode};
use crate::error::{ConfigError, MirrorError};
use crate::logging::LogLevel;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

/// Answers prompts from a fixed script and records what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, label: &str) -> crate::error::Result<Option<String>> {
        self.asked.push(label.to_string());
        Ok(self.answers.pop_front())
    }
}

fn config_error(err: &anyhow::Error) -> &ConfigError {
    match err.downcast_ref::<MirrorError>() {
        Some(MirrorError::Config(e)) => &**e,
        other => panic!("expected a config error, got {other:?} ({err:#})"),
    }
}

const FULL: &str = r#"
[gitlab]
url = "https://gitlab.example.com/api/graphql"
token = "glpat-secret"
group = "acme"

[sync]
root = "/srv/mirror"
"#;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.gitlab.transport, TransportMode::Ssh);
    assert_eq!(config.gitlab.timeout_secs, 30);
    assert_eq!(config.sync.update, UpdateMode::Rebase);
    assert_eq!(config.sync.jobs, 1);
    assert_eq!(config.sync.fetch_timeout_secs, 10);
    assert_eq!(config.sync.clone_timeout_secs, 600);
    assert!(config.gitlab.url.is_none());
}

#[test]
fn test_filter_follows_transport() {
    assert_eq!(TransportMode::Ssh.default_filter(), FilterPolicy::Strict);
    assert_eq!(TransportMode::Https.default_filter(), FilterPolicy::Permissive);

    let config = Config::parse("[gitlab]\ntransport = \"https\"\n").unwrap();
    assert_eq!(config.gitlab.effective_filter(), FilterPolicy::Permissive);

    let config =
        Config::parse("[gitlab]\ntransport = \"https\"\nfilter = \"strict\"\n").unwrap();
    assert_eq!(config.gitlab.effective_filter(), FilterPolicy::Strict);
}

#[test]
fn test_mode_parsing() {
    assert_eq!("HTTPS".parse::<TransportMode>().unwrap(), TransportMode::Https);
    assert_eq!("fetch-only".parse::<UpdateMode>().unwrap(), UpdateMode::FetchOnly);
    assert_eq!("permissive".parse::<FilterPolicy>().unwrap(), FilterPolicy::Permissive);
    insta::assert_snapshot!(
        "ftp".parse::<TransportMode>().unwrap_err().to_string(),
        @"invalid value for 'transport' in section '[gitlab]': expected 'ssh' or 'https', got 'ftp'"
    );
}

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 4

[gitlab]
url = "https://gitlab.example.com/api/graphql"
group = "acme/platform"
transport = "https"

[sync]
root = "/srv/mirror"
update = "fetch-only"
jobs = 4
"#,
    )
    .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.gitlab.group.as_deref(), Some("acme/platform"));
    assert_eq!(config.gitlab.transport, TransportMode::Https);
    assert_eq!(config.sync.root, Some(PathBuf::from("/srv/mirror")));
    assert_eq!(config.sync.update, UpdateMode::FetchOnly);
    assert_eq!(config.sync.jobs, 4);
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(Config::parse("[sync]\nparallel = 3\n").is_err());
    assert!(Config::parse("[mirror]\nroot = \"/tmp\"\n").is_err());
}

#[test]
fn test_zero_jobs_is_invalid() {
    let err = Config::parse("[sync]\njobs = 0\n").unwrap_err();
    assert!(matches!(
        config_error(&err),
        ConfigError::InvalidValue { key, .. } if key == "jobs"
    ));
}

#[test]
fn test_zero_fetch_timeout_is_invalid() {
    let err = Config::parse("[sync]\nfetch_timeout_secs = 0\n").unwrap_err();
    assert!(matches!(
        config_error(&err),
        ConfigError::InvalidValue { key, .. } if key == "fetch_timeout_secs"
    ));
}

#[test]
fn test_overrides_win_over_files() {
    let config = Config::builder()
        .add_toml_str(FULL)
        .set("gitlab.group", "other")
        .unwrap()
        .set("sync.jobs", 8_i64)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.gitlab.group.as_deref(), Some("other"));
    assert_eq!(config.sync.jobs, 8);
}

#[test]
fn test_settings_from_config_do_not_prompt() {
    let config = Config::parse(FULL).unwrap();
    let mut prompter = ScriptedPrompter::default();

    let settings = config.settings(&mut prompter).unwrap();

    assert!(prompter.asked.is_empty());
    assert_eq!(settings.gateway.endpoint, "https://gitlab.example.com/api/graphql");
    assert_eq!(settings.gateway.token, "glpat-secret");
    assert_eq!(settings.gateway.timeout, Duration::from_secs(30));
    assert_eq!(settings.selection.group, "acme");
    assert_eq!(settings.selection.filter, FilterPolicy::Strict);
    assert_eq!(settings.sync.root, PathBuf::from("/srv/mirror"));
    assert_eq!(settings.sync.fetch_timeout, Duration::from_secs(10));
}

#[test]
fn test_missing_values_are_prompted_in_order() {
    let config = Config::default();
    let mut prompter = ScriptedPrompter::new(&[
        "https://gitlab.example.com/api/graphql",
        "glpat-secret",
        "acme/",
        "/srv/mirror",
    ]);

    let settings = config.settings(&mut prompter).unwrap();

    assert_eq!(
        prompter.asked,
        ["GitLab GraphQL URL", "GitLab Access Token", "Group", "Root Path"]
    );
    assert_eq!(settings.selection.group, "acme");
    assert_eq!(settings.sync.root, PathBuf::from("/srv/mirror"));
}

#[test]
fn test_missing_value_without_terminal_is_fatal() {
    let config = Config::parse("[gitlab]\nurl = \"https://gitlab.example.com/api/graphql\"\n")
        .unwrap();

    let err = config.gateway_settings(&mut NoPrompt).unwrap_err();
    insta::assert_snapshot!(
        config_error(&err).to_string(),
        @"missing required config key 'token' in section '[gitlab]'"
    );
}

#[test]
fn test_blank_answer_counts_as_missing() {
    let mut config = Config::parse(FULL).unwrap();
    config.sync.root = None;

    let err = config
        .sync_settings(&mut ScriptedPrompter::new(&["   "]))
        .unwrap_err();
    assert!(matches!(
        config_error(&err),
        ConfigError::MissingKey { key, .. } if key == "root"
    ));
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let mut config = Config::parse(FULL).unwrap();

    config.gitlab.url = Some("not a url".to_string());
    let err = config.gateway_settings(&mut NoPrompt).unwrap_err();
    assert!(matches!(config_error(&err), ConfigError::InvalidValue { key, .. } if key == "url"));

    config.gitlab.url = Some("ftp://gitlab.example.com/api/graphql".to_string());
    let err = config.gateway_settings(&mut NoPrompt).unwrap_err();
    assert!(matches!(config_error(&err), ConfigError::InvalidValue { key, .. } if key == "url"));
}

#[test]
fn test_format_options_hides_token() {
    let config = Config::parse(FULL).unwrap();
    let options = config.format_options();

    assert!(options.iter().all(|line| !line.contains("glpat-secret")));
    let token_line = options
        .iter()
        .find(|line| line.starts_with("gitlab.token"))
        .unwrap();
    assert!(token_line.ends_with("= [hidden]"));
}

#[test]
fn test_format_options_alignment() {
    let options = Config::default().format_options();
    let positions: Vec<_> = options.iter().filter_map(|l| l.find(" = ")).collect();

    assert_eq!(positions.len(), options.len());
    assert!(positions.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_gateway_settings_debug_hides_token() {
    let config = Config::parse(FULL).unwrap();
    let settings = config.gateway_settings(&mut NoPrompt).unwrap();
    let debug = format!("{settings:?}");

    assert!(!debug.contains("glpat-secret"));
    assert!(debug.contains("[hidden]"));
}
