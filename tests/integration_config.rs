// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the loader with files on disk, overrides and settings resolution.

use group_mirror::config::Config;
use group_mirror::config::loader::Source;
use group_mirror::config::prompt::NoPrompt;
use group_mirror::config::types::{FilterPolicy, TransportMode, UpdateMode};
use std::path::PathBuf;
use std::time::Duration;

fn write(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_win() {
    let temp = tempfile::tempdir().unwrap();
    let base = write(
        temp.path(),
        "base.toml",
        r#"
[gitlab]
url = "https://gitlab.example.com/api/graphql"
group = "acme"

[sync]
jobs = 2
"#,
    );
    let local = write(
        temp.path(),
        "local.toml",
        r#"
[gitlab]
group = "acme/platform"
"#,
    );

    let config = Config::builder()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();

    assert_eq!(
        config.gitlab.url.as_deref(),
        Some("https://gitlab.example.com/api/graphql")
    );
    assert_eq!(config.gitlab.group.as_deref(), Some("acme/platform"));
    assert_eq!(config.sync.jobs, 2);
}

#[test]
fn config_missing_required_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let result = Config::builder()
        .add_toml_file(temp.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_is_ignored() {
    let temp = tempfile::tempdir().unwrap();
    let config = Config::builder()
        .add_toml_file_optional(temp.path().join("gmirror.toml"))
        .build()
        .unwrap();
    assert_eq!(config.sync.jobs, 1);
}

#[test]
fn config_string_overrides_are_parsed() {
    let config = Config::builder()
        .add_toml_str("[sync]\njobs = 2\n")
        .set("sync.jobs", "5")
        .unwrap()
        .set("sync.update", "fetch-only")
        .unwrap()
        .set("gitlab.transport", "https")
        .unwrap()
        .set("global.output_log_level", "1")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.sync.jobs, 5);
    assert_eq!(config.sync.update, UpdateMode::FetchOnly);
    assert_eq!(config.gitlab.transport, TransportMode::Https);
    assert_eq!(config.gitlab.effective_filter(), FilterPolicy::Permissive);
    assert_eq!(config.global.output_log_level.as_u8(), 1);
}

#[test]
fn config_invalid_override_fails_build() {
    let result = Config::builder()
        .set("gitlab.transport", "carrier-pigeon")
        .unwrap()
        .build();
    assert!(result.is_err());
}

#[test]
fn config_loaded_files_are_listed() {
    let temp = tempfile::tempdir().unwrap();
    let present = write(temp.path(), "gmirror.toml", "[sync]\njobs = 3\n");
    let loader = Config::builder()
        .add_toml_file_optional(&present)
        .add_toml_file_optional(temp.path().join("absent.toml"))
        .add_toml_file("extra.toml");

    assert_eq!(
        loader.sources(),
        [
            Source::Optional(present.clone()),
            Source::File(PathBuf::from("extra.toml"))
        ]
    );
    let files = loader.format_loaded_files();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0], format!("1. [optional] {}", present.display()));
    assert_eq!(files[1], "2. [file] extra.toml");
}

// =============================================================================
// Settings resolution
// =============================================================================

#[test]
fn config_resolves_settings_without_prompting() {
    let config = Config::parse(
        r#"
[gitlab]
url = "http://localhost:8080/api/graphql"
token = "glpat-secret"
group = "/acme/platform/"
timeout_secs = 12

[sync]
root = "/srv/mirror"
fetch_timeout_secs = 20
clone_timeout_secs = 300
"#,
    )
    .unwrap();

    let settings = config.settings(&mut NoPrompt).unwrap();

    assert_eq!(settings.gateway.timeout, Duration::from_secs(12));
    assert_eq!(settings.selection.group, "acme/platform");
    assert_eq!(settings.selection.transport, TransportMode::Ssh);
    assert_eq!(settings.selection.filter, FilterPolicy::Strict);
    assert_eq!(settings.sync.root, PathBuf::from("/srv/mirror"));
    assert_eq!(settings.sync.update, UpdateMode::Rebase);
    assert_eq!(settings.sync.fetch_timeout, Duration::from_secs(20));
    assert_eq!(settings.sync.clone_timeout, Duration::from_secs(300));
}

#[test]
fn config_missing_root_without_terminal() {
    let config = Config::parse(
        r#"
[gitlab]
url = "https://gitlab.example.com/api/graphql"
token = "glpat-secret"
group = "acme"
"#,
    )
    .unwrap();

    let err = config.settings(&mut NoPrompt).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: missing required config key 'root' in section '[sync]'"
    );
}

#[test]
fn config_options_listing() {
    let config = Config::parse(
        r#"
[global]
log_file = "gmirror.log"

[gitlab]
url = "https://gitlab.example.com/api/graphql"
token = "glpat-secret"
group = "acme"

[sync]
root = "/srv/mirror"
"#,
    )
    .unwrap();

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    gitlab.filter           = strict
    gitlab.group            = acme
    gitlab.timeout_secs     = 30
    gitlab.token            = [hidden]
    gitlab.transport        = ssh
    gitlab.url              = https://gitlab.example.com/api/graphql
    global.file_log_level   = 4
    global.log_file         = gmirror.log
    global.output_log_level = 3
    sync.clone_timeout_secs = 600
    sync.fetch_timeout_secs = 10
    sync.jobs               = 1
    sync.root               = /srv/mirror
    sync.update             = rebase
    ");
}
