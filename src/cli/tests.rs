// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::config::types::{FilterPolicy, TransportMode, UpdateMode};
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["gmirror", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_no_command_defaults_to_sync() {
    let cli = Cli::try_parse_from(["gmirror"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_sync_options() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "sync",
        "--transport",
        "https",
        "--update",
        "fetch-only",
        "-j",
        "8",
        "--clone-timeout",
        "120",
    ])
    .unwrap();

    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert_eq!(args.selection.transport, Some(TransportMode::Https));
    assert_eq!(args.selection.filter, None);
    assert_eq!(args.update, Some(UpdateMode::FetchOnly));
    assert_eq!(args.jobs, Some(8));
    assert_eq!(args.fetch_timeout, None);
    assert_eq!(args.clone_timeout, Some(120));
}

#[test]
fn test_sync_overrides() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "sync",
        "--filter",
        "permissive",
        "--update",
        "rebase",
        "--jobs",
        "3",
        "--fetch-timeout",
        "5",
    ])
    .unwrap();

    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    insta::assert_debug_snapshot!(args.to_config_overrides(), @r#"
    [
        (
            "gitlab.filter",
            "permissive",
        ),
        (
            "sync.update",
            "rebase",
        ),
        (
            "sync.jobs",
            "3",
        ),
        (
            "sync.fetch_timeout_secs",
            "5",
        ),
    ]
    "#);
}

#[test]
fn test_zero_jobs_is_rejected() {
    assert!(Cli::try_parse_from(["gmirror", "sync", "-j", "0"]).is_err());
    assert!(Cli::try_parse_from(["gmirror", "sync", "--fetch-timeout", "0"]).is_err());
}

#[test]
fn test_invalid_modes_are_rejected() {
    assert!(Cli::try_parse_from(["gmirror", "sync", "--transport", "ftp"]).is_err());
    assert!(Cli::try_parse_from(["gmirror", "list", "--filter", "loose"]).is_err());
    assert!(Cli::try_parse_from(["gmirror", "sync", "--update", "merge"]).is_err());
}

#[test]
fn test_parse_list_selection() {
    let cli = Cli::try_parse_from(["gmirror", "list", "--filter", "strict"]).unwrap();
    let Some(Command::List(args)) = cli.command else {
        panic!("expected list command");
    };
    assert_eq!(args.selection.filter, Some(FilterPolicy::Strict));
    assert_eq!(args.selection.transport, None);
}

#[test]
fn test_list_does_not_take_sync_options() {
    assert!(Cli::try_parse_from(["gmirror", "list", "--jobs", "2"]).is_err());
}

#[test]
fn test_global_options_after_command() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "whoami",
        "--token",
        "glpat-secret",
        "-l",
        "4",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
    ])
    .unwrap();

    assert!(matches!(cli.command, Some(Command::Whoami)));
    assert_eq!(cli.global.token.as_deref(), Some("glpat-secret"));
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.configs.len(), 2);
}

#[test]
fn test_set_options() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "-s",
        "sync.jobs=4",
        "--set",
        "gitlab/transport = https",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.options,
        [
            ("sync.jobs".to_string(), "4".to_string()),
            ("gitlab.transport".to_string(), "https".to_string()),
        ]
    );
}

#[test]
fn test_set_requires_section_and_value() {
    assert!(Cli::try_parse_from(["gmirror", "-s", "jobs=4", "options"]).is_err());
    assert!(Cli::try_parse_from(["gmirror", "-s", "sync.jobs", "options"]).is_err());
}

#[test]
fn test_dedicated_flags_follow_set_overrides() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "--set",
        "gitlab.group=from-set",
        "--group",
        "acme",
        "--root",
        "/srv/mirror",
        "--log-level",
        "2",
        "options",
    ])
    .unwrap();

    let overrides = cli.global.to_config_overrides();
    let group_keys: Vec<_> = overrides
        .iter()
        .filter(|(k, _)| k == "gitlab.group")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(group_keys, ["from-set", "acme"]);
    assert!(overrides.contains(&("sync.root".to_string(), "/srv/mirror".to_string())));
    assert!(overrides.contains(&("global.file_log_level".to_string(), "2".to_string())));
}
