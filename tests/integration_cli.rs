// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use group_mirror::cli::global::GlobalOptions;
use group_mirror::cli::{Cli, Command};
use std::path::PathBuf;

// =============================================================================
// Commands
// =============================================================================

#[test]
fn cli_every_command_parses() {
    for (args, expected) in [
        (&["gmirror", "version"][..], "Version"),
        (&["gmirror", "options"][..], "Options"),
        (&["gmirror", "whoami"][..], "Whoami"),
        (&["gmirror", "list"][..], "List"),
        (&["gmirror", "sync"][..], "Sync"),
    ] {
        let cli = Cli::try_parse_from(args).unwrap();
        let name = format!("{:?}", cli.command.unwrap());
        assert!(name.starts_with(expected), "{args:?} parsed as {name}");
    }
}

#[test]
fn cli_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["gmirror", "build"]).is_err());
}

#[test]
fn cli_help_is_an_error_result() {
    let err = Cli::try_parse_from(["gmirror", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

// =============================================================================
// Sync Command
// =============================================================================

#[test]
fn cli_sync_full_options() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "--group",
        "acme/platform",
        "--root",
        "/srv/mirror",
        "sync",
        "--transport",
        "ssh",
        "--filter",
        "permissive",
        "--update",
        "fetch-only",
        "--jobs",
        "6",
        "--fetch-timeout",
        "15",
        "--clone-timeout",
        "900",
    ])
    .unwrap();

    assert_eq!(cli.global.group.as_deref(), Some("acme/platform"));
    assert_eq!(cli.global.root, Some(PathBuf::from("/srv/mirror")));
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    insta::assert_debug_snapshot!(args.to_config_overrides(), @r#"
    [
        (
            "gitlab.transport",
            "ssh",
        ),
        (
            "gitlab.filter",
            "permissive",
        ),
        (
            "sync.update",
            "fetch-only",
        ),
        (
            "sync.jobs",
            "6",
        ),
        (
            "sync.fetch_timeout_secs",
            "15",
        ),
        (
            "sync.clone_timeout_secs",
            "900",
        ),
    ]
    "#);
}

#[test]
fn cli_sync_without_options_has_no_overrides() {
    let cli = Cli::try_parse_from(["gmirror", "sync"]).unwrap();
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert!(args.to_config_overrides().is_empty());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_log_options() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "-l",
        "0",
        "--file-log-level",
        "5",
        "--log-file",
        "logs/gmirror.log",
        "options",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(0));
    assert_eq!(cli.global.file_log_level, Some(5));
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&("global.output_log_level".into(), "0".into())));
    assert!(overrides.contains(&("global.file_log_level".into(), "5".into())));
    assert!(overrides.contains(&("global.log_file".into(), "logs/gmirror.log".into())));
}

#[test]
fn cli_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["gmirror", "-l", "7", "options"]).is_err());
}

#[test]
fn cli_config_files_keep_order() {
    let cli = Cli::try_parse_from([
        "gmirror",
        "--config",
        "base.toml",
        "sync",
        "-c",
        "local.toml",
    ])
    .unwrap();
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("base.toml"), PathBuf::from("local.toml")]
    );
}

#[test]
fn cli_default_global_options_produce_no_overrides() {
    assert!(GlobalOptions::default().to_config_overrides().is_empty());
}
