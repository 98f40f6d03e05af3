// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for group-mirror using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gmirror [global options] [command]
//! sync      (default)
//! list
//! whoami
//! options
//! version
//! ```

pub mod global;
pub mod sync;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::sync::{ListArgs, SyncArgs};
use clap::{Parser, Subcommand};

/// Mirror a GitLab group into a local directory tree.
#[derive(Debug, Parser)]
#[command(
    name = "gmirror",
    author,
    version,
    about = "Mirror every project of a GitLab group",
    long_about = "group-mirror Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Enumerates a GitLab group and all of its descendant groups\n\
                  through the GraphQL API, clones projects that are missing\n\
                  below the root directory and fetches (and rebases) the ones\n\
                  that are already there. Running `gmirror` without a command\n\
                  is the same as `gmirror sync`.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `gmirror.toml` in the current directory,\n\
                  then from every --config file, then from GMIRROR_SECTION__KEY\n\
                  environment variables (e.g. GMIRROR_SYNC__JOBS=4), then from\n\
                  the URL, AUTH, GROUP and ROOT environment variables and the\n\
                  command line. Missing URL, token, group or root are prompted\n\
                  for when stdin is a terminal."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clones missing projects and updates existing ones.
    Sync(SyncArgs),

    /// Lists the projects that would be mirrored.
    List(ListArgs),

    /// Shows the user the access token belongs to.
    Whoami,

    /// Lists all options and their values.
    Options,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
