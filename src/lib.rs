// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          sync / list / whoami
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, env, flags, prompt |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              gateway      model     sync
//!             GraphQL    Group tree  engine --> progress
//!                                      |
//!                                      v
//!                                     git
//!                                  gix / CLI
//!
//!   +-----------------------------------------+
//!   |  core   process (git subprocesses)      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod git;
pub mod logging;
pub mod model;
pub mod progress;
pub mod sync;
