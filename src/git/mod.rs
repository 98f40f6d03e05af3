// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!   query.rs  cmd.rs  ops.rs  discovery.rs
//!        \      |      /         |
//!         v     v     v          v
//!      ,------------------,   working copy
//!      |     backend      |   path + state
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery     async CLI
//!   (gix, read)  (write, net)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .repo_root  .clone/fetch
//!    .branch     .remote
//!    .uncommit   .rebase
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for network access and writes, never interactive.

pub mod backend;
pub mod cmd;
pub mod discovery;
pub mod ops;
pub mod query;
