// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> Config --> cmd::run_* handlers
//!   sync, list, whoami, options
//! ```

pub mod config;
pub mod list;
pub mod sync;
pub mod whoami;

#[cfg(test)]
mod tests;
