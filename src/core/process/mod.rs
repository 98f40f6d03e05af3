// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning with time limits.
//!
//! ```text
//! ProcessBuilder::which("git")
//!   .args() .cwd() .env() .timeout()
//!   .run()
//!       --> tokio::process::Command (captured, kill_on_drop)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod runner;
