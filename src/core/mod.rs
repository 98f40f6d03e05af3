// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!   core
//!    |
//!    v
//! process
//!    |
//! Builder  (which cache, env, timeout)
//! Runner   (tokio, kill_on_drop)
//! ```

pub mod process;
