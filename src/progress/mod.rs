// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-project progress display.
//!
//! ```text
//! [00:00:12] [########>-----------]  7/19 ......acme/api
//!                                          ^ right-aligned to the
//!                                            longest project path
//! ```
//!
//! The bar advances once per project whatever the outcome.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::OnceLock;

/// Pre-validated style for the project bar.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "[{elapsed_precise}] [{bar:30.cyan/blue}] {pos:>3}/{len:3} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Progress display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressDisplay {
    /// Draw a bar on stderr.
    #[default]
    Bar,
    /// Count without drawing (silent mode, tests).
    Silent,
}

/// Right-align `path` to `width`, padding with dots.
#[must_use]
pub fn pad_label(path: &str, width: usize) -> String {
    format!("{path:.>width$}")
}

/// Progress over every project of a run.
#[derive(Debug, Clone)]
pub struct SyncProgress {
    bar: ProgressBar,
    width: usize,
}

impl SyncProgress {
    /// `width` is the label width, usually the longest project path.
    #[must_use]
    pub fn new(total: usize, width: usize, display: ProgressDisplay) -> Self {
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let bar = match display {
            ProgressDisplay::Bar => {
                let bar = ProgressBar::new(total);
                bar.set_style(bar_style());
                bar
            }
            ProgressDisplay::Silent => {
                ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden())
            }
        };
        Self { bar, width }
    }

    /// A progress tracker that never draws.
    #[must_use]
    pub fn hidden(total: usize) -> Self {
        Self::new(total, 0, ProgressDisplay::Silent)
    }

    /// Show `full_path` as the project being worked on.
    pub fn start(&self, full_path: &str) {
        self.bar.set_message(pad_label(full_path, self.width));
    }

    /// Count one finished project.
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Leave the finished bar on screen.
    pub fn finish(&self) {
        self.bar.finish();
    }
}
