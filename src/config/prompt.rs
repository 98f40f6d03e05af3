// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive fallback for required inputs.
//!
//! ```text
//! flag / env / file  --> value
//!        | missing
//!        v
//! Prompter::ask()    --> Some(value)   stdin is a terminal
//!                    --> None          --> ConfigError::MissingKey
//! ```

use std::io::{BufRead, IsTerminal, Write};

use crate::error::Result;

/// Source of values the configuration did not provide.
pub trait Prompter {
    /// Ask for `label`. `None` means nobody can answer.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the answer fails.
    fn ask(&mut self, label: &str) -> Result<Option<String>>;
}

/// Prompts on stderr and reads from stdin, but only when stdin is a terminal.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return Ok(None);
        }

        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{label}: ")?;
        stderr.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}

/// Never answers; every missing input is an error.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn ask(&mut self, _label: &str) -> Result<Option<String>> {
        Ok(None)
    }
}
