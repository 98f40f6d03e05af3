// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()   args, cwd, env, piped stdio, kill_on_drop
//!   |
//!   v
//! spawn() --> wait_with_output()
//!   |            |
//!   |       timeout elapsed --> future dropped --> child killed
//!   v
//! validate exit_code (skip if ALLOW_FAILURE)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::borrow::Cow;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{MirrorResult, ProcessError};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// The command line for logs and error messages, with URL credentials
    /// masked.
    pub(crate) fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = self.display_name();
        for arg in self.args_slice() {
            let arg = redact_userinfo(arg);
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if:
    /// - Spawning the child process fails.
    /// - The timeout elapses (the child is killed).
    /// - The process exits with a non-zero status and `ALLOW_FAILURE` is not set.
    pub async fn run(self) -> MirrorResult<ProcessOutput> {
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            trace!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let child = command
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let waited = match self.timeout_duration() {
            Some(limit) => {
                if let Ok(result) = tokio::time::timeout(limit, child.wait_with_output()).await {
                    result
                } else {
                    warn!(cmd = %cmd_line, timeout = ?limit, "process timed out");
                    return Err(ProcessError::Timeout {
                        command: cmd_line,
                        timeout_secs: limit.as_secs(),
                    }
                    .into());
                }
            }
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|e| ProcessError::OutputError {
            command: cmd_line.clone(),
            message: e.to_string(),
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if exit_code != 0 && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE) {
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: exit_code,
                stderr,
            }
            .into());
        }

        trace!(cmd = %cmd_line, exit_code, "completed");
        Ok(ProcessOutput::new(exit_code, stdout, stderr))
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.env_vars() {
            command.env(key, value);
        }

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        // A timed-out wait drops the child, which must take the process with it.
        command.kill_on_drop(true);

        command
    }
}

/// Replace `user:password@` in a `scheme://` URL with `***@`.
fn redact_userinfo(arg: &str) -> Cow<'_, str> {
    let Some(scheme_end) = arg.find("://") else {
        return Cow::Borrowed(arg);
    };
    let authority_start = scheme_end + 3;
    let authority_end = arg[authority_start..]
        .find('/')
        .map_or(arg.len(), |i| authority_start + i);
    match arg[authority_start..authority_end].rfind('@') {
        Some(at) => Cow::Owned(format!(
            "{}***{}",
            &arg[..authority_start],
            &arg[authority_start + at..]
        )),
        None => Cow::Borrowed(arg),
    }
}
