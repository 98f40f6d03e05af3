// group-mirror: GitLab group mirroring tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            MirrorError (~24 bytes)
//!                     |
//!   +-------+------+------+------+-----+--------+
//!   |       |      |      |      |     |        |
//!   v       v      v      v      v     v        v
//! Gateway  Git    Cfg   Proc    Fs    Io     Other
//!   Box    Box    Box    Box   Box   Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Gateway Authentication, Schema, Query, Http, Transport
//!   Git     NotARepository, UnsafePath, CloneFailed, RebaseFailed
//!   Config  MissingKey, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout
//!   Fs      NotWritable, IoError
//!
//! Gateway/Config/Fs failures are fatal for the whole run.
//! Git/Process failures are caught per project by the sync engine.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MirrorError`].
pub type MirrorResult<T> = std::result::Result<T, MirrorError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// GraphQL endpoint rejected or failed the request.
    #[error("gateway error: {0}")]
    Gateway(#[from] Box<GatewayError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl MirrorError {
    /// Whether this error came from a git command exceeding its time limit.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Process(e) if matches!(**e, ProcessError::Timeout { .. }))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MirrorError {
                fn from(err: $error) -> Self {
                    MirrorError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GatewayError => Gateway,
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gateway Errors ---

/// GraphQL gateway errors. All of them abort the run.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The endpoint refused the access token (HTTP 401/403 or no current user).
    #[error("access token rejected by {url} (status {status})")]
    Authentication { status: u16, url: String },

    /// The response did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// The endpoint answered with GraphQL errors.
    #[error("query failed: {}", .messages.join("; "))]
    Query { messages: Vec<String> },

    /// Non-success HTTP status other than an authentication failure.
    #[error("http error {status}: {url}")]
    Http { status: u16, url: String },

    /// Connection, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Invalid endpoint URL or token.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path exists, is not empty, and is not the root of a git work tree.
    #[error("{path} exists but is not a git repository")]
    NotARepository { path: String },

    /// Project path would escape the mirror root.
    #[error("refusing unsafe project path '{path}'")]
    UnsafePath { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Rebase failed and was aborted.
    #[error("rebase onto {upstream} failed and was aborted: {message}")]
    RebaseFailed { upstream: String, message: String },
}

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed to collect process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Directory cannot be written to.
    #[error("directory is not writable: {path}")]
    NotWritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
