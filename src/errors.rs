// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmdmuxError {
    /// The process ran but exited with a non-zero code. Carries whatever
    /// output was captured so callers can inspect it after the fact.
    #[error("command `{command}` exited with code {exit_code}")]
    CommandFailed {
        exit_code: i32,
        command: String,
        stdout: Option<String>,
        stderr: Option<String>,
    },

    /// The child process could not be spawned at all.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The shared runtime could not be constructed.
    #[error("shared runtime unavailable: {0}")]
    ContextUnavailable(#[source] std::io::Error),

    /// A submitted computation was cancelled or panicked before it resolved.
    #[error("task aborted before completion: {0}")]
    Aborted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CmdmuxError>;
