// src/errors.rs

//! Crate-wide error types.

use std::path::PathBuf;

use thiserror::Error;

/// An external command ran to completion but exited with a non-zero status.
///
/// `status` is the process exit code, or `-1` if the process was terminated
/// by a signal and has no code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("command `{command}` exited with status: {status}")]
pub struct CommandFailure {
    pub command: String,
    pub status: i32,
}

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("failed to create output directory {path:?}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("build failed for {platform}")]
    BuildFailure {
        platform: String,
        #[source]
        failure: CommandFailure,
    },

    #[error("copying artifact failed for {platform}")]
    CopyFailure {
        platform: String,
        #[source]
        failure: CommandFailure,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
