// src/errors.rs

//! Crate-wide error type.
//!
//! Configuration problems (bad launch files, duplicate or missing launch
//! arguments, unresolved substitutions) surface as `ConfigError` before any
//! process is started. Problems locating or starting a process surface as
//! `LaunchError`, `PackageNotFound` or `ExecutableNotFound`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Launch error: {0}")]
    LaunchError(String),

    #[error("package '{package}' not found in any install prefix")]
    PackageNotFound { package: String },

    #[error("executable '{executable}' not found in package '{package}'")]
    ExecutableNotFound { package: String, executable: String },

    #[error("reading launch file {}: {source}", path.display())]
    LaunchFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        LauncherError::ConfigError(msg.into())
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for LauncherError {
    fn from(err: tokio::sync::mpsc::error::SendError<T>) -> Self {
        LauncherError::Other(anyhow::anyhow!("runtime event channel closed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
