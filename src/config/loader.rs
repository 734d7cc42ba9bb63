// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::RawLaunchFile;
use crate::description::LaunchDescription;
use crate::errors::{LauncherError, Result};

/// Read a launch file and return the raw `RawLaunchFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// a checked [`LaunchDescription`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawLaunchFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LauncherError::LaunchFile {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawLaunchFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), actions = raw.action.len(), "launch file parsed");

    Ok(raw)
}

/// Read a launch file and validate it into a [`LaunchDescription`].
///
/// Checks for:
/// - at least one action,
/// - duplicate argument declarations,
/// - malformed names and substitutions,
/// - conflicting log guards.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<LaunchDescription> {
    let raw = load_from_path(path)?;
    LaunchDescription::try_from(raw)
}
