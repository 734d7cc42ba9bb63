// src/exec/resolve.rs

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{LauncherError, Result};

/// Environment variable listing install prefixes, `:`-separated.
pub const PREFIX_PATH_ENV: &str = "AMENT_PREFIX_PATH";

/// Finds package executables under a list of install prefixes.
///
/// A package lives in `<prefix>/lib/<package>/`; the first prefix that has
/// that directory wins.
#[derive(Debug, Clone, Default)]
pub struct ExecutableResolver {
    prefixes: Vec<PathBuf>,
}

impl ExecutableResolver {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Prefixes from `AMENT_PREFIX_PATH`, or none if it is unset.
    pub fn from_env() -> Self {
        let prefixes = env::var_os(PREFIX_PATH_ENV)
            .map(|raw| {
                env::split_paths(&raw)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    pub fn resolve(&self, package: &str, executable: &str) -> Result<PathBuf> {
        let package_dir = self
            .prefixes
            .iter()
            .map(|prefix| prefix.join("lib").join(package))
            .find(|dir| dir.is_dir())
            .ok_or_else(|| LauncherError::PackageNotFound {
                package: package.to_string(),
            })?;

        let candidate = package_dir.join(executable);
        if is_executable_file(&candidate) {
            debug!(package, executable, path = %candidate.display(), "resolved executable");
            Ok(candidate)
        } else {
            Err(LauncherError::ExecutableNotFound {
                package: package.to_string(),
                executable: executable.to_string(),
            })
        }
    }
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn missing_package_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = ExecutableResolver::new(vec![tmp.path().to_path_buf()]);
        let err = resolver.resolve("waypoint_counter", "tracker").unwrap_err();
        assert!(matches!(
            err,
            LauncherError::PackageNotFound { ref package } if package == "waypoint_counter"
        ));
    }

    #[test]
    fn missing_executable_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("lib/waypoint_counter")).unwrap();
        let resolver = ExecutableResolver::new(vec![tmp.path().to_path_buf()]);
        let err = resolver.resolve("waypoint_counter", "tracker").unwrap_err();
        assert!(matches!(
            err,
            LauncherError::ExecutableNotFound { ref executable, .. } if executable == "tracker"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn first_prefix_with_package_wins() {
        let empty = tempfile::tempdir().unwrap();
        let install = tempfile::tempdir().unwrap();
        let dir = install.path().join("lib/waypoint_counter");
        fs::create_dir_all(&dir).unwrap();
        make_executable(&dir.join("tracker"));

        let resolver = ExecutableResolver::new(vec![
            empty.path().to_path_buf(),
            install.path().to_path_buf(),
        ]);
        let path = resolver.resolve("waypoint_counter", "tracker").unwrap();
        assert_eq!(path, dir.join("tracker"));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_not_resolved() {
        let install = tempfile::tempdir().unwrap();
        let dir = install.path().join("lib/waypoint_counter");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tracker"), "data").unwrap();

        let resolver = ExecutableResolver::new(vec![install.path().to_path_buf()]);
        assert!(resolver.resolve("waypoint_counter", "tracker").is_err());
    }
}
