use std::fs;
use std::io::Error as IoError;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

/// Helper for preparing the daemon's on-disk environment before it serves:
/// directories that must exist and the permissions they must carry.
#[derive(Debug, Default)]
pub struct Environment {
    directories: Vec<PathBuf>,
    permissions: Vec<(PathBuf, u32)>,
}

impl Environment {
    /// Creates a new, empty [`Environment`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory to create (with its ancestors) if missing.
    pub fn register_directory<P: AsRef<Path>>(&mut self, directory: P) {
        self.directories.push(directory.as_ref().to_path_buf());
    }

    /// Register a path whose permission bits must be set to `permission`.
    pub fn register_permission<P: AsRef<Path>>(&mut self, path: P, permission: u32) {
        self.permissions
            .push((path.as_ref().to_path_buf(), permission));
    }

    /// Apply all registered operations.
    ///
    /// # Errors
    ///
    /// This function will return an error if any file system operation fails.
    pub fn setup(self) -> Result<(), SetupEnvironmentError> {
        for dir in &self.directories {
            fs::create_dir_all(dir).context(CreateDirectorySnafu { dir })?;
        }

        for (path, permission) in &self.permissions {
            let metadata = fs::metadata(path).context(SetPermissionSnafu {
                path,
                permission: *permission,
            })?;

            let mut perms = metadata.permissions();
            if perms.mode() & 0o777 != *permission {
                perms.set_mode(*permission);
                fs::set_permissions(path, perms).context(SetPermissionSnafu {
                    path,
                    permission: *permission,
                })?;
            }
        }

        Ok(())
    }
}

/// An error for setting up the running environment.
#[derive(Debug, Snafu, Clone)]
pub enum SetupEnvironmentError {
    #[snafu(display("Could not create directory {}", dir.display()))]
    CreateDirectory {
        dir: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not set {}'s permission to {permission:o}", path.display()))]
    SetPermission {
        path: PathBuf,
        permission: u32,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use predicates::path as path_pred;

    #[test]
    fn setup_creates_nested_directories() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let subdir = tmp.child("runtime/sockets");
        subdir.assert(path_pred::missing());

        let mut env = Environment::new();
        env.register_directory(subdir.path());
        env.setup().unwrap();

        subdir.assert(path_pred::is_dir());
    }

    #[test]
    fn setup_applies_permissions() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let dir = tmp.child("private");

        let mut env = Environment::new();
        env.register_directory(dir.path());
        env.register_permission(dir.path(), 0o700);
        env.setup().unwrap();

        let mode = fs::metadata(dir.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn setup_fails_on_missing_permission_target() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");

        let mut env = Environment::new();
        env.register_permission(tmp.child("nowhere").path(), 0o700);

        assert!(matches!(
            env.setup(),
            Err(SetupEnvironmentError::SetPermission { .. }),
        ));
    }
}
