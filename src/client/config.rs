use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use snafu::prelude::*;
use toml::de::Error as DeError;

use crate::utils::xdg::{Xdg, XdgBaseKind, XdgError};

/// The subset of the configuration the client cares about: where to find the
/// daemon's runtime files.
///
/// The daemon owns the configuration file; the client reads it leniently and
/// treats a missing file as all-defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    pub runtime: RuntimeContent,
}

/// The `runtime` section: overrides for runtime file locations.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeContent {
    pub socket: Option<PathBuf>,
    pub pid: Option<PathBuf>,
}

/// An error type for loading the client-side configuration.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not resolve XDG configuration directory"))]
    XdgConfig { source: XdgError },
    #[snafu(display("Could not read {}", path.display()))]
    Read {
        path: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not parse invalid configurations"))]
    Parse { source: DeError },
}

/// Read the configuration from a custom path. The file must exist.
///
/// # Errors
///
/// This function will return an error if reading or parsing the file fails.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    let content = std::fs::read_to_string(path.as_ref()).context(ReadSnafu {
        path: path.as_ref(),
    })?;
    toml::from_str(&content).context(ParseSnafu)
}

/// Read the configuration from the XDG configuration directory, falling back
/// to defaults when no file exists yet.
///
/// # Errors
///
/// This function will return an error if reading or parsing the file fails.
pub fn load_with_xdg(app_name: String) -> Result<Configuration, LoadConfigurationError> {
    let path = Xdg::new(Path::new(&app_name))
        .and_then(|xdg| xdg.resolve(XdgBaseKind::Config, "config.toml"))
        .context(XdgConfigSnafu)?;

    match std::fs::read_to_string(&path) {
        Ok(content) => toml::from_str(&content).context(ParseSnafu),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Configuration::default()),
        Err(err) => Err(err).context(ReadSnafu { path }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    #[test]
    fn load_with_path_parses_runtime_section() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        file.write_str("[runtime]\nsocket = \"/tmp/pomodoro.socket\"\n")
            .unwrap();

        let config = load_with_path(file.path()).unwrap();
        assert_eq!(
            config.runtime.socket,
            Some(PathBuf::from("/tmp/pomodoro.socket")),
        );
        assert_eq!(config.runtime.pid, None);
    }

    #[test]
    fn load_with_path_ignores_daemon_only_sections() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        file.write_str("[notification.pomodoro-finished]\nsummary = \"Done\"\n")
            .unwrap();

        assert_eq!(load_with_path(file.path()).unwrap(), Configuration::default());
    }

    #[test]
    fn load_with_path_requires_the_file() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        assert!(matches!(
            load_with_path(tmp.child("missing.toml").path()),
            Err(LoadConfigurationError::Read { .. }),
        ));
    }
}
