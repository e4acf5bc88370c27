mod content;
mod reader;

pub use content::{Configuration, MessageContent, NotificationContent, RuntimeContent};
pub use reader::ReadContentError;

use std::path::Path;

use snafu::prelude::*;
use toml::de::Error as DeError;

use crate::utils::xdg::{Xdg, XdgBaseKind, XdgError};

use reader::ContentReader;

/// An error type for loading configuration from files.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not resolve XDG configuration directory"))]
    XdgConfig { source: XdgError },
    #[snafu(display("Could not read content from file"))]
    Read { source: ReadContentError },
    #[snafu(display("Could not parse invalid configurations"))]
    Parse { source: DeError },
}

/// Read configuration from the given path, optionally creating a commented
/// default file when it does not exist yet.
///
/// # Errors
///
/// This function will return an error if reading or parsing the file fails.
pub fn load<P: AsRef<Path>>(
    path: P,
    create_new: bool,
) -> Result<Configuration, LoadConfigurationError> {
    let content = ContentReader::new(path.as_ref(), create_new)
        .read()
        .context(ReadSnafu)?;
    toml::from_str(&content).context(ParseSnafu)
}

/// Read configuration from a custom path. This won't create any new file.
///
/// # Errors
///
/// This function will return an error if reading or parsing the file fails.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    load(path, false)
}

/// Read configuration from the XDG configuration directory, creating a
/// default file when it does not exist yet.
///
/// # Errors
///
/// This function will return an error if reading or parsing the file fails.
pub fn load_with_xdg(app_name: String) -> Result<Configuration, LoadConfigurationError> {
    let path = Xdg::new(Path::new(&app_name))
        .and_then(|xdg| xdg.resolve_create(XdgBaseKind::Config, "config.toml"))
        .context(XdgConfigSnafu)?;
    load(path, true)
}
