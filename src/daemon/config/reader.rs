use std::fs::File;
use std::io::{Error as IoError, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This configuration file is generated automatically. Feel free to do some
# modification.
#
# Interval lengths are not configured here: set them at runtime with
# `pomodoro-timer set <interval> <minutes>`.

# The `notification.<event>` sections specify the desktop notification shown
# when an interval ends. `body` is optional.
[notification.pomodoro-finished]
summary = "Pomodoro finished"
body = "Well done! Your break is starting."

[notification.break-finished]
summary = "Break is over"
body = "Mark the pomodoro as done to continue."

# The `runtime` section specifies the paths to some runtime files. Leave
# them empty to use default settings. Currently environment variables are not
# supported.
# [runtime]
# socket = "/path/to/unix/socket"
# pid = "/path/to/pid/file"
"#;

/// A reader which reads the configuration content and creates a default
/// configuration file if it is missing.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file doesn't exist and may
    /// not be created, or creating it fails.
    pub fn read(self) -> Result<String, ReadContentError> {
        let Self { path, create_new } = self;
        let mut file = Self::open_configuration(path, create_new)?;
        let mut content = String::new();
        file.read_to_string(&mut content).context(FileSystemSnafu {
            when: "Reading configuration",
        })?;
        Ok(content)
    }

    /// Open the configuration file. Create one if specified when it doesn't
    /// exist before.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file doesn't exist or it
    /// fails to create a default one.
    fn open_configuration(path: PathBuf, create_new: bool) -> Result<File, ReadContentError> {
        match File::open(path.as_path()) {
            Ok(file) => Ok(file),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    if create_new {
                        Self::create_configuration(path.as_path())
                    } else {
                        NotFoundSnafu { path }.fail()
                    }
                }
                _ => Err(err).context(FileSystemSnafu {
                    when: "Opening configuration file",
                }),
            },
        }
    }

    /// Create a default configuration file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the creation fails.
    fn create_configuration<P: AsRef<Path>>(path: P) -> Result<File, ReadContentError> {
        let mut file = File::options()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })?;

        file.seek(SeekFrom::Start(0)).context(FileSystemSnafu {
            when: "Resetting file cursor position to start",
        })?;

        Ok(file)
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
