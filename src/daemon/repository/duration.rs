use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::domain::entity::DurationKind;
use crate::domain::repository::duration::{
    DurationRepository, GetDurationError, StoreDurationError,
};

/// A [`DurationRepository`] implementation persisting the user's interval
/// lengths in a small TOML file (conventionally `durations.toml` in the XDG
/// data directory).
///
/// A missing file reads as an empty store, so defaults apply until the first
/// write. Writes are read-modify-write with last-write-wins semantics.
pub struct DurationPreferences {
    path: PathBuf,
}

/// The file's shape: one optional minutes entry per interval.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
struct StoredDurations {
    #[serde(rename = "pomodoro-time", skip_serializing_if = "Option::is_none")]
    pomodoro: Option<u32>,
    #[serde(rename = "shortbreak-time", skip_serializing_if = "Option::is_none")]
    short_break: Option<u32>,
    #[serde(rename = "longbreak-time", skip_serializing_if = "Option::is_none")]
    long_break: Option<u32>,
}

impl StoredDurations {
    fn entry(&mut self, kind: DurationKind) -> &mut Option<u32> {
        match kind {
            DurationKind::Pomodoro => &mut self.pomodoro,
            DurationKind::ShortBreak => &mut self.short_break,
            DurationKind::LongBreak => &mut self.long_break,
        }
    }
}

impl DurationPreferences {
    /// Creates a new [`DurationPreferences`] over the given file path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn read_all(&self) -> Result<StoredDurations, GetDurationError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoredDurations::default()),
            Err(err) => {
                return Err(err).with_whatever_context(|_| {
                    format!("Could not read duration store {}", self.path.display())
                });
            }
        };

        toml::from_str(&content).with_whatever_context(|_| {
            format!("Could not parse duration store {}", self.path.display())
        })
    }

    async fn write_all(&self, durations: &StoredDurations) -> Result<(), StoreDurationError> {
        let content = toml::to_string(durations)
            .with_whatever_context(|_| "Could not serialize duration store".to_owned())?;

        tokio::fs::write(&self.path, content)
            .await
            .with_whatever_context(|_| {
                format!("Could not write duration store {}", self.path.display())
            })
    }
}

#[async_trait::async_trait]
impl DurationRepository for DurationPreferences {
    async fn minutes(&self, kind: DurationKind) -> Result<Option<u32>, GetDurationError> {
        let mut stored = self.read_all().await?;
        Ok(*stored.entry(kind))
    }

    async fn set_minutes(&self, kind: DurationKind, minutes: u32) -> Result<(), StoreDurationError> {
        let mut stored = match self.read_all().await {
            Ok(stored) => stored,
            // A broken store should not brick updates; start over instead.
            Err(err) => {
                tracing::warn!(reason = %err, "Replacing unreadable duration store");
                StoredDurations::default()
            }
        };

        *stored.entry(kind) = Some(minutes);
        self.write_all(&stored).await
    }
}
