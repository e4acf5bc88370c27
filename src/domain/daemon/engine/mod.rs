mod config;
mod core;
mod handle;
mod routine;
mod state;

pub use config::{LoadSessionConfigError, SessionConfig};
pub use handle::EngineHandle;
pub use self::core::{EngineSnapshot, PomodoroEngine};

use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::daemon::event::EventBus;
use crate::domain::repository::DurationRepository;

use routine::EngineRoutine;

/// Derive the initial configuration from the duration store and spawn the
/// background engine routine, returning the handle that controls it.
///
/// # Errors
///
/// This function will return an error if the initial configuration cannot be
/// derived.
pub async fn spawn(
    durations: Arc<dyn DurationRepository>,
    events: EventBus,
) -> Result<EngineHandle, SpawnEngineError> {
    let config = SessionConfig::load(durations.as_ref())
        .await
        .context(ConfigSnafu)?;

    let (sender, receiver) = tokio::sync::mpsc::channel(8);
    EngineRoutine::spawn(config, durations, events, receiver);
    Ok(EngineHandle::new(sender))
}

/// An error for spawning the background engine.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SpawnEngineError {
    #[snafu(display("Could not derive the initial session configuration"))]
    Config { source: LoadSessionConfigError },
}
