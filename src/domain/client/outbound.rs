use std::error::Error as StdError;

use snafu::prelude::*;

pub use crate::domain::daemon::inbound::QueryResponse;
use crate::domain::entity::DurationKind;

/// A public port for launching and initializing a daemon.
#[async_trait::async_trait]
pub trait InitPort: Send + Sync + 'static {
    /// Do the initialization operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the daemon is already running or
    /// failed to launch.
    async fn init(&self) -> Result<(), InitDaemonError>;
}

/// An error type of initializing a daemon.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InitDaemonError {
    #[snafu(display("Could not find daemon executable"))]
    NotFound,
    #[snafu(display("Daemon is already running"))]
    AlreadyRunning,
    #[snafu(whatever, display("Initialization failed: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}

/// A public port for requesting the daemon to start a pomodoro.
#[async_trait::async_trait]
pub trait StartPort: Send + Sync + 'static {
    /// Do the start operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn start(&self) -> Result<(), RequestDaemonError>;
}

/// A public port for requesting the daemon to reset the timer.
#[async_trait::async_trait]
pub trait StopPort: Send + Sync + 'static {
    /// Do the stop operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn stop(&self) -> Result<(), RequestDaemonError>;
}

/// A public port for requesting the daemon to suspend the running pomodoro.
#[async_trait::async_trait]
pub trait PausePort: Send + Sync + 'static {
    /// Do the pause operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn pause(&self) -> Result<(), RequestDaemonError>;
}

/// A public port for requesting the daemon to resume the suspended pomodoro.
#[async_trait::async_trait]
pub trait ResumePort: Send + Sync + 'static {
    /// Do the resume operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn resume(&self) -> Result<(), RequestDaemonError>;
}

/// A public port for acknowledging a finished pomodoro to the daemon.
#[async_trait::async_trait]
pub trait DonePort: Send + Sync + 'static {
    /// Do the acknowledgement operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn mark_done(&self) -> Result<(), RequestDaemonError>;
}

/// A public port for requesting the daemon to update one interval length.
#[async_trait::async_trait]
pub trait ConfigurePort: Send + Sync + 'static {
    /// Do the configure operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn configure(&self, kind: DurationKind, minutes: u32) -> Result<(), RequestDaemonError>;
}

/// A public port for requesting the daemon to report its current state.
#[async_trait::async_trait]
pub trait QueryPort: Send + Sync + 'static {
    /// Do the query operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the operation failed.
    async fn query(&self) -> Result<QueryResponse, RequestDaemonError>;
}

/// An error type of sending requests to the daemon.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub))]
pub enum RequestDaemonError {
    #[snafu(display("Endpoint {endpoint} is unavailable"))]
    Unavailable { endpoint: String },
    #[snafu(display("Could not receive a valid response"))]
    BadResponse,
    #[snafu(whatever, display("Request failed: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
