use tokio::time::Duration;

use crate::domain::entity::DurationKind;

/// A public port for starting a pomodoro.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StartPort: Send + Sync + 'static {
    /// Do the start operation.
    async fn start(&self);
}

/// A public port for resetting the timer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StopPort: Send + Sync + 'static {
    /// Do the stop operation.
    async fn stop(&self);
}

/// A public port for suspending a running pomodoro.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PausePort: Send + Sync + 'static {
    /// Do the pause operation.
    async fn pause(&self);
}

/// A public port for resuming a suspended pomodoro.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ResumePort: Send + Sync + 'static {
    /// Do the resume operation.
    async fn resume(&self);
}

/// A public port for acknowledging a finished pomodoro.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DonePort: Send + Sync + 'static {
    /// Do the acknowledgement operation.
    async fn mark_done(&self);
}

/// A public port for updating one configured interval length.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ConfigurePort: Send + Sync + 'static {
    /// Do the configure operation.
    async fn configure(&self, kind: DurationKind, minutes: u32);
}

/// A public port for querying the current state.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait QueryPort: Send + Sync + 'static {
    /// Do the query operation.
    async fn query(&self) -> QueryResponse;
}

/// The timer's state as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub phase: String,
    pub remaining: Duration,
    pub clock: String,
    pub completed: u8,
}
