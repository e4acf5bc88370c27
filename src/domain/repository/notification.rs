use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::NotificationMessage;

/// An abstract interface for looking up the configured notification texts.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync + 'static {
    /// The message announcing a finished pomodoro.
    ///
    /// # Errors
    ///
    /// This function will return an error if the message cannot be loaded.
    async fn pomodoro_finished(&self) -> Result<NotificationMessage, GetNotificationError>;

    /// The message announcing a finished break.
    ///
    /// # Errors
    ///
    /// This function will return an error if the message cannot be loaded.
    async fn break_finished(&self) -> Result<NotificationMessage, GetNotificationError>;
}

/// An error type of accessing the configured notification texts.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetNotificationError {
    #[snafu(display("Could not use an invalid notification message"))]
    #[non_exhaustive]
    Invalid {
        source: crate::domain::entity::notification::TryNewNotificationMessageError,
    },
    #[snafu(whatever, display("Could not load notification message: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
