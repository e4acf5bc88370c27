use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::NotificationMessage;

/// A public port for emitting a desktop notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NotifyPort: Send + Sync + 'static {
    /// Show `message` to the user.
    ///
    /// # Errors
    ///
    /// This function will return an error if the notification cannot be
    /// emitted.
    async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError>;
}

/// An error type of the notification operation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum NotifyError {
    #[snafu(whatever, display("Could not emit a notification: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
