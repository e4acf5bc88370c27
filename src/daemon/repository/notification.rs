use std::sync::Arc;

use crate::daemon::config::{Configuration, MessageContent};
use crate::domain::entity::NotificationMessage;
use crate::domain::repository::notification::{GetNotificationError, NotificationRepository};

/// A [`NotificationRepository`] implementation reading the loaded
/// configuration.
pub struct NotificationConfiguration {
    config: Arc<Configuration>,
}

impl NotificationConfiguration {
    /// Creates a new [`NotificationConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }
}

fn to_message(content: &MessageContent) -> Result<NotificationMessage, GetNotificationError> {
    NotificationMessage::try_new(content.summary.clone(), content.body.clone())
        .map_err(|err| GetNotificationError::Invalid { source: err })
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationConfiguration {
    async fn pomodoro_finished(&self) -> Result<NotificationMessage, GetNotificationError> {
        to_message(&self.config.notification.pomodoro_finished)
    }

    async fn break_finished(&self) -> Result<NotificationMessage, GetNotificationError> {
        to_message(&self.config.notification.break_finished)
    }
}
