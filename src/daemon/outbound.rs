use notify_rust::Notification;
use snafu::prelude::*;

use crate::domain::daemon::outbound::{NotifyError, NotifyPort};
use crate::domain::entity::NotificationMessage;

/// A [`NotifyPort`] implementation backed by XDG desktop notifications.
#[derive(Debug, Clone)]
pub struct NotifyService {
    app_name: String,
}

impl NotifyService {
    /// Creates a new [`NotifyService`].
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }
}

#[async_trait::async_trait]
impl NotifyPort for NotifyService {
    async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
        let mut notification = Notification::new();
        notification.appname(&self.app_name);
        notification.summary(message.summary());

        if let Some(body) = message.body() {
            notification.body(body);
        }

        let _ = whatever!(
            notification.show_async().await,
            "Could not show notification",
        );

        Ok(())
    }
}
