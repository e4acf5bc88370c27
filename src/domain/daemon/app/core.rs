use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::daemon::app::service::{
    ConfigureService, DoneService, PauseService, QueryService, ResumeService, StartService,
    StopService,
};
use crate::domain::daemon::engine::{self, SpawnEngineError};
use crate::domain::daemon::event::EventBus;
use crate::domain::daemon::inbound::{
    ConfigurePort, DonePort, PausePort, QueryPort, ResumePort, StartPort, StopPort,
};
use crate::domain::daemon::outbound::NotifyPort;
use crate::domain::daemon::reactor::{NotificationReactor, ReactorMessages};
use crate::domain::repository::notification::GetNotificationError;
use crate::domain::repository::{DurationRepository, NotificationRepository};

/// Undelivered events buffered per subscriber before the bus drops them.
const EVENT_CAPACITY: usize = 64;

/// Entrance to the domain logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub start: Arc<dyn StartPort>,
    pub stop: Arc<dyn StopPort>,
    pub pause: Arc<dyn PausePort>,
    pub resume: Arc<dyn ResumePort>,
    pub done: Arc<dyn DonePort>,
    pub configure: Arc<dyn ConfigurePort>,
    pub query: Arc<dyn QueryPort>,
}

impl ApplicationCore {
    /// Initialize the application by injecting external repositories and
    /// adapters: build the event bus, subscribe the notification reactor,
    /// spawn the engine and wrap its handle in port services.
    ///
    /// # Errors
    ///
    /// This function will return an error if initialization failed.
    pub async fn setup(
        notify_port: Arc<dyn NotifyPort>,
        duration_repository: Arc<dyn DurationRepository>,
        notification_repository: Arc<dyn NotificationRepository>,
    ) -> Result<ApplicationCore, SetupApplicationCoreError> {
        let events = EventBus::new(EVENT_CAPACITY);

        let messages = load_messages(notification_repository.as_ref()).await?;
        NotificationReactor::spawn(events.subscribe(), messages, notify_port);

        let engine = engine::spawn(duration_repository, events)
            .await
            .context(EngineSnafu)?;
        let engine = Arc::new(engine);

        let app = ApplicationCore {
            start: Arc::new(StartService::new(Arc::clone(&engine))),
            stop: Arc::new(StopService::new(Arc::clone(&engine))),
            pause: Arc::new(PauseService::new(Arc::clone(&engine))),
            resume: Arc::new(ResumeService::new(Arc::clone(&engine))),
            done: Arc::new(DoneService::new(Arc::clone(&engine))),
            configure: Arc::new(ConfigureService::new(Arc::clone(&engine))),
            query: Arc::new(QueryService::new(engine)),
        };

        Ok(app)
    }
}

async fn load_messages(
    repository: &dyn NotificationRepository,
) -> Result<ReactorMessages, SetupApplicationCoreError> {
    let pomodoro_finished = repository
        .pomodoro_finished()
        .await
        .context(NotificationConfigSnafu {
            which: "pomodoro-finished",
        })?;
    let break_finished = repository
        .break_finished()
        .await
        .context(NotificationConfigSnafu {
            which: "break-finished",
        })?;

    Ok(ReactorMessages {
        pomodoro_finished,
        break_finished,
    })
}

/// An error for initializing the application.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SetupApplicationCoreError {
    #[snafu(display("Could not spawn the background engine"))]
    Engine { source: SpawnEngineError },
    #[snafu(display("Could not load the {which} notification message"))]
    NotificationConfig {
        which: &'static str,
        source: GetNotificationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::daemon::outbound::MockNotifyPort;
    use crate::domain::entity::{NotificationMessage, Phase};
    use crate::domain::repository::duration::MockDurationRepository;
    use crate::domain::repository::notification::MockNotificationRepository;

    fn new_repositories() -> (MockDurationRepository, MockNotificationRepository) {
        let mut durations = MockDurationRepository::new();
        durations.expect_minutes().returning(|_| Ok(None));

        let mut notifications = MockNotificationRepository::new();
        notifications.expect_pomodoro_finished().returning(|| {
            Ok(NotificationMessage::try_new("Pomodoro finished".into(), None).unwrap())
        });
        notifications
            .expect_break_finished()
            .returning(|| Ok(NotificationMessage::try_new("Break is over".into(), None).unwrap()));

        (durations, notifications)
    }

    #[tokio::test(start_paused = true)]
    async fn setup_wires_a_working_core() {
        let (durations, notifications) = new_repositories();
        let core = ApplicationCore::setup(
            Arc::new(MockNotifyPort::new()),
            Arc::new(durations),
            Arc::new(notifications),
        )
        .await
        .unwrap();

        core.start.start().await;
        let response = core.query.query().await;
        assert_eq!(response.phase, Phase::Pomodoro.to_string());
        assert_eq!(response.completed, 0);
    }

    #[tokio::test]
    async fn setup_fails_without_notification_messages() {
        let (durations, _) = new_repositories();
        let mut notifications = MockNotificationRepository::new();
        notifications
            .expect_pomodoro_finished()
            .returning(|| snafu::whatever!("missing"));

        let result = ApplicationCore::setup(
            Arc::new(MockNotifyPort::new()),
            Arc::new(durations),
            Arc::new(notifications),
        )
        .await;

        assert!(matches!(
            result,
            Err(SetupApplicationCoreError::NotificationConfig { .. }),
        ));
    }
}
