use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::domain::daemon::event::{EventStream, TimerEvent};
use crate::domain::daemon::outbound::NotifyPort;
use crate::domain::entity::NotificationMessage;
use crate::tracing_report;

/// The notification texts the reactor announces interval ends with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactorMessages {
    pub pomodoro_finished: NotificationMessage,
    pub break_finished: NotificationMessage,
}

/// Background task translating engine events into user-visible feedback:
/// desktop notifications for finished intervals, log lines for the rest.
pub struct NotificationReactor {
    events: EventStream,
    messages: ReactorMessages,
    notifier: Arc<dyn NotifyPort>,
}

impl NotificationReactor {
    /// Spawn a running [`NotificationReactor`] in the background. It ends
    /// when the event bus closes.
    pub fn spawn(
        events: EventStream,
        messages: ReactorMessages,
        notifier: Arc<dyn NotifyPort>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut reactor = Self {
                events,
                messages,
                notifier,
            };
            reactor.run().await;
        })
    }

    async fn run(&mut self) {
        loop {
            match self.events.recv().await {
                Ok(event) => self.react(event).await,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped events while reacting too slowly");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    async fn react(&self, event: TimerEvent) {
        match event {
            TimerEvent::PomodoroFinished => self.announce(&self.messages.pomodoro_finished).await,
            TimerEvent::BreakFinished => self.announce(&self.messages.break_finished).await,
            TimerEvent::CycleStatusChanged(status) => tracing::info!(%status, "Cycle advanced"),
            event => tracing::debug!(?event, "Observed timer event"),
        }
    }

    async fn announce(&self, message: &NotificationMessage) {
        if let Err(err) = self.notifier.notify(message).await {
            tracing_report!(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use crate::domain::daemon::event::EventBus;
    use crate::domain::daemon::outbound::NotifyError;

    struct RecordingNotifier {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNotifier {
        fn new() -> (Arc<dyn NotifyPort>, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let notifier = Self {
                seen: Arc::clone(&seen),
            };
            (Arc::new(notifier), seen)
        }
    }

    #[async_trait::async_trait]
    impl NotifyPort for RecordingNotifier {
        async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
            self.seen.lock().unwrap().push(message.summary().to_owned());
            Ok(())
        }
    }

    fn messages() -> ReactorMessages {
        ReactorMessages {
            pomodoro_finished: NotificationMessage::try_new("Pomodoro finished".into(), None)
                .unwrap(),
            break_finished: NotificationMessage::try_new("Break is over".into(), None).unwrap(),
        }
    }

    #[tokio::test]
    async fn reactor_notifies_on_finished_intervals() {
        let bus = EventBus::new(16);
        let (notifier, seen) = RecordingNotifier::new();
        let reactor = NotificationReactor::spawn(bus.subscribe(), messages(), notifier);

        bus.publish(TimerEvent::PomodoroStarted);
        bus.publish(TimerEvent::PomodoroFinished);
        bus.publish(TimerEvent::BreakStarted);
        bus.publish(TimerEvent::BreakFinished);
        drop(bus);
        reactor.await.unwrap();

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &["Pomodoro finished", "Break is over"],
        );
    }

    #[tokio::test]
    async fn reactor_ignores_display_updates() {
        let bus = EventBus::new(16);
        let (notifier, seen) = RecordingNotifier::new();
        let reactor = NotificationReactor::spawn(bus.subscribe(), messages(), notifier);

        bus.publish(TimerEvent::DisplayUpdated("24:59".to_owned()));
        bus.publish(TimerEvent::CycleStatusChanged("status".to_owned()));
        drop(bus);
        reactor.await.unwrap();

        assert!(seen.lock().unwrap().is_empty());
    }
}
