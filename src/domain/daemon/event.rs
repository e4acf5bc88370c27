use tokio::sync::broadcast::{self, Receiver, Sender};

/// A state change announced by the engine.
///
/// Events are one-way: the engine never waits on its subscribers, and any
/// number of them (including none) may listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    PomodoroStarted,
    PomodoroStopped,
    PomodoroPaused,
    PomodoroResumed,
    PomodoroFinished,
    BreakStarted,
    BreakFinished,
    /// The `MM:SS` clock text changed.
    DisplayUpdated(String),
    /// Progress towards the next long break changed.
    CycleStatusChanged(String),
}

/// A subscription end of the [`EventBus`].
pub type EventStream = Receiver<TimerEvent>;

/// Broadcast channel carrying [`TimerEvent`]s from the engine to whoever
/// cares.
///
/// Constructed once by the composition root and handed to the engine and its
/// subscribers, so every test can run against its own private bus.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Sender<TimerEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` undelivered events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Open a new subscription receiving every event published from now on.
    pub fn subscribe(&self) -> EventStream {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers. Publishing with no
    /// subscriber is not an error.
    pub fn publish(&self, event: TimerEvent) {
        tracing::trace!(?event, "Publishing timer event");
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_delivers_to_all_subscribers() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(TimerEvent::PomodoroStarted);

        assert_eq!(first.try_recv(), Ok(TimerEvent::PomodoroStarted));
        assert_eq!(second.try_recv(), Ok(TimerEvent::PomodoroStarted));
    }

    #[test]
    fn publish_without_subscriber_is_fine() {
        let bus = EventBus::new(8);
        bus.publish(TimerEvent::BreakStarted);

        // A later subscriber only sees later events.
        let mut stream = bus.subscribe();
        bus.publish(TimerEvent::BreakFinished);
        assert_eq!(stream.try_recv(), Ok(TimerEvent::BreakFinished));
        assert!(stream.try_recv().is_err());
    }
}
