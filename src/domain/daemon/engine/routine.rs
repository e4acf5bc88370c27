use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::domain::daemon::engine::config::SessionConfig;
use crate::domain::daemon::engine::core::PomodoroEngine;
use crate::domain::daemon::engine::handle::EngineCommand;
use crate::domain::daemon::event::EventBus;
use crate::domain::entity::{DurationKind, SessionDuration};
use crate::domain::repository::DurationRepository;
use crate::tracing_report;

/// How often the engine advances its countdown.
const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Background task owning the [`PomodoroEngine`].
///
/// The select loop is the engine's single mutator: interval ticks and
/// handle-delivered commands are strictly serialized, so the state machine
/// itself never sees concurrency.
pub(super) struct EngineRoutine {
    engine: PomodoroEngine,
    durations: Arc<dyn DurationRepository>,
    commands: Receiver<EngineCommand>,
}

impl EngineRoutine {
    /// Spawn a running [`EngineRoutine`] in the background. It ends when the
    /// last handle is dropped.
    pub fn spawn(
        config: SessionConfig,
        durations: Arc<dyn DurationRepository>,
        events: EventBus,
        commands: Receiver<EngineCommand>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut routine = Self {
                engine: PomodoroEngine::new(config, events),
                durations,
                commands,
            };
            routine.run().await;
        })
    }

    async fn run(&mut self) {
        let mut ticker = tokio::time::interval(TICK_PERIOD);
        let mut last = ticker.tick().await;

        loop {
            tokio::select! {
                now = ticker.tick() => {
                    self.engine.tick(now - last);
                    last = now;
                }
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
            }
        }
    }

    async fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Start => self.engine.start(),
            EngineCommand::Stop => self.engine.stop(),
            EngineCommand::Pause => self.engine.pause(),
            EngineCommand::Resume => self.engine.resume(),
            EngineCommand::MarkDone => self.engine.mark_done(),
            EngineCommand::Configure { kind, minutes } => self.configure(kind, minutes).await,
            EngineCommand::Query { responder } => {
                let _ = responder.send(self.engine.snapshot());
            }
        }
    }

    /// Persist an accepted duration and re-derive the whole configuration
    /// from the store. Invalid values never reach the store.
    async fn configure(&mut self, kind: DurationKind, minutes: u32) {
        if let Err(err) = SessionDuration::from_minutes(minutes) {
            tracing::warn!(%kind, minutes, reason = %err, "Rejected duration update");
            return;
        }

        if let Err(err) = self.durations.set_minutes(kind, minutes).await {
            tracing_report!(err);
            return;
        }

        match SessionConfig::load(self.durations.as_ref()).await {
            Ok(config) => self.engine.apply_config(config),
            Err(err) => tracing_report!(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use tokio::sync::mpsc;

    use crate::domain::daemon::engine::handle::EngineHandle;
    use crate::domain::entity::Phase;
    use crate::domain::repository::duration::{
        GetDurationError, MockDurationRepository, StoreDurationError,
    };

    fn spawn_with(repository: MockDurationRepository) -> EngineHandle {
        let (sender, receiver) = mpsc::channel(8);
        let config = SessionConfig {
            pomodoro: SessionDuration::from_minutes(25).unwrap(),
            short_break: SessionDuration::from_minutes(5).unwrap(),
            long_break: SessionDuration::from_minutes(15).unwrap(),
        };
        EngineRoutine::spawn(config, Arc::new(repository), EventBus::new(64), receiver);
        EngineHandle::new(sender)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_drive_the_countdown() {
        let handle = spawn_with(MockDurationRepository::new());
        handle.start().await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        let snapshot = handle.query().await;
        assert_eq!(snapshot.phase, Phase::Pomodoro);

        let remaining = snapshot.remaining.as_secs_f64();
        assert!((1489.0..=1491.0).contains(&remaining), "{remaining}");
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_time_between_ticks() {
        let handle = spawn_with(MockDurationRepository::new());
        handle.start().await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.pause().await;
        let paused = handle.query().await;
        assert!(paused.paused);

        tokio::time::sleep(Duration::from_secs(120)).await;
        let later = handle.query().await;
        assert_eq!(later.remaining, paused.remaining);
    }

    #[tokio::test(start_paused = true)]
    async fn full_pomodoro_rolls_into_the_break() {
        let handle = spawn_with(MockDurationRepository::new());
        handle.start().await;

        tokio::time::sleep(Duration::from_secs(1501)).await;
        let snapshot = handle.query().await;
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.completed, 0);

        let remaining = snapshot.remaining.as_secs_f64();
        assert!((298.0..=300.0).contains(&remaining), "{remaining}");
    }

    #[tokio::test(start_paused = true)]
    async fn configure_persists_then_reloads() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&written);

        let mut repository = MockDurationRepository::new();
        repository
            .expect_set_minutes()
            .returning(move |kind, minutes| {
                log.lock().unwrap().push((kind, minutes));
                Ok::<(), StoreDurationError>(())
            });
        repository.expect_minutes().returning(|kind| match kind {
            DurationKind::Pomodoro => Ok(Some(50)),
            _ => Ok::<Option<u32>, GetDurationError>(None),
        });

        let handle = spawn_with(repository);
        handle.configure(DurationKind::Pomodoro, 50).await;
        handle.start().await;

        tokio::time::sleep(Duration::from_secs(1)).await;
        let snapshot = handle.query().await;
        let remaining = snapshot.remaining.as_secs_f64();
        assert!((2998.0..=3000.0).contains(&remaining), "{remaining}");

        assert_eq!(
            written.lock().unwrap().as_slice(),
            &[(DurationKind::Pomodoro, 50)],
        );
    }

    #[tokio::test(start_paused = true)]
    async fn configure_rejects_out_of_range_minutes() {
        // The mock would panic on any unexpected store access.
        let repository = MockDurationRepository::new();
        let handle = spawn_with(repository);

        handle.configure(DurationKind::Pomodoro, 0).await;
        handle.configure(DurationKind::ShortBreak, 256).await;

        let snapshot = handle.query().await;
        assert_eq!(snapshot.remaining, Duration::from_secs(1500));
    }
}
