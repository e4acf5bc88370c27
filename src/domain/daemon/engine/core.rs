use std::time::Duration;

use crate::domain::daemon::engine::config::SessionConfig;
use crate::domain::daemon::engine::state::{EngineContext, PhaseBehavior, PhaseState};
use crate::domain::daemon::event::{EventBus, TimerEvent};
use crate::domain::entity::{Countdown, CycleCounter, Phase};

/// The pomodoro state machine.
///
/// Owns the phase state, the cycle counter and the session configuration,
/// and publishes every observable change on the injected [`EventBus`]. All
/// mutation goes through the command methods and [`PomodoroEngine::tick`],
/// which the surrounding routine serializes on a single task.
pub struct PomodoroEngine {
    state: Option<PhaseState>,
    context: EngineContext,
}

impl PomodoroEngine {
    /// Create an idle engine and announce the initial cycle status.
    pub fn new(config: SessionConfig, events: EventBus) -> Self {
        let context = EngineContext {
            config,
            cycle: CycleCounter::new(),
            events,
        };
        context
            .events
            .publish(TimerEvent::CycleStatusChanged(context.cycle.status_line()));

        Self {
            state: Some(PhaseState::initial()),
            context,
        }
    }

    /// Begin a pomodoro. Accepted only while idle; in particular, a finished
    /// pomodoro must be acknowledged before the next one starts.
    pub fn start(&mut self) {
        self.transition(|state, context| state.start(context));
    }

    /// Abandon the current pomodoro or break and reset to idle.
    pub fn stop(&mut self) {
        self.transition(|state, context| state.stop(context));
    }

    /// Suspend a running pomodoro. Idempotent; irrelevant in other phases.
    pub fn pause(&mut self) {
        self.transition(|state, context| state.pause(context));
    }

    /// Resume a suspended pomodoro. Idempotent; irrelevant in other phases.
    pub fn resume(&mut self) {
        self.transition(|state, context| state.resume(context));
    }

    /// Acknowledge a finished pomodoro, advancing the long-break cycle.
    pub fn mark_done(&mut self) {
        self.transition(|state, context| state.mark_done(context));
    }

    /// Advance the countdown by `dt` of elapsed real time.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f64();
        self.transition(|state, context| state.tick(context, dt));
    }

    /// Swap in a freshly derived configuration. A countdown already underway
    /// keeps its remaining time.
    pub fn apply_config(&mut self, config: SessionConfig) {
        self.context.config = config;
    }

    /// A point-in-time view of the engine for queries.
    pub fn snapshot(&self) -> EngineSnapshot {
        let state = match &self.state {
            Some(state) => state,
            None => unreachable!("Engine state should never be vacant"),
        };

        let phase = state.phase();
        let (remaining, clock) = match state.countdown() {
            Some(countdown) => (countdown.remaining(), countdown.clock()),
            None if phase == Phase::Idle => {
                let fresh = Countdown::new(&self.context.config.pomodoro);
                (fresh.remaining(), fresh.clock())
            }
            None => (Duration::ZERO, "00:00".to_owned()),
        };

        EngineSnapshot {
            phase,
            paused: state.is_paused(),
            remaining,
            clock,
            completed: self.context.cycle.completed(),
        }
    }

    fn transition(&mut self, f: impl FnOnce(PhaseState, &mut EngineContext) -> PhaseState) {
        self.state = match self.state.take() {
            Some(state) => Some(f(state, &mut self.context)),
            None => unreachable!("Engine state should never be vacant"),
        };
    }
}

/// A point-in-time view of the engine's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub paused: bool,
    pub remaining: Duration,
    pub clock: String,
    pub completed: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::daemon::event::EventStream;
    use crate::domain::entity::SessionDuration;

    fn new_engine(pomodoro: u32, short: u32, long: u32) -> (PomodoroEngine, EventStream) {
        let events = EventBus::new(4096);
        let stream = events.subscribe();
        let config = SessionConfig {
            pomodoro: SessionDuration::from_minutes(pomodoro).unwrap(),
            short_break: SessionDuration::from_minutes(short).unwrap(),
            long_break: SessionDuration::from_minutes(long).unwrap(),
        };
        (PomodoroEngine::new(config, events), stream)
    }

    fn drain(stream: &mut EventStream) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = stream.try_recv() {
            events.push(event);
        }
        events
    }

    fn tick_seconds(engine: &mut PomodoroEngine, seconds: u64) {
        for _ in 0..seconds {
            engine.tick(Duration::from_secs(1));
        }
    }

    #[test]
    fn announces_cycle_status_on_creation() {
        let (_engine, mut stream) = new_engine(25, 5, 15);
        assert_eq!(
            stream.try_recv(),
            Ok(TimerEvent::CycleStatusChanged(
                "4 pomodoro left until long break!".to_owned(),
            )),
        );
    }

    #[test]
    fn full_pomodoro_finishes_exactly_once_under_any_partition() {
        let (mut engine, mut stream) = new_engine(1, 2, 3);
        engine.start();

        let mut elapsed = 0.0;
        while elapsed < 60.0 {
            engine.tick(Duration::from_secs_f64(0.7));
            elapsed += 0.7;
        }

        let events = drain(&mut stream);
        let finishes = events
            .iter()
            .filter(|event| **event == TimerEvent::PomodoroFinished)
            .count();
        assert_eq!(finishes, 1);

        for event in &events {
            if let TimerEvent::DisplayUpdated(clock) = event {
                assert!(!clock.starts_with('-'));
            }
        }

        assert_eq!(engine.snapshot().phase, Phase::Break);
    }

    #[test]
    fn finish_enters_short_break_early_in_cycle() {
        let (mut engine, mut stream) = new_engine(1, 2, 3);
        engine.start();
        tick_seconds(&mut engine, 60);

        let events = drain(&mut stream);
        let finish = events
            .iter()
            .position(|event| *event == TimerEvent::PomodoroFinished)
            .unwrap();
        assert_eq!(events[finish + 1], TimerEvent::BreakStarted);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.remaining, Duration::from_secs(120));
        assert_eq!(snapshot.completed, 0);
    }

    #[test]
    fn finish_enters_long_break_after_four_acknowledged() {
        let (mut engine, _stream) = new_engine(1, 2, 3);
        for _ in 0..4 {
            engine.mark_done();
        }
        assert_eq!(engine.snapshot().completed, 4);

        engine.start();
        tick_seconds(&mut engine, 60);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.remaining, Duration::from_secs(180));
    }

    #[test]
    fn counter_wraps_after_fifth_acknowledgement() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        drain(&mut stream);

        let mut statuses = Vec::new();
        for _ in 0..5 {
            engine.mark_done();
            for event in drain(&mut stream) {
                if let TimerEvent::CycleStatusChanged(status) = event {
                    statuses.push(status);
                }
            }
        }

        assert_eq!(
            statuses,
            vec![
                "3 pomodoro left until long break!",
                "2 pomodoro left until long break!",
                "1 pomodoro left until long break!",
                "Long pomodoro coming up next!",
                "4 pomodoro left until long break!",
            ],
        );
        assert_eq!(engine.snapshot().completed, 0);
    }

    #[test]
    fn pause_is_idempotent_and_freezes_the_countdown() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        engine.start();
        tick_seconds(&mut engine, 5);
        drain(&mut stream);

        engine.pause();
        engine.pause();
        let frozen = engine.snapshot();
        assert!(frozen.paused);

        tick_seconds(&mut engine, 30);
        assert_eq!(engine.snapshot().remaining, frozen.remaining);

        let pauses = drain(&mut stream)
            .into_iter()
            .filter(|event| *event == TimerEvent::PomodoroPaused)
            .count();
        assert_eq!(pauses, 1);
    }

    #[test]
    fn resume_without_pause_changes_nothing() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        engine.start();
        drain(&mut stream);

        engine.resume();
        assert!(drain(&mut stream).is_empty());
        assert!(!engine.snapshot().paused);
    }

    #[test]
    fn resume_continues_where_pause_left_off() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        engine.start();
        tick_seconds(&mut engine, 10);
        engine.pause();
        tick_seconds(&mut engine, 100);
        engine.resume();
        tick_seconds(&mut engine, 10);
        drain(&mut stream);

        assert_eq!(engine.snapshot().remaining, Duration::from_secs(1480));
    }

    #[test]
    fn stop_resets_to_the_full_pomodoro() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        engine.start();
        tick_seconds(&mut engine, 3);
        drain(&mut stream);

        engine.stop();
        assert_eq!(
            drain(&mut stream),
            vec![
                TimerEvent::PomodoroStopped,
                TimerEvent::DisplayUpdated("25:00".to_owned()),
            ],
        );

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.remaining, Duration::from_secs(1500));
    }

    #[test]
    fn commands_in_irrelevant_phases_are_absorbed() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        drain(&mut stream);

        engine.stop();
        engine.pause();
        engine.resume();
        assert!(drain(&mut stream).is_empty());
        assert_eq!(engine.snapshot().phase, Phase::Idle);

        engine.start();
        drain(&mut stream);
        engine.mark_done();
        assert!(drain(&mut stream).is_empty());
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Pomodoro);
        assert_eq!(snapshot.completed, 0);
    }

    #[test]
    fn start_is_rejected_until_acknowledged() {
        let (mut engine, mut stream) = new_engine(1, 2, 3);
        engine.start();
        tick_seconds(&mut engine, 60 + 120);
        assert_eq!(engine.snapshot().phase, Phase::AwaitingDone);
        drain(&mut stream);

        engine.start();
        assert!(drain(&mut stream).is_empty());
        assert_eq!(engine.snapshot().phase, Phase::AwaitingDone);

        engine.mark_done();
        engine.start();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Pomodoro);
        assert_eq!(snapshot.completed, 1);
    }

    #[test]
    fn finish_suppresses_the_zero_display() {
        let (mut engine, mut stream) = new_engine(1, 2, 3);
        engine.start();
        tick_seconds(&mut engine, 60);

        let events = drain(&mut stream);
        let clocks: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                TimerEvent::DisplayUpdated(clock) => Some(clock.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(clocks.last(), Some(&"00:01"));
        assert!(!clocks.contains(&"00:00"));
    }

    #[test]
    fn end_to_end_default_cycle() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        engine.start();
        tick_seconds(&mut engine, 1500);

        let events = drain(&mut stream);
        assert!(events.contains(&TimerEvent::PomodoroFinished));
        assert!(events.contains(&TimerEvent::BreakStarted));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.remaining, Duration::from_secs(300));
        assert_eq!(snapshot.completed, 0);

        tick_seconds(&mut engine, 300);
        assert!(drain(&mut stream).contains(&TimerEvent::BreakFinished));
        assert_eq!(engine.snapshot().phase, Phase::AwaitingDone);

        engine.mark_done();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.completed, 1);
    }

    #[test]
    fn new_configuration_spares_the_running_countdown() {
        let (mut engine, mut stream) = new_engine(25, 5, 15);
        engine.start();
        tick_seconds(&mut engine, 10);

        engine.apply_config(SessionConfig {
            pomodoro: SessionDuration::from_minutes(30).unwrap(),
            short_break: SessionDuration::from_minutes(5).unwrap(),
            long_break: SessionDuration::from_minutes(15).unwrap(),
        });
        assert_eq!(engine.snapshot().remaining, Duration::from_secs(1490));

        // The next reset picks the new length up.
        engine.stop();
        drain(&mut stream);
        assert_eq!(engine.snapshot().remaining, Duration::from_secs(1800));
        assert_eq!(engine.snapshot().clock, "30:00");
    }
}
