use crate::domain::daemon::engine::config::SessionConfig;
use crate::domain::daemon::event::{EventBus, TimerEvent};
use crate::domain::entity::{Countdown, CountdownStep, CycleCounter, Phase};

/// Everything the phase states read and mutate besides themselves.
pub(super) struct EngineContext {
    pub config: SessionConfig,
    pub cycle: CycleCounter,
    pub events: EventBus,
}

/// Reactions of one phase to the engine's commands and ticks.
///
/// Every method consumes the state and returns the next one; a command that
/// is irrelevant in the current phase hands the state back unchanged and
/// publishes nothing.
#[enum_dispatch::enum_dispatch]
pub(super) trait PhaseBehavior {
    fn start(self, context: &mut EngineContext) -> PhaseState;
    fn stop(self, context: &mut EngineContext) -> PhaseState;
    fn pause(self, context: &mut EngineContext) -> PhaseState;
    fn resume(self, context: &mut EngineContext) -> PhaseState;
    fn mark_done(self, context: &mut EngineContext) -> PhaseState;
    fn tick(self, context: &mut EngineContext, dt: f64) -> PhaseState;
}

/// The engine's current phase together with its phase-local data.
#[derive(Debug)]
#[enum_dispatch::enum_dispatch(PhaseBehavior)]
pub(super) enum PhaseState {
    Idle(IdleState),
    Pomodoro(PomodoroState),
    Break(BreakState),
    AwaitingDone(AwaitingDoneState),
}

impl PhaseState {
    pub fn initial() -> Self {
        IdleState.into()
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle(_) => Phase::Idle,
            Self::Pomodoro(_) => Phase::Pomodoro,
            Self::Break(_) => Phase::Break,
            Self::AwaitingDone(_) => Phase::AwaitingDone,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Pomodoro(state) if state.paused)
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        match self {
            Self::Pomodoro(state) => Some(&state.countdown),
            Self::Break(state) => Some(&state.countdown),
            _ => None,
        }
    }
}

/// No pomodoro underway. The next `start` begins one.
#[derive(Debug)]
pub(super) struct IdleState;

impl PhaseBehavior for IdleState {
    fn start(self, context: &mut EngineContext) -> PhaseState {
        context.events.publish(TimerEvent::PomodoroStarted);
        PomodoroState {
            countdown: Countdown::new(&context.config.pomodoro),
            paused: false,
        }
        .into()
    }

    fn stop(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn pause(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn resume(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn mark_done(self, context: &mut EngineContext) -> PhaseState {
        acknowledge(context)
    }

    fn tick(self, _context: &mut EngineContext, _dt: f64) -> PhaseState {
        self.into()
    }
}

/// A work interval counting down, possibly suspended.
#[derive(Debug)]
pub(super) struct PomodoroState {
    pub countdown: Countdown,
    pub paused: bool,
}

impl PhaseBehavior for PomodoroState {
    fn start(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn stop(self, context: &mut EngineContext) -> PhaseState {
        enter_idle(context)
    }

    fn pause(mut self, context: &mut EngineContext) -> PhaseState {
        if !self.paused {
            self.paused = true;
            context.events.publish(TimerEvent::PomodoroPaused);
        }
        self.into()
    }

    fn resume(mut self, context: &mut EngineContext) -> PhaseState {
        if self.paused {
            self.paused = false;
            context.events.publish(TimerEvent::PomodoroResumed);
        }
        self.into()
    }

    fn mark_done(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn tick(mut self, context: &mut EngineContext, dt: f64) -> PhaseState {
        if self.paused {
            return self.into();
        }

        match self.countdown.advance(dt) {
            CountdownStep::Finished => begin_break(context),
            CountdownStep::Refresh => {
                context
                    .events
                    .publish(TimerEvent::DisplayUpdated(self.countdown.clock()));
                self.into()
            }
            CountdownStep::Silent => self.into(),
        }
    }
}

/// A rest interval counting down. Breaks cannot pause.
#[derive(Debug)]
pub(super) struct BreakState {
    pub countdown: Countdown,
}

impl PhaseBehavior for BreakState {
    fn start(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn stop(self, context: &mut EngineContext) -> PhaseState {
        enter_idle(context)
    }

    fn pause(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn resume(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn mark_done(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn tick(mut self, context: &mut EngineContext, dt: f64) -> PhaseState {
        match self.countdown.advance(dt) {
            CountdownStep::Finished => {
                context.events.publish(TimerEvent::BreakFinished);
                AwaitingDoneState.into()
            }
            CountdownStep::Refresh => {
                context
                    .events
                    .publish(TimerEvent::DisplayUpdated(self.countdown.clock()));
                self.into()
            }
            CountdownStep::Silent => self.into(),
        }
    }
}

/// The break ran out and the finished pomodoro still needs the user's
/// acknowledgement. `start` is rejected until then.
#[derive(Debug)]
pub(super) struct AwaitingDoneState;

impl PhaseBehavior for AwaitingDoneState {
    fn start(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn stop(self, context: &mut EngineContext) -> PhaseState {
        enter_idle(context)
    }

    fn pause(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn resume(self, _context: &mut EngineContext) -> PhaseState {
        self.into()
    }

    fn mark_done(self, context: &mut EngineContext) -> PhaseState {
        acknowledge(context)
    }

    fn tick(self, _context: &mut EngineContext, _dt: f64) -> PhaseState {
        self.into()
    }
}

/// Reset to idle: the countdown snaps back to the full pomodoro length and
/// the display refreshes immediately.
fn enter_idle(context: &mut EngineContext) -> PhaseState {
    context.events.publish(TimerEvent::PomodoroStopped);
    let fresh = Countdown::new(&context.config.pomodoro);
    context
        .events
        .publish(TimerEvent::DisplayUpdated(fresh.clock()));
    IdleState.into()
}

/// Record an acknowledged pomodoro, announce the cycle progress and reset.
fn acknowledge(context: &mut EngineContext) -> PhaseState {
    context.cycle.advance();
    context
        .events
        .publish(TimerEvent::CycleStatusChanged(context.cycle.status_line()));
    enter_idle(context)
}

/// Leave the finished pomodoro behind and start the break the cycle calls
/// for.
fn begin_break(context: &mut EngineContext) -> PhaseState {
    context.events.publish(TimerEvent::PomodoroFinished);
    let duration = context.config.break_duration(context.cycle.long_break_due());
    let state = BreakState {
        countdown: Countdown::new(duration),
    };
    context.events.publish(TimerEvent::BreakStarted);
    state.into()
}
