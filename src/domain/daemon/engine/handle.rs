use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;

use crate::domain::daemon::engine::core::EngineSnapshot;
use crate::domain::entity::DurationKind;

/// Actions the [`EngineRoutine`] carries out on behalf of handles.
///
/// [`EngineRoutine`]: crate::domain::daemon::engine::routine::EngineRoutine
#[derive(Debug)]
pub enum EngineCommand {
    Start,
    Stop,
    Pause,
    Resume,
    MarkDone,
    Configure {
        kind: DurationKind,
        minutes: u32,
    },
    Query {
        responder: oneshot::Sender<EngineSnapshot>,
    },
}

/// Handle that controls the background engine routine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: Sender<EngineCommand>,
}

impl EngineHandle {
    /// Creates a new [`EngineHandle`].
    pub fn new(commands: Sender<EngineCommand>) -> Self {
        Self { commands }
    }

    /// Ask the engine to begin a pomodoro.
    pub async fn start(&self) {
        self.send(EngineCommand::Start).await;
    }

    /// Ask the engine to reset to idle.
    pub async fn stop(&self) {
        self.send(EngineCommand::Stop).await;
    }

    /// Ask the engine to suspend the running pomodoro.
    pub async fn pause(&self) {
        self.send(EngineCommand::Pause).await;
    }

    /// Ask the engine to resume the suspended pomodoro.
    pub async fn resume(&self) {
        self.send(EngineCommand::Resume).await;
    }

    /// Ask the engine to record an acknowledged pomodoro.
    pub async fn mark_done(&self) {
        self.send(EngineCommand::MarkDone).await;
    }

    /// Ask the engine to persist a new interval length and re-derive its
    /// configuration. Out-of-range values are absorbed.
    pub async fn configure(&self, kind: DurationKind, minutes: u32) {
        self.send(EngineCommand::Configure { kind, minutes }).await;
    }

    /// Fetch a snapshot of the engine's current state.
    pub async fn query(&self) -> EngineSnapshot {
        let (responder, receiver) = oneshot::channel();
        self.send(EngineCommand::Query { responder }).await;
        match receiver.await {
            Ok(snapshot) => snapshot,
            Err(_) => unreachable!("Engine routine should outlive its handles"),
        }
    }

    async fn send(&self, command: EngineCommand) {
        match self.commands.send(command).await {
            Ok(()) => {}
            Err(_) => unreachable!("Engine routine should outlive its handles"),
        }
    }
}
