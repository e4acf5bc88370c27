use crate::domain::entity::DurationKind;

/// What the user asked the client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch and initialize a daemon process
    Init,
    /// Start a pomodoro
    Start,
    /// Reset the timer
    Stop,
    /// Suspend the running pomodoro
    Pause,
    /// Resume the suspended pomodoro
    Resume,
    /// Acknowledge a finished pomodoro
    Done,
    /// Show the timer's status. Show all fields if no flag is specified.
    Status(StatusArguments),
    /// Update one configured interval length
    Set { kind: DurationKind, minutes: u32 },
}

/// Field filters for [`Command::Status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusArguments {
    /// Show the current phase
    pub phase: bool,
    /// Show the remaining time
    pub remaining: bool,
    /// Show the completed pomodoros in the current cycle
    pub completed: bool,
}
