use std::fmt::{Display, Formatter, Result as FmtResult};

/// The engine's operating mode.
///
/// `AwaitingDone` is the stretch between a finished break and the user's
/// acknowledgement; a new pomodoro cannot start until the finished one is
/// marked done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pomodoro,
    Break,
    AwaitingDone,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Pomodoro => f.write_str("Pomodoro"),
            Self::Break => f.write_str("Break"),
            Self::AwaitingDone => f.write_str("Awaiting done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Idle.to_string(), "Idle");
        assert_eq!(Phase::Pomodoro.to_string(), "Pomodoro");
        assert_eq!(Phase::Break.to_string(), "Break");
        assert_eq!(Phase::AwaitingDone.to_string(), "Awaiting done");
    }
}
