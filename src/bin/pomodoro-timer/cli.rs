use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pomodoro_timer::client::app::{Command as ClientCommand, StatusArguments};
use pomodoro_timer::domain::entity::{DurationKind, SessionDuration};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch and initialize a daemon process
    Init {
        /// Path to the daemon executable
        #[arg(short, long)]
        executable: Option<PathBuf>,
        /// Maximum logging level the daemon should use
        #[arg(short, long, default_value_t = Level::INFO)]
        verbosity: Level,
    },
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
    Status {
        /// Show the current phase
        #[arg(short, long)]
        phase: bool,
        /// Show the remaining time
        #[arg(short, long)]
        remaining: bool,
        /// Show the completed pomodoros in the current cycle
        #[arg(short, long)]
        completed: bool,
    },
    /// Update one configured interval length
    Set {
        /// Which interval to change
        interval: Interval,
        /// The new length in minutes
        #[arg(value_parser = clap::value_parser!(u32).range(1..=SessionDuration::MAX_MINUTES as i64))]
        minutes: u32,
    },
}

/// CLI spelling of the configurable intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Interval {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl From<Interval> for DurationKind {
    fn from(value: Interval) -> Self {
        match value {
            Interval::Pomodoro => Self::Pomodoro,
            Interval::ShortBreak => Self::ShortBreak,
            Interval::LongBreak => Self::LongBreak,
        }
    }
}

impl From<Command> for ClientCommand {
    fn from(value: Command) -> Self {
        match value {
            Command::Init { .. } => Self::Init,
            Command::Start => Self::Start,
            Command::Stop => Self::Stop,
            Command::Pause => Self::Pause,
            Command::Resume => Self::Resume,
            Command::Done => Self::Done,
            Command::Status {
                phase,
                remaining,
                completed,
            } => Self::Status(StatusArguments {
                phase,
                remaining,
                completed,
            }),
            Command::Set { interval, minutes } => Self::Set {
                kind: interval.into(),
                minutes,
            },
        }
    }
}
