use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use snafu::prelude::*;

/// The length of one session interval, validated on construction.
///
/// Durations are configured in whole minutes and bounded by
/// [`SessionDuration::MAX_MINUTES`] so the clock display always fits its
/// two-digit fields without truncation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionDuration(Duration);

impl SessionDuration {
    /// Upper bound accepted for a configured interval.
    pub const MAX_MINUTES: u32 = 255;

    /// Try to create a [`SessionDuration`] from a number of minutes.
    ///
    /// # Errors
    ///
    /// This function will return an error if `minutes` is zero or exceeds
    /// [`SessionDuration::MAX_MINUTES`].
    pub fn from_minutes(minutes: u32) -> Result<Self, InvalidDurationError> {
        ensure!(minutes > 0, ZeroSnafu);
        ensure!(minutes <= Self::MAX_MINUTES, ExcessiveSnafu { minutes });
        Ok(Self(Duration::from_secs(u64::from(minutes) * 60)))
    }

    /// The interval as a [`Duration`].
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// The interval in seconds, as the countdown consumes it.
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl TryFrom<u32> for SessionDuration {
    type Error = InvalidDurationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

/// An error type of creating a [`SessionDuration`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidDurationError {
    #[snafu(display("Duration must be greater than zero"))]
    #[non_exhaustive]
    Zero,
    #[snafu(display(
        "Duration of {minutes} minutes exceeds the maximum of {} minutes",
        SessionDuration::MAX_MINUTES
    ))]
    #[non_exhaustive]
    Excessive { minutes: u32 },
}

/// The three configurable intervals, doubling as the keys under which the
/// duration store persists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl DurationKind {
    /// The persisted key name for this interval.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro-time",
            Self::ShortBreak => "shortbreak-time",
            Self::LongBreak => "longbreak-time",
        }
    }

    /// Look a [`DurationKind`] up by its persisted key name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pomodoro-time" => Some(Self::Pomodoro),
            "shortbreak-time" => Some(Self::ShortBreak),
            "longbreak-time" => Some(Self::LongBreak),
            _ => None,
        }
    }

    /// The built-in fallback used when the store has no value for this kind.
    pub fn default_minutes(self) -> u32 {
        match self {
            Self::Pomodoro => 25,
            Self::ShortBreak => 5,
            Self::LongBreak => 15,
        }
    }
}

impl Display for DurationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}
