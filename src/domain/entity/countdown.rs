use std::time::Duration;

use crate::domain::entity::duration::SessionDuration;

/// Interval between two display refreshes, in seconds.
const REFRESH_PERIOD: f64 = 1.0;

/// A running countdown and the sub-second accumulator that paces its display
/// refreshes.
///
/// The countdown itself advances with whatever time deltas the caller feeds
/// in; the accumulator quantizes observable display updates to one per
/// second, independent of the tick rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    remaining: f64,
    refresh: f64,
}

/// Outcome of advancing a [`Countdown`] by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// The countdown reached zero on this tick. No display refresh is due;
    /// the finish supersedes it.
    Finished,
    /// A display refresh is due.
    Refresh,
    /// Nothing observable happened.
    Silent,
}

impl Countdown {
    /// Start a countdown over the full given interval.
    pub fn new(duration: &SessionDuration) -> Self {
        Self {
            remaining: duration.as_secs_f64(),
            refresh: REFRESH_PERIOD,
        }
    }

    /// Advance by `dt` seconds of elapsed time.
    pub fn advance(&mut self, dt: f64) -> CountdownStep {
        self.remaining -= dt;
        self.refresh -= dt;

        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return CountdownStep::Finished;
        }

        if self.refresh <= 0.0 {
            self.refresh = REFRESH_PERIOD;
            return CountdownStep::Refresh;
        }

        CountdownStep::Silent
    }

    /// Remaining time, never negative.
    pub fn remaining(&self) -> Duration {
        Duration::from_secs_f64(self.remaining)
    }

    /// The remaining time rendered as a zero-padded `MM:SS` clock.
    pub fn clock(&self) -> String {
        let total = self.remaining.max(0.0) as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(m: u32) -> SessionDuration {
        SessionDuration::from_minutes(m).unwrap()
    }

    #[test]
    fn clock_formats_two_digit_fields() {
        let mut countdown = Countdown::new(&minutes(3));
        countdown.remaining = 125.0;
        assert_eq!(countdown.clock(), "02:05");
        countdown.remaining = 3599.0;
        assert_eq!(countdown.clock(), "59:59");
        countdown.remaining = 0.0;
        assert_eq!(countdown.clock(), "00:00");
    }

    #[test]
    fn refresh_fires_once_per_second() {
        let mut countdown = Countdown::new(&minutes(1));
        let mut refreshes = 0;

        // 0.25 s ticks for 10 seconds: one refresh per elapsed second.
        for _ in 0..40 {
            if countdown.advance(0.25) == CountdownStep::Refresh {
                refreshes += 1;
            }
        }

        assert_eq!(refreshes, 10);
    }

    #[test]
    fn finish_supersedes_refresh() {
        let mut countdown = Countdown::new(&minutes(1));
        for _ in 0..59 {
            countdown.advance(1.0);
        }
        assert_eq!(countdown.clock(), "00:01");
        assert_eq!(countdown.advance(1.0), CountdownStep::Finished);
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[test]
    fn finish_under_uneven_partition() {
        let mut countdown = Countdown::new(&minutes(1));
        let mut finished = 0;
        let mut elapsed = 0.0;

        while elapsed < 60.0 {
            if countdown.advance(0.7) == CountdownStep::Finished {
                finished += 1;
            }
            elapsed += 0.7;
        }

        assert_eq!(finished, 1);
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[test]
    fn remaining_never_negative() {
        let mut countdown = Countdown::new(&minutes(1));
        for _ in 0..100 {
            countdown.advance(1.5);
            assert!(countdown.remaining() >= Duration::ZERO);
            assert!(!countdown.clock().starts_with('-'));
        }
    }
}
