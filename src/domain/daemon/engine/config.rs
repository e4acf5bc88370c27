use snafu::prelude::*;

use crate::domain::entity::duration::InvalidDurationError;
use crate::domain::entity::{DurationKind, SessionDuration};
use crate::domain::repository::duration::{DurationRepository, GetDurationError};

/// The three interval lengths the engine runs with.
///
/// Derived from the duration store at startup and re-derived in full after
/// every accepted duration update; immutable in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub pomodoro: SessionDuration,
    pub short_break: SessionDuration,
    pub long_break: SessionDuration,
}

impl SessionConfig {
    /// Derive a configuration by reading all three kinds from the store,
    /// falling back to the built-in default wherever a kind was never
    /// configured.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store cannot be read or
    /// holds an out-of-range value.
    pub async fn load(
        repository: &dyn DurationRepository,
    ) -> Result<Self, LoadSessionConfigError> {
        Ok(Self {
            pomodoro: Self::resolve(repository, DurationKind::Pomodoro).await?,
            short_break: Self::resolve(repository, DurationKind::ShortBreak).await?,
            long_break: Self::resolve(repository, DurationKind::LongBreak).await?,
        })
    }

    async fn resolve(
        repository: &dyn DurationRepository,
        kind: DurationKind,
    ) -> Result<SessionDuration, LoadSessionConfigError> {
        let stored = repository.minutes(kind).await.context(StoreSnafu { kind })?;
        let minutes = stored.unwrap_or_else(|| kind.default_minutes());
        SessionDuration::from_minutes(minutes).context(InvalidSnafu { kind })
    }

    /// The duration of the break that follows a finished pomodoro.
    pub fn break_duration(&self, long: bool) -> &SessionDuration {
        if long {
            &self.long_break
        } else {
            &self.short_break
        }
    }
}

/// An error type of deriving a [`SessionConfig`] from the duration store.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LoadSessionConfigError {
    #[snafu(display("Could not read {kind} from the duration store"))]
    Store {
        kind: DurationKind,
        source: GetDurationError,
    },
    #[snafu(display("Stored value for {kind} is out of range"))]
    Invalid {
        kind: DurationKind,
        source: InvalidDurationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::repository::duration::MockDurationRepository;

    #[tokio::test]
    async fn load_falls_back_to_defaults() {
        let mut repository = MockDurationRepository::new();
        repository.expect_minutes().returning(|_| Ok(None));

        let config = SessionConfig::load(&repository).await.unwrap();
        assert_eq!(config.pomodoro, SessionDuration::from_minutes(25).unwrap());
        assert_eq!(
            config.short_break,
            SessionDuration::from_minutes(5).unwrap(),
        );
        assert_eq!(
            config.long_break,
            SessionDuration::from_minutes(15).unwrap(),
        );
    }

    #[tokio::test]
    async fn load_prefers_stored_values() {
        let mut repository = MockDurationRepository::new();
        repository.expect_minutes().returning(|kind| match kind {
            DurationKind::Pomodoro => Ok(Some(50)),
            DurationKind::ShortBreak => Ok(Some(10)),
            DurationKind::LongBreak => Ok(None),
        });

        let config = SessionConfig::load(&repository).await.unwrap();
        assert_eq!(config.pomodoro, SessionDuration::from_minutes(50).unwrap());
        assert_eq!(
            config.short_break,
            SessionDuration::from_minutes(10).unwrap(),
        );
        assert_eq!(
            config.long_break,
            SessionDuration::from_minutes(15).unwrap(),
        );
    }

    #[tokio::test]
    async fn load_rejects_out_of_range_values() {
        let mut repository = MockDurationRepository::new();
        repository.expect_minutes().returning(|kind| match kind {
            DurationKind::Pomodoro => Ok(Some(0)),
            _ => Ok(None),
        });

        assert!(matches!(
            SessionConfig::load(&repository).await,
            Err(LoadSessionConfigError::Invalid {
                kind: DurationKind::Pomodoro,
                ..
            }),
        ));
    }

    #[tokio::test]
    async fn load_propagates_store_errors() {
        let mut repository = MockDurationRepository::new();
        repository
            .expect_minutes()
            .returning(|_| snafu::whatever!("store unavailable"));

        assert!(matches!(
            SessionConfig::load(&repository).await,
            Err(LoadSessionConfigError::Store { .. }),
        ));
    }

    #[test]
    fn break_duration_selects_by_cycle() {
        let config = SessionConfig {
            pomodoro: SessionDuration::from_minutes(25).unwrap(),
            short_break: SessionDuration::from_minutes(5).unwrap(),
            long_break: SessionDuration::from_minutes(15).unwrap(),
        };
        assert_eq!(config.break_duration(false), &config.short_break);
        assert_eq!(config.break_duration(true), &config.long_break);
    }
}
