use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::DurationKind;

/// An abstract interface over the persisted store of configured interval
/// lengths.
///
/// Values are whole minutes; an absent key means the built-in default
/// applies. Writes follow last-write-wins semantics with no transactional
/// guarantees.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DurationRepository: Send + Sync + 'static {
    /// Get the stored minutes for `kind`, or `None` if never configured.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store cannot be read.
    async fn minutes(&self, kind: DurationKind) -> Result<Option<u32>, GetDurationError>;

    /// Persist `minutes` for `kind`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store cannot be written.
    async fn set_minutes(&self, kind: DurationKind, minutes: u32) -> Result<(), StoreDurationError>;
}

/// An error type of reading from the duration store.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetDurationError {
    #[snafu(whatever, display("Could not load duration: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// An error type of writing to the duration store.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum StoreDurationError {
    #[snafu(whatever, display("Could not store duration: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duration_repository_mock_round_trip() {
        let mut mock = MockDurationRepository::new();
        mock.expect_minutes()
            .returning(|kind| match kind {
                DurationKind::Pomodoro => Ok(Some(30)),
                _ => Ok(None),
            });
        mock.expect_set_minutes().returning(|_, _| Ok(()));

        assert_eq!(mock.minutes(DurationKind::Pomodoro).await.unwrap(), Some(30));
        assert_eq!(mock.minutes(DurationKind::LongBreak).await.unwrap(), None);
        assert!(mock.set_minutes(DurationKind::Pomodoro, 45).await.is_ok());
    }
}
