//! Engine error type.
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by [`crate::Game`] operations.
///
/// Only [`GameError::InvalidChoice`] is recoverable: the turn is rejected
/// without touching game state and play continues. Everything else means the
/// game cannot proceed.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("game not started, call start() first")]
    NotStarted,
    #[error("game over, no further turns are possible")]
    GameOver,
    #[error("home airport {icao} not found in catalog")]
    HomeAirportMissing { icao: String },
    #[error("invalid option number {index} (choose 1-{available})")]
    InvalidChoice { index: usize, available: usize },
    #[error("airport catalog unavailable")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError {
    /// Whether the caller may keep playing after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidChoice { .. })
    }

    pub(crate) fn catalog<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Catalog(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invalid_choice_is_recoverable() {
        assert!(
            GameError::InvalidChoice {
                index: 9,
                available: 5
            }
            .is_recoverable()
        );
        assert!(!GameError::NotStarted.is_recoverable());
        assert!(!GameError::GameOver.is_recoverable());
        assert!(
            !GameError::HomeAirportMissing {
                icao: "EFHK".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let err = GameError::InvalidChoice {
            index: 0,
            available: 5,
        };
        assert_eq!(err.to_string(), "invalid option number 0 (choose 1-5)");
        let err = GameError::HomeAirportMissing {
            icao: "EFHK".into(),
        };
        assert!(err.to_string().contains("EFHK"));
    }
}
