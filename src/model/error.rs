use thiserror::Error;

/// Rejections raised while playing a round. None of them change game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid guess {0:?}: enter a whole number")]
    InvalidInput(String),

    /// `value` is the guess as the player wrote it.
    #[error("{value} is out of range; pick a number between {low} and {high}")]
    OutOfRange { value: String, low: i64, high: i64 },

    #[error("no hints left this round")]
    HintsExhausted,

    #[error("the round is over; start a new one")]
    RoundNotActive,
}

/// Failures persisting local state. Loading never reports these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode state: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_bounds() {
        let error = GameError::OutOfRange {
            value: "120".to_string(),
            low: 1,
            high: 100,
        };
        assert_eq!(
            error.to_string(),
            "120 is out of range; pick a number between 1 and 100"
        );
    }

    #[test]
    fn test_store_error_wraps_io() {
        let error: StoreError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(error, StoreError::Io(_)));
        assert!(error.to_string().contains("disk full"));
    }
}
