//! Error types for search configuration.

use std::fmt;

/// Error type for invalid [`SearchOptions`](crate::SearchOptions) values.
///
/// Configuration mistakes are rejected when the options are built, never
/// discovered mid-search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// `percentage_best_moves` must lie in `[1, 100]`
    PercentageOutOfRange { found: u32 },
    /// UCT needs at least one simulation
    ZeroSimulations,
    /// UCT playout look-ahead must be positive
    ZeroPlayoutLookAhead,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::PercentageOutOfRange { found } => {
                write!(f, "percentage_best_moves must be in [1, 100], found {found}")
            }
            OptionsError::ZeroSimulations => {
                write!(f, "monte-carlo search needs at least one simulation")
            }
            OptionsError::ZeroPlayoutLookAhead => {
                write!(f, "monte-carlo playout look-ahead must be positive")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_error_mentions_bounds() {
        let err = OptionsError::PercentageOutOfRange { found: 150 };
        assert!(err.to_string().contains("150"));
        assert!(err.to_string().contains("[1, 100]"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = OptionsError::PercentageOutOfRange { found: 0 };
        let err2 = OptionsError::PercentageOutOfRange { found: 0 };
        assert_eq!(err1, err2);
        assert_ne!(err1, OptionsError::ZeroSimulations);
    }

    #[test]
    fn test_error_clone() {
        let err = OptionsError::ZeroSimulations;
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
