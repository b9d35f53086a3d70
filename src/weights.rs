//! Opaque heuristic weight vector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable parameters for the game's evaluation heuristic.
///
/// The search engine never interprets the contents; it only forwards the
/// vector to [`Searchable::generate_moves`](crate::Searchable::generate_moves)
/// so the game can score candidate moves.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameWeights(Vec<f64>);

impl GameWeights {
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        GameWeights(weights)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for GameWeights {
    fn from(weights: Vec<f64>) -> Self {
        GameWeights(weights)
    }
}
