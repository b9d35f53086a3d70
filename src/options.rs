//! Search configuration surface.

use std::fmt;
use std::str::FromStr;

use crate::error::OptionsError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of available search strategies.
///
/// Kept as a plain tag so callers can configure a strategy by name; the
/// [`create_strategy`](crate::create_strategy) factory maps a tag to a
/// constructed strategy value with an exhaustive match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrategyKind {
    MiniMax,
    NegaMax,
    NegaMaxMemory,
    NegaScout,
    NegaScoutMemory,
    MtdNegaMax,
    MtdNegaScout,
    Uct,
}

impl StrategyKind {
    /// All kinds, in a stable order. Handy for exercising the whole family
    /// in tests and benchmarks.
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::MiniMax,
        StrategyKind::NegaMax,
        StrategyKind::NegaMaxMemory,
        StrategyKind::NegaScout,
        StrategyKind::NegaScoutMemory,
        StrategyKind::MtdNegaMax,
        StrategyKind::MtdNegaScout,
        StrategyKind::Uct,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::MiniMax => "minimax",
            StrategyKind::NegaMax => "negamax",
            StrategyKind::NegaMaxMemory => "negamax-memory",
            StrategyKind::NegaScout => "negascout",
            StrategyKind::NegaScoutMemory => "negascout-memory",
            StrategyKind::MtdNegaMax => "mtd-negamax",
            StrategyKind::MtdNegaScout => "mtd-negascout",
            StrategyKind::Uct => "uct",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown strategy kind '{s}'"))
    }
}

/// Configuration for UCT monte-carlo search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloOptions {
    /// Number of simulated playouts per search.
    pub max_simulations: u32,
    /// Ratio of exploration to exploitation in the UCB selection policy.
    pub explore_exploit_ratio: f64,
    /// How many plies a random playout runs before the position is scored.
    pub playout_look_ahead: u32,
    /// Seed for the per-search random generator. A fixed seed makes the
    /// search fully reproducible.
    pub seed: u64,
}

impl Default for MonteCarloOptions {
    fn default() -> Self {
        MonteCarloOptions {
            max_simulations: 1000,
            explore_exploit_ratio: 1.0,
            playout_look_ahead: 20,
            seed: 0,
        }
    }
}

/// Options consumed by every strategy.
///
/// Built with [`SearchOptions::new`] plus `with_*` builders; the fallible
/// builders reject invalid values synchronously so a strategy never has to
/// validate mid-search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOptions {
    /// Ply depth to search before static evaluation takes over.
    /// Zero means "evaluate the root only" — a defined case, not an error.
    pub look_ahead: u32,
    /// Enable alpha-beta pruning for minimax/negamax. Never changes the
    /// chosen move or value, only the number of nodes considered.
    pub alpha_beta: bool,
    /// Extend past the look-ahead horizon while the position is unstable.
    pub quiescence: bool,
    /// Percentage of the best generated moves to keep at each node, in
    /// `[1, 100]`. 100 keeps everything.
    pub percentage_best_moves: u32,
    /// Which strategy the factory should build.
    pub strategy: StrategyKind,
    /// UCT configuration; ignored by the brute-force strategies.
    pub monte_carlo: MonteCarloOptions,
}

impl SearchOptions {
    #[must_use]
    pub fn new(strategy: StrategyKind) -> Self {
        SearchOptions {
            look_ahead: 3,
            alpha_beta: true,
            quiescence: false,
            percentage_best_moves: 100,
            strategy,
            monte_carlo: MonteCarloOptions::default(),
        }
    }

    #[must_use]
    pub fn with_look_ahead(mut self, look_ahead: u32) -> Self {
        self.look_ahead = look_ahead;
        self
    }

    #[must_use]
    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    #[must_use]
    pub fn with_quiescence(mut self, quiescence: bool) -> Self {
        self.quiescence = quiescence;
        self
    }

    /// Set the percentage of best moves to explore. Values outside
    /// `[1, 100]` are rejected here, at configuration time.
    pub fn with_percentage_best_moves(mut self, percentage: u32) -> Result<Self, OptionsError> {
        if !(1..=100).contains(&percentage) {
            return Err(OptionsError::PercentageOutOfRange { found: percentage });
        }
        self.percentage_best_moves = percentage;
        Ok(self)
    }

    /// Replace the monte-carlo configuration, validating it.
    pub fn with_monte_carlo(mut self, monte_carlo: MonteCarloOptions) -> Result<Self, OptionsError> {
        if monte_carlo.max_simulations == 0 {
            return Err(OptionsError::ZeroSimulations);
        }
        if monte_carlo.playout_look_ahead == 0 {
            return Err(OptionsError::ZeroPlayoutLookAhead);
        }
        self.monte_carlo = monte_carlo;
        Ok(self)
    }

    /// Check every invariant the builders enforce. Useful when options come
    /// from deserialized configuration rather than the builder API.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(1..=100).contains(&self.percentage_best_moves) {
            return Err(OptionsError::PercentageOutOfRange {
                found: self.percentage_best_moves,
            });
        }
        if self.monte_carlo.max_simulations == 0 {
            return Err(OptionsError::ZeroSimulations);
        }
        if self.monte_carlo.playout_look_ahead == 0 {
            return Err(OptionsError::ZeroPlayoutLookAhead);
        }
        Ok(())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions::new(StrategyKind::NegaScout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_percentage() {
        let err = SearchOptions::new(StrategyKind::MiniMax)
            .with_percentage_best_moves(0)
            .unwrap_err();
        assert_eq!(err, OptionsError::PercentageOutOfRange { found: 0 });
    }

    #[test]
    fn rejects_over_100_percentage() {
        let err = SearchOptions::new(StrategyKind::MiniMax)
            .with_percentage_best_moves(101)
            .unwrap_err();
        assert_eq!(err, OptionsError::PercentageOutOfRange { found: 101 });
    }

    #[test]
    fn accepts_boundary_percentages() {
        for pct in [1, 50, 100] {
            let opts = SearchOptions::new(StrategyKind::NegaMax)
                .with_percentage_best_moves(pct)
                .unwrap();
            assert_eq!(opts.percentage_best_moves, pct);
        }
    }

    #[test]
    fn rejects_zero_simulations() {
        let mc = MonteCarloOptions {
            max_simulations: 0,
            ..MonteCarloOptions::default()
        };
        let err = SearchOptions::new(StrategyKind::Uct)
            .with_monte_carlo(mc)
            .unwrap_err();
        assert_eq!(err, OptionsError::ZeroSimulations);
    }

    #[test]
    fn validate_catches_deserialized_garbage() {
        let mut opts = SearchOptions::default();
        opts.percentage_best_moves = 250;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn strategy_kind_round_trips_through_str() {
        for kind in StrategyKind::ALL {
            let parsed: StrategyKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("alpha-zero".parse::<StrategyKind>().is_err());
    }
}
