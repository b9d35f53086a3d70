//! The strategy family and its shared plumbing.
//!
//! Every strategy implements [`SearchStrategy`] against the same
//! [`Searchable`] contract; [`create_strategy`] maps a
//! [`StrategyKind`](crate::StrategyKind) tag to a boxed strategy and
//! [`search`] is the one-call entry point game controllers use.

use std::time::Instant;

use crate::moves::{Move, MoveList};
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::{InterruptFlag, SearchSignals};
use crate::weights::GameWeights;

pub mod memory;
pub mod minimax;
pub mod mtdf;
pub mod negamax;
pub mod negascout;
pub mod parallel;
pub mod uct;


pub use memory::{NegaMaxMemoryStrategy, NegaScoutMemoryStrategy};
pub use minimax::MiniMaxStrategy;
pub use mtdf::MtdStrategy;
pub use negamax::NegaMaxStrategy;
pub use negascout::NegaScoutStrategy;
pub use parallel::search_root_parallel;
pub use uct::UctStrategy;

/// Sentinel value larger than any worth a game can produce.
pub const INFINITY: i32 = 1_000_000_000;

/// Cap on plies searched past the nominal horizon while a position stays
/// unstable.
pub const MAX_QUIESCENT_DEPTH: u32 = 4;

/// Safety cap on MTD(f) refinement probes.
pub const MTD_MAX_ITERATIONS: u32 = 32;

/// Outcome of one search: the chosen reply to the root move, its propagated
/// value, and how many candidate moves were examined along the way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub move_id: String,
    pub value: i32,
    pub nodes_considered: u64,
}

impl SearchResult {
    /// Result for the defined terminal cases (zero look-ahead, no legal
    /// replies): the root itself with its raw static worth.
    #[must_use]
    pub fn stand_still(root: &Move) -> Self {
        SearchResult {
            move_id: root.id.clone(),
            value: root.worth,
            nodes_considered: 0,
        }
    }
}

/// One interchangeable search algorithm.
///
/// `root` is the move that produced the current position (already applied
/// to `game`); the strategy picks among its replies. The strategy borrows
/// the game exclusively and must leave it in the state it found it.
pub trait SearchStrategy: Send {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult;

    fn kind(&self) -> StrategyKind;
}

/// Per-search bookkeeping threaded through the recursion.
pub(crate) struct Ctx<'a> {
    pub options: &'a SearchOptions,
    pub weights: &'a GameWeights,
    pub signals: &'a SearchSignals,
    pub nodes: u64,
    pub stopped: bool,
}

impl<'a> Ctx<'a> {
    pub fn new(
        options: &'a SearchOptions,
        weights: &'a GameWeights,
        signals: &'a SearchSignals,
    ) -> Self {
        Ctx {
            options,
            weights,
            signals,
            nodes: 0,
            stopped: false,
        }
    }

    /// Poll the cancellation signals. Once true it stays true, so every
    /// loop up the call stack unwinds with its best-so-far value.
    pub fn should_stop(&mut self) -> bool {
        if !self.stopped && self.signals.should_stop(self.nodes) {
            self.stopped = true;
        }
        self.stopped
    }

    /// Generate (and, below 100%, trim) the candidate replies to `last`.
    pub fn candidates(&mut self, game: &mut dyn Searchable, last: &Move) -> MoveList {
        let mover_p1 = !last.player1;
        let mut moves = game.generate_moves(last, self.weights, mover_p1);
        if self.options.percentage_best_moves < 100 {
            moves.retain_best_fraction(self.options.percentage_best_moves, mover_p1);
        }
        moves
    }

    /// True when the horizon should be pushed one ply further because the
    /// position after `last` is still unstable.
    pub fn may_extend(&self, game: &dyn Searchable, last: &Move, qdepth: u32) -> bool {
        self.options.quiescence && qdepth < MAX_QUIESCENT_DEPTH && !game.is_quiescent(last)
    }
}

/// Static worth of the position after `last`, seen by the player to move.
/// Worths are stored from player 1's perspective; the player to move is the
/// opponent of whoever made `last`.
#[inline]
pub(crate) fn mover_eval(last: &Move) -> i32 {
    if last.player1 {
        -last.worth
    } else {
        last.worth
    }
}

/// Build the strategy `options.strategy` names.
#[must_use]
pub fn create_strategy(
    options: &SearchOptions,
    weights: &GameWeights,
    signals: SearchSignals,
) -> Box<dyn SearchStrategy> {
    let options = options.clone();
    let weights = weights.clone();
    match options.strategy {
        StrategyKind::MiniMax => Box::new(MiniMaxStrategy::new(options, weights, signals)),
        StrategyKind::NegaMax => Box::new(NegaMaxStrategy::new(options, weights, signals)),
        StrategyKind::NegaMaxMemory => {
            Box::new(NegaMaxMemoryStrategy::new(options, weights, signals))
        }
        StrategyKind::NegaScout => Box::new(NegaScoutStrategy::new(options, weights, signals)),
        StrategyKind::NegaScoutMemory => {
            Box::new(NegaScoutMemoryStrategy::new(options, weights, signals))
        }
        StrategyKind::MtdNegaMax => Box::new(MtdStrategy::negamax(options, weights, signals)),
        StrategyKind::MtdNegaScout => Box::new(MtdStrategy::negascout(options, weights, signals)),
        StrategyKind::Uct => Box::new(UctStrategy::new(options, weights, signals)),
    }
}

/// Search for the best reply to `root` using the configured strategy.
///
/// `root` is the last move applied to `game`. An elapsed `deadline` makes
/// the strategy return its best partial result instead of failing.
pub fn search(
    game: &mut dyn Searchable,
    root: &Move,
    options: &SearchOptions,
    weights: &GameWeights,
    deadline: Option<Instant>,
) -> SearchResult {
    let signals = SearchSignals {
        interrupt: InterruptFlag::new(),
        deadline,
    };
    let mut strategy = create_strategy(options, weights, signals);
    log::debug!(
        "{} search from {root}, look_ahead {}",
        options.strategy,
        options.look_ahead
    );
    let result = strategy.search(game, root);
    log::debug!(
        "{} chose {} value {} after {} nodes",
        options.strategy,
        result.move_id,
        result.value,
        result.nodes_considered
    );
    result
}
