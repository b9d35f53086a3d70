//! MTD(f): iterative refinement with null-window probes.
//!
//! Each probe is a memory search with a window of width one; a probe that
//! fails high raises the lower bound on the true value, one that fails low
//! drops the upper bound. The bounds converge on the minimax value because
//! every probe's work is kept in one transposition table shared across the
//! whole refinement. The chosen move comes from the final probe.

use std::sync::Arc;

use crate::moves::Move;
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::tt::TranspositionTable;
use crate::weights::GameWeights;

use super::memory::{root_negamax, root_negascout};
use super::{Ctx, SearchResult, SearchStrategy, INFINITY, MTD_MAX_ITERATIONS};

pub struct MtdStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
    table: Arc<TranspositionTable>,
    kind: StrategyKind,
}

impl MtdStrategy {
    /// MTD(f) probing with memory negamax.
    #[must_use]
    pub fn negamax(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        MtdStrategy {
            options,
            weights,
            signals,
            table: Arc::new(TranspositionTable::new()),
            kind: StrategyKind::MtdNegaMax,
        }
    }

    /// MTD(f) probing with memory negascout.
    #[must_use]
    pub fn negascout(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        MtdStrategy {
            options,
            weights,
            signals,
            table: Arc::new(TranspositionTable::new()),
            kind: StrategyKind::MtdNegaScout,
        }
    }
}

impl SearchStrategy for MtdStrategy {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult {
        if self.options.look_ahead == 0 {
            return SearchResult::stand_still(root);
        }
        let mut ctx = Ctx::new(&self.options, &self.weights, &self.signals);

        // First guess 0; a previous iteration's value would do as well.
        let mut guess = 0;
        let mut lower = -INFINITY;
        let mut upper = INFINITY;
        let mut best_id: Option<String> = None;
        for iteration in 0..MTD_MAX_ITERATIONS {
            let beta = if guess == lower { guess + 1 } else { guess };
            let (id, value) = match self.kind {
                StrategyKind::MtdNegaScout => {
                    root_negascout(&mut ctx, &self.table, game, root, beta - 1, beta)
                }
                _ => root_negamax(&mut ctx, &self.table, game, root, beta - 1, beta),
            };
            let Some(id) = id else {
                // Nothing searched: no legal replies on the first probe, or
                // cancellation before a later probe got going.
                break;
            };
            best_id = Some(id);
            guess = value;
            if value < beta {
                upper = value;
            } else {
                lower = value;
            }
            log::debug!(
                "mtd iteration {iteration}: probed {beta}, bounds [{lower}, {upper}]"
            );
            if lower >= upper || ctx.stopped {
                break;
            }
        }

        match best_id {
            Some(id) => SearchResult {
                move_id: id,
                value: guess,
                nodes_considered: ctx.nodes,
            },
            None => SearchResult::stand_still(root),
        }
    }

    fn kind(&self) -> StrategyKind {
        self.kind
    }
}
