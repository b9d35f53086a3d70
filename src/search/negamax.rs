//! Negamax with optional alpha-beta pruning.
//!
//! The symmetric formulation of minimax: every value is seen by the player
//! to move, and one negation per ply replaces the max/min alternation. The
//! reported root value is from the perspective of the player choosing among
//! the replies, which is exactly the negation of what [`MiniMaxStrategy`]
//! reports on the same tree.
//!
//! [`MiniMaxStrategy`]: super::MiniMaxStrategy

use crate::moves::Move;
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::weights::GameWeights;

use super::{mover_eval, Ctx, SearchResult, SearchStrategy, INFINITY};

pub struct NegaMaxStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
}

impl NegaMaxStrategy {
    #[must_use]
    pub fn new(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        NegaMaxStrategy {
            options,
            weights,
            signals,
        }
    }
}

impl SearchStrategy for NegaMaxStrategy {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult {
        if self.options.look_ahead == 0 {
            return SearchResult::stand_still(root);
        }
        let mut ctx = Ctx::new(&self.options, &self.weights, &self.signals);
        let moves = ctx.candidates(game, root);
        if moves.is_empty() {
            return SearchResult::stand_still(root);
        }

        let depth = self.options.look_ahead - 1;
        let mut alpha = -INFINITY;
        let mut best = -INFINITY;
        let mut best_id: Option<&str> = None;
        for mv in &moves {
            if ctx.should_stop() {
                break;
            }
            ctx.nodes += 1;
            let before = game.hash_key();
            game.make_move(mv);
            let v = -negamax_value(&mut ctx, game, mv, depth, 0, -INFINITY, -alpha);
            game.undo_move();
            debug_assert_eq!(game.hash_key(), before);
            if best_id.is_none() || v > best {
                best = v;
                best_id = Some(mv.id.as_str());
            }
            alpha = alpha.max(v);
        }

        match best_id {
            Some(id) => SearchResult {
                move_id: id.to_string(),
                value: best,
                nodes_considered: ctx.nodes,
            },
            None => SearchResult::stand_still(root),
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::NegaMax
    }
}

/// Fail-soft negamax value of the position after `last`, seen by the player
/// to move there.
pub(crate) fn negamax_value(
    ctx: &mut Ctx<'_>,
    game: &mut dyn Searchable,
    last: &Move,
    depth: u32,
    qdepth: u32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    let (next_depth, next_qdepth) = if depth > 0 {
        (depth - 1, qdepth)
    } else if ctx.may_extend(game, last, qdepth) {
        (0, qdepth + 1)
    } else {
        return mover_eval(last);
    };
    let extending = depth == 0;

    let moves = ctx.candidates(game, last);
    if moves.is_empty() {
        return mover_eval(last);
    }

    // Stand-pat floor while extending past the horizon.
    let mut best = if extending { mover_eval(last) } else { -INFINITY };
    let mut searched = false;
    for mv in &moves {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        game.make_move(mv);
        let v = -negamax_value(ctx, game, mv, next_depth, next_qdepth, -beta, -alpha);
        game.undo_move();
        searched = true;
        best = best.max(v);
        alpha = alpha.max(v);
        if ctx.options.alpha_beta && alpha >= beta {
            break;
        }
    }
    if !searched && !extending {
        return mover_eval(last);
    }
    best
}
