//! NegaScout (principal variation search).
//!
//! The first reply at each node is searched with the full window; every
//! later reply gets a null-window scout probe around alpha, re-searched
//! with the real window only when the probe proves it beats the principal
//! variation. PVS subsumes alpha-beta, so this strategy prunes regardless
//! of the `alpha_beta` option.

use crate::moves::Move;
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::weights::GameWeights;

use super::{mover_eval, Ctx, SearchResult, SearchStrategy, INFINITY};

pub struct NegaScoutStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
}

impl NegaScoutStrategy {
    #[must_use]
    pub fn new(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        NegaScoutStrategy {
            options,
            weights,
            signals,
        }
    }
}

impl SearchStrategy for NegaScoutStrategy {
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
        for (i, mv) in moves.iter().enumerate() {
            if ctx.should_stop() {
                break;
            }
            ctx.nodes += 1;
            let before = game.hash_key();
            game.make_move(mv);
            let v = if i == 0 {
                -negascout_value(&mut ctx, game, mv, depth, 0, -INFINITY, -alpha)
            } else {
                // Scout: prove the move is worse than the best so far.
                let probe =
                    -negascout_value(&mut ctx, game, mv, depth, 0, -(alpha + 1), -alpha);
                if probe > alpha {
                    -negascout_value(&mut ctx, game, mv, depth, 0, -INFINITY, -probe)
                } else {
                    probe
                }
            };
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
        StrategyKind::NegaScout
    }
}

/// Fail-soft principal variation value of the position after `last`, seen
/// by the player to move there.
pub(crate) fn negascout_value(
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

    let mut best = if extending { mover_eval(last) } else { -INFINITY };
    let mut searched = false;
    for (i, mv) in moves.iter().enumerate() {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        game.make_move(mv);
        let v = if i == 0 {
            -negascout_value(ctx, game, mv, next_depth, next_qdepth, -beta, -alpha)
        } else {
            let probe =
                -negascout_value(ctx, game, mv, next_depth, next_qdepth, -(alpha + 1), -alpha);
            if probe > alpha && probe < beta {
                -negascout_value(ctx, game, mv, next_depth, next_qdepth, -beta, -probe)
            } else {
                probe
            }
        };
        game.undo_move();
        searched = true;
        best = best.max(v);
        alpha = alpha.max(v);
        if alpha >= beta {
            break;
        }
    }
    if !searched && !extending {
        return mover_eval(last);
    }
    best
}
