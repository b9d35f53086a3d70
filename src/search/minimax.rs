//! Plain minimax with optional alpha-beta pruning.
//!
//! Values propagate from player 1's fixed perspective: the mover at each
//! level maximizes (player 1) or minimizes (player 2) and no sign flip
//! happens during propagation. The reported value is converted once at the
//! surface to the perspective of the player who made the root move.

use crate::moves::Move;
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::weights::GameWeights;

use super::{Ctx, SearchResult, SearchStrategy, INFINITY};

pub struct MiniMaxStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
}

impl MiniMaxStrategy {
    #[must_use]
    pub fn new(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        MiniMaxStrategy {
            options,
            weights,
            signals,
        }
    }
}

impl SearchStrategy for MiniMaxStrategy {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult {
        if self.options.look_ahead == 0 {
            return SearchResult::stand_still(root);
        }
        let mut ctx = Ctx::new(&self.options, &self.weights, &self.signals);
        let moves = ctx.candidates(game, root);
        if moves.is_empty() {
            return SearchResult::stand_still(root);
        }

        // The chooser among the replies is the opponent of the root mover.
        let maximizing = !root.player1;
        let depth = self.options.look_ahead - 1;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best_value = if maximizing { -INFINITY } else { INFINITY };
        let mut best_id: Option<&str> = None;
        for mv in &moves {
            if ctx.should_stop() {
                break;
            }
            ctx.nodes += 1;
            let before = game.hash_key();
            game.make_move(mv);
            let v = minimax_value(&mut ctx, game, mv, depth, 0, alpha, beta);
            game.undo_move();
            debug_assert_eq!(game.hash_key(), before);
            let improves = if maximizing {
                v > best_value
            } else {
                v < best_value
            };
            if best_id.is_none() || improves {
                best_value = v;
                best_id = Some(mv.id.as_str());
            }
            if self.options.alpha_beta {
                if maximizing {
                    alpha = alpha.max(v);
                } else {
                    beta = beta.min(v);
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        match best_id {
            Some(id) => SearchResult {
                move_id: id.to_string(),
                // Report from the root mover's point of view.
                value: if root.player1 { best_value } else { -best_value },
                nodes_considered: ctx.nodes,
            },
            None => SearchResult::stand_still(root),
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::MiniMax
    }
}

/// Value of the position after `last`, from player 1's perspective.
/// `depth` plies remain; `qdepth` counts plies already spent past the
/// nominal horizon on quiescence extension.
fn minimax_value(
    ctx: &mut Ctx<'_>,
    game: &mut dyn Searchable,
    last: &Move,
    depth: u32,
    qdepth: u32,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let (next_depth, next_qdepth) = if depth > 0 {
        (depth - 1, qdepth)
    } else if ctx.may_extend(game, last, qdepth) {
        (0, qdepth + 1)
    } else {
        return last.worth;
    };
    let extending = depth == 0;

    let moves = ctx.candidates(game, last);
    if moves.is_empty() {
        return last.worth;
    }

    let maximizing = !last.player1;
    // Past the horizon the mover may stand pat on the static worth.
    let mut best = if extending {
        last.worth
    } else if maximizing {
        -INFINITY
    } else {
        INFINITY
    };
    let mut searched = false;
    for mv in &moves {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        game.make_move(mv);
        let v = minimax_value(ctx, game, mv, next_depth, next_qdepth, alpha, beta);
        game.undo_move();
        searched = true;
        best = if maximizing { best.max(v) } else { best.min(v) };
        if ctx.options.alpha_beta {
            if maximizing {
                alpha = alpha.max(v);
            } else {
                beta = beta.min(v);
            }
            if alpha >= beta {
                break;
            }
        }
    }
    if !searched && !extending {
        // Cancelled before any child was explored.
        return last.worth;
    }
    best
}
