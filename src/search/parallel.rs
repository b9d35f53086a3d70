//! Root-level parallel exploration.
//!
//! Worker threads pull root replies from a shared atomic index and search
//! each on an independently cloned game, every reply under the full
//! window. Chooses the same move as sequential negamax: without a shared
//! alpha, later replies cost more nodes but every value stays exact.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::moves::Move;
use crate::options::SearchOptions;
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::weights::GameWeights;

use super::negamax::negamax_value;
use super::{Ctx, SearchResult, INFINITY};

/// Search the replies to `root` across `threads` worker threads.
///
/// Returns the same move and value as [`NegaMaxStrategy`] on the same
/// position; `nodes_considered` sums the work of all workers.
///
/// [`NegaMaxStrategy`]: super::NegaMaxStrategy
pub fn search_root_parallel(
    game: &mut dyn Searchable,
    root: &Move,
    options: &SearchOptions,
    weights: &GameWeights,
    signals: &SearchSignals,
    threads: usize,
) -> SearchResult {
    if options.look_ahead == 0 {
        return SearchResult::stand_still(root);
    }
    let mut ctx = Ctx::new(options, weights, signals);
    let moves = ctx.candidates(game, root);
    if moves.is_empty() {
        return SearchResult::stand_still(root);
    }

    let depth = options.look_ahead - 1;
    let next = AtomicUsize::new(0);
    let total_nodes = AtomicU64::new(0);
    let scored: Mutex<Vec<(usize, i32)>> = Mutex::new(Vec::with_capacity(moves.len()));
    let moves_ref = &moves;
    let scored_ref = &scored;
    let next_ref = &next;
    let total_ref = &total_nodes;

    std::thread::scope(|scope| {
        for _ in 0..threads.max(1) {
            let mut local = game.boxed_clone();
            scope.spawn(move || {
                let mut ctx = Ctx::new(options, weights, signals);
                loop {
                    let i = next_ref.fetch_add(1, Ordering::Relaxed);
                    let Some(mv) = moves_ref.as_slice().get(i) else {
                        break;
                    };
                    if ctx.should_stop() {
                        break;
                    }
                    ctx.nodes += 1;
                    local.make_move(mv);
                    let v =
                        -negamax_value(&mut ctx, local.as_mut(), mv, depth, 0, -INFINITY, INFINITY);
                    local.undo_move();
                    scored_ref.lock().push((i, v));
                }
                total_ref.fetch_add(ctx.nodes, Ordering::Relaxed);
            });
        }
    });

    let scored = scored.into_inner();
    // Earliest generated move wins ties, matching the sequential loop.
    let mut best: Option<(usize, i32)> = None;
    for (i, v) in scored {
        let replaces = match best {
            None => true,
            Some((bi, bv)) => v > bv || (v == bv && i < bi),
        };
        if replaces {
            best = Some((i, v));
        }
    }

    match best {
        Some((i, v)) => SearchResult {
            move_id: moves.as_slice()[i].id.clone(),
            value: v,
            nodes_considered: total_nodes.load(Ordering::Relaxed),
        },
        None => SearchResult::stand_still(root),
    }
}
