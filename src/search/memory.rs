//! Memory-augmented search: negamax and negascout over a transposition
//! table.
//!
//! Before a node is expanded the table is probed for bounds proved by an
//! earlier visit at equal or greater depth; exact entries and bound
//! cutoffs answer immediately, otherwise the window is tightened. After
//! expansion the fail-soft result is classified against the search window
//! and stored. Bounds live in the side-to-move perspective of the position
//! they describe, which is what lets transposed move orders share entries.
//!
//! Pruning is intrinsic here (window tightening is the point of the
//! table), so the `alpha_beta` option is ignored like in plain NegaScout.

use std::sync::Arc;

use crate::moves::Move;
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::tt::{TranspositionTable, TtEntry, MIN_STORE_DEPTH};
use crate::weights::GameWeights;

use super::{mover_eval, Ctx, SearchResult, SearchStrategy, INFINITY};

pub struct NegaMaxMemoryStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
    table: Arc<TranspositionTable>,
}

impl NegaMaxMemoryStrategy {
    #[must_use]
    pub fn new(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        NegaMaxMemoryStrategy {
            options,
            weights,
            signals,
            table: Arc::new(TranspositionTable::new()),
        }
    }

    /// Share a caller-owned table instead of a fresh one (MTD(f) keeps a
    /// single table warm across all of its probes).
    #[must_use]
    pub fn with_table(mut self, table: Arc<TranspositionTable>) -> Self {
        self.table = table;
        self
    }
}

impl SearchStrategy for NegaMaxMemoryStrategy {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult {
        if self.options.look_ahead == 0 {
            return SearchResult::stand_still(root);
        }
        let mut ctx = Ctx::new(&self.options, &self.weights, &self.signals);
        let (best_id, best) =
            root_negamax(&mut ctx, &self.table, game, root, -INFINITY, INFINITY);
        log_table_traffic("negamax-memory", &self.table);
        match best_id {
            Some(id) => SearchResult {
                move_id: id,
                value: best,
                nodes_considered: ctx.nodes,
            },
            None => SearchResult::stand_still(root),
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::NegaMaxMemory
    }
}

pub struct NegaScoutMemoryStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
    table: Arc<TranspositionTable>,
}

impl NegaScoutMemoryStrategy {
    #[must_use]
    pub fn new(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        NegaScoutMemoryStrategy {
            options,
            weights,
            signals,
            table: Arc::new(TranspositionTable::new()),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: Arc<TranspositionTable>) -> Self {
        self.table = table;
        self
    }
}

impl SearchStrategy for NegaScoutMemoryStrategy {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult {
        if self.options.look_ahead == 0 {
            return SearchResult::stand_still(root);
        }
        let mut ctx = Ctx::new(&self.options, &self.weights, &self.signals);
        let (best_id, best) =
            root_negascout(&mut ctx, &self.table, game, root, -INFINITY, INFINITY);
        log_table_traffic("negascout-memory", &self.table);
        match best_id {
            Some(id) => SearchResult {
                move_id: id,
                value: best,
                nodes_considered: ctx.nodes,
            },
            None => SearchResult::stand_still(root),
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::NegaScoutMemory
    }
}

fn log_table_traffic(who: &str, table: &TranspositionTable) {
    log::debug!(
        "{who} table: {} entries, {} hits, {} misses",
        table.len(),
        table.hits(),
        table.misses()
    );
}

/// Root loop of memory negamax under an arbitrary window. Returns the best
/// reply id (None when nothing was searched) and the fail-soft root value.
/// MTD(f) drives this with null windows; the plain strategy passes the full
/// window.
pub(crate) fn root_negamax(
    ctx: &mut Ctx<'_>,
    table: &TranspositionTable,
    game: &mut dyn Searchable,
    root: &Move,
    mut alpha: i32,
    beta: i32,
) -> (Option<String>, i32) {
    let moves = ctx.candidates(game, root);
    let depth = ctx.options.look_ahead - 1;
    let mut best = -INFINITY;
    let mut best_id = None;
    for mv in &moves {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        let before = game.hash_key();
        game.make_move(mv);
        let v = -negamax_mem(ctx, table, game, mv, depth, 0, -beta, -alpha);
        game.undo_move();
        debug_assert_eq!(game.hash_key(), before);
        if best_id.is_none() || v > best {
            best = v;
            best_id = Some(mv.id.clone());
        }
        alpha = alpha.max(v);
        if alpha >= beta {
            break;
        }
    }
    (best_id, best)
}

/// Root loop of memory negascout; same contract as [`root_negamax`].
pub(crate) fn root_negascout(
    ctx: &mut Ctx<'_>,
    table: &TranspositionTable,
    game: &mut dyn Searchable,
    root: &Move,
    mut alpha: i32,
    beta: i32,
) -> (Option<String>, i32) {
    let moves = ctx.candidates(game, root);
    let depth = ctx.options.look_ahead - 1;
    let mut best = -INFINITY;
    let mut best_id = None;
    for (i, mv) in moves.iter().enumerate() {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        let before = game.hash_key();
        game.make_move(mv);
        let v = if i == 0 {
            -negascout_mem(ctx, table, game, mv, depth, 0, -beta, -alpha)
        } else {
            let probe = -negascout_mem(ctx, table, game, mv, depth, 0, -(alpha + 1), -alpha);
            if probe > alpha && probe < beta {
                -negascout_mem(ctx, table, game, mv, depth, 0, -beta, -probe)
            } else {
                probe
            }
        };
        game.undo_move();
        debug_assert_eq!(game.hash_key(), before);
        if best_id.is_none() || v > best {
            best = v;
            best_id = Some(mv.id.clone());
        }
        alpha = alpha.max(v);
        if alpha >= beta {
            break;
        }
    }
    (best_id, best)
}

/// Probe outcome: either an immediate answer or a (possibly tightened)
/// window to search with.
enum Probe {
    Answer(i32),
    Window(i32, i32),
}

fn probe_table(table: &TranspositionTable, key: u64, depth: u32, alpha: i32, beta: i32) -> Probe {
    if depth < MIN_STORE_DEPTH {
        return Probe::Window(alpha, beta);
    }
    match table.probe(key) {
        Some(entry) if entry.depth >= depth => {
            if entry.lower >= beta {
                return Probe::Answer(entry.lower);
            }
            if entry.upper <= alpha {
                return Probe::Answer(entry.upper);
            }
            if entry.is_exact() {
                return Probe::Answer(entry.lower);
            }
            Probe::Window(alpha.max(entry.lower), beta.min(entry.upper))
        }
        _ => Probe::Window(alpha, beta),
    }
}

/// Classify the fail-soft result against the searched window and store it.
fn store_result(
    ctx: &Ctx<'_>,
    table: &TranspositionTable,
    key: u64,
    depth: u32,
    alpha: i32,
    beta: i32,
    best: i32,
    best_move_id: String,
) {
    // Partial values from a cancelled search would poison later probes.
    if ctx.stopped {
        return;
    }
    let (lower, upper) = if best <= alpha {
        (-INFINITY, best)
    } else if best >= beta {
        (best, INFINITY)
    } else {
        (best, best)
    };
    table.store(
        key,
        TtEntry {
            depth,
            lower,
            upper,
            best_move_id,
        },
    );
}

fn negamax_mem(
    ctx: &mut Ctx<'_>,
    table: &TranspositionTable,
    game: &mut dyn Searchable,
    last: &Move,
    depth: u32,
    qdepth: u32,
    alpha: i32,
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

    let key = game.hash_key();
    let (mut alpha, beta) = match probe_table(table, key, depth, alpha, beta) {
        Probe::Answer(v) => return v,
        Probe::Window(a, b) => (a, b),
    };
    let window_floor = alpha;

    let moves = ctx.candidates(game, last);
    if moves.is_empty() {
        return mover_eval(last);
    }

    let mut best = if extending { mover_eval(last) } else { -INFINITY };
    let mut best_move_id = String::new();
    let mut searched = false;
    for mv in &moves {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        game.make_move(mv);
        let v = -negamax_mem(ctx, table, game, mv, next_depth, next_qdepth, -beta, -alpha);
        game.undo_move();
        searched = true;
        if v > best || best_move_id.is_empty() {
            best = best.max(v);
            best_move_id = mv.id.clone();
        }
        alpha = alpha.max(v);
        if alpha >= beta {
            break;
        }
    }
    if !searched && !extending {
        return mover_eval(last);
    }
    store_result(ctx, table, key, depth, window_floor, beta, best, best_move_id);
    best
}

fn negascout_mem(
    ctx: &mut Ctx<'_>,
    table: &TranspositionTable,
    game: &mut dyn Searchable,
    last: &Move,
    depth: u32,
    qdepth: u32,
    alpha: i32,
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

    let key = game.hash_key();
    let (mut alpha, beta) = match probe_table(table, key, depth, alpha, beta) {
        Probe::Answer(v) => return v,
        Probe::Window(a, b) => (a, b),
    };
    let window_floor = alpha;

    let moves = ctx.candidates(game, last);
    if moves.is_empty() {
        return mover_eval(last);
    }

    let mut best = if extending { mover_eval(last) } else { -INFINITY };
    let mut best_move_id = String::new();
    let mut searched = false;
    for (i, mv) in moves.iter().enumerate() {
        if ctx.should_stop() {
            break;
        }
        ctx.nodes += 1;
        game.make_move(mv);
        let v = if i == 0 {
            -negascout_mem(ctx, table, game, mv, next_depth, next_qdepth, -beta, -alpha)
        } else {
            let probe =
                -negascout_mem(ctx, table, game, mv, next_depth, next_qdepth, -(alpha + 1), -alpha);
            if probe > alpha && probe < beta {
                -negascout_mem(ctx, table, game, mv, next_depth, next_qdepth, -beta, -probe)
            } else {
                probe
            }
        };
        game.undo_move();
        searched = true;
        if v > best || best_move_id.is_empty() {
            best = best.max(v);
            best_move_id = mv.id.clone();
        }
        alpha = alpha.max(v);
        if alpha >= beta {
            break;
        }
    }
    if !searched && !extending {
        return mover_eval(last);
    }
    store_result(ctx, table, key, depth, window_floor, beta, best, best_move_id);
    best
}
