//! The contract between the search engine and a concrete game.

use crate::moves::{Move, MoveList};
use crate::weights::GameWeights;

/// Capability the engine consumes to walk a game tree.
///
/// Implementations hold mutable board state. A strategy borrows the
/// searchable exclusively for the duration of one search and traverses the
/// tree with [`make_move`](Searchable::make_move) /
/// [`undo_move`](Searchable::undo_move); it must leave the state exactly as
/// it found it. Cloning via [`boxed_clone`](Searchable::boxed_clone) is used
/// only where an independent instance is required (UCT playout simulations,
/// parallel root exploration) — sharing one instance across concurrent
/// searches is not allowed.
pub trait Searchable: Send {
    /// Produce the ordered legal replies to `last`, each already carrying a
    /// static worth computed from `weights`. Candidates are sorted
    /// best-first for the moving player; `for_player1` tells the heuristic
    /// which player's evaluation perspective is being requested.
    fn generate_moves(&mut self, last: &Move, weights: &GameWeights, for_player1: bool)
        -> MoveList;

    /// True when the position after `last` is stable (no pending high-value
    /// exchange). Consulted only when quiescence search is enabled.
    fn is_quiescent(&self, last: &Move) -> bool;

    /// Apply `mv` to the board in place.
    fn make_move(&mut self, mv: &Move);

    /// Revert the most recent [`make_move`](Searchable::make_move).
    fn undo_move(&mut self);

    /// Hash of the current position, used to key transposition entries.
    /// Positions reached by different move orders should hash equal exactly
    /// when the game considers them equivalent.
    fn hash_key(&self) -> u64;

    /// Independent copy of the current state.
    fn boxed_clone(&self) -> Box<dyn Searchable>;
}

impl Clone for Box<dyn Searchable> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}
