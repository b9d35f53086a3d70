//! Move representation shared by every strategy.
//!
//! A [`Move`] is one ply of the game: an identifier assigned by the game
//! implementation, a static evaluation ("worth") computed by the game's
//! heuristic, and the flag saying which player made it. Moves are immutable
//! once created; propagated values travel through the recursion instead of
//! being written back into the move.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One ply of the game, created by the [`Searchable`](crate::Searchable)
/// collaborator. Worths are integers from player 1's point of view: positive
/// favors player 1, negative favors player 2.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    /// Identifier unique among siblings (game-defined, e.g. "e2e4" or "3,4").
    pub id: String,
    /// Static evaluation of the position after this move, player 1's view.
    pub worth: i32,
    /// True when player 1 made this move.
    pub player1: bool,
}

impl Move {
    #[must_use]
    pub fn new(id: impl Into<String>, worth: i32, player1: bool) -> Self {
        Move {
            id: id.into(),
            worth,
            player1,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.player1 { "p1" } else { "p2" };
        write!(f, "{}[{} {}]", self.id, side, self.worth)
    }
}

/// Ordered list of candidate moves as produced by `generate_moves`.
///
/// The generating game sorts candidates best-first for the moving player;
/// that ordering drives the percentage-best-moves cut and the first-child
/// assumption of principal variation search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveList(Vec<Move>);

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        MoveList(Vec::with_capacity(cap))
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Move> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    /// Keep only the best `percentage` of the list (at least one move),
    /// sorted best-first for the moving player. A percentage of 100 leaves
    /// the list untouched, preserving the generator's ordering.
    pub fn retain_best_fraction(&mut self, percentage: u32, player1_moving: bool) {
        debug_assert!((1..=100).contains(&percentage));
        if percentage >= 100 || self.0.len() <= 1 {
            return;
        }
        if player1_moving {
            self.0.sort_by(|a, b| b.worth.cmp(&a.worth));
        } else {
            self.0.sort_by(|a, b| a.worth.cmp(&b.worth));
        }
        let keep = ((self.0.len() as u64 * u64::from(percentage)).div_ceil(100)) as usize;
        self.0.truncate(keep.max(1));
    }
}

impl From<Vec<Move>> for MoveList {
    fn from(moves: Vec<Move>) -> Self {
        MoveList(moves)
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> MoveList {
        vec![
            Move::new("a", 5, true),
            Move::new("b", -3, true),
            Move::new("c", 9, true),
            Move::new("d", 0, true),
        ]
        .into()
    }

    #[test]
    fn full_percentage_preserves_order() {
        let mut moves = list();
        moves.retain_best_fraction(100, true);
        let ids: Vec<&str> = moves.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn trims_to_best_half_for_player1() {
        let mut moves = list();
        moves.retain_best_fraction(50, true);
        let ids: Vec<&str> = moves.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
    }

    #[test]
    fn trims_to_best_half_for_player2() {
        let mut moves = list();
        moves.retain_best_fraction(50, false);
        let ids: Vec<&str> = moves.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["b", "d"]);
    }

    #[test]
    fn never_trims_below_one_move() {
        let mut moves = list();
        moves.retain_best_fraction(1, true);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.first().unwrap().id, "c");
    }

    #[test]
    fn display_includes_side_and_worth() {
        let mv = Move::new("e2e4", 12, true);
        assert_eq!(mv.to_string(), "e2e4[p1 12]");
    }
}
