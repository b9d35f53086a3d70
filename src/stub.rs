//! An in-memory game over an explicit tree, for tests, examples, and
//! benchmarks.
//!
//! Real games derive moves from board state; [`StubGame`] instead walks a
//! hand-built (or generated) [`GameNode`] tree with a cursor, which makes
//! search behavior fully predictable: every strategy property in this
//! crate's test suite runs against it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::moves::{Move, MoveList};
use crate::searchable::Searchable;
use crate::tt::path_hash;
use crate::weights::GameWeights;

/// One position in a stub game tree: the move that produced it, whether it
/// is quiet, and the replies available from it.
#[derive(Clone, Debug)]
pub struct GameNode {
    mv: Move,
    quiescent: bool,
    children: Vec<GameNode>,
}

impl GameNode {
    #[must_use]
    pub fn new(id: impl Into<String>, worth: i32, player1: bool) -> Self {
        GameNode {
            mv: Move::new(id, worth, player1),
            quiescent: true,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<GameNode>) -> Self {
        self.children = children;
        self
    }

    /// Mark the position as unstable so quiescence search extends past it.
    #[must_use]
    pub fn unsettled(mut self) -> Self {
        self.quiescent = false;
        self
    }
}

/// A [`Searchable`] over a fixed tree. The cursor starts at the root (the
/// position after the root move) and `make_move`/`undo_move` walk it down
/// and up.
#[derive(Clone, Debug)]
pub struct StubGame {
    root: GameNode,
    path: Vec<usize>,
}

impl StubGame {
    #[must_use]
    pub fn new(root: GameNode) -> Self {
        StubGame {
            root,
            path: Vec::new(),
        }
    }

    /// The move that produced the root position; searches start from it.
    #[must_use]
    pub fn root(&self) -> &Move {
        &self.root.mv
    }

    fn current(&self) -> &GameNode {
        let mut node = &self.root;
        for &i in &self.path {
            node = &node.children[i];
        }
        node
    }

    /// The fixed example tree used across the test suite: two replies to a
    /// player-1 root move, two replies to each of those, and so on for
    /// three plies, with hand-picked worths (player 1's perspective).
    ///
    /// Depth-3 minimax resolves it to reply "0" at value -5 for player 1;
    /// alpha-beta prunes exactly one leaf.
    #[must_use]
    pub fn example() -> Self {
        let tree = GameNode::new("root", 0, true).with_children(vec![
            GameNode::new("0", -8, false).with_children(vec![
                GameNode::new("00", 7, true).with_children(vec![
                    GameNode::new("000", -5, false),
                    GameNode::new("001", 6, false),
                ]),
                GameNode::new("01", 2, true).with_children(vec![
                    GameNode::new("010", -10, false),
                    GameNode::new("011", 4, false),
                ]),
            ]),
            GameNode::new("1", -2, false).with_children(vec![
                GameNode::new("10", 8, true).with_children(vec![
                    GameNode::new("100", -7, false),
                    GameNode::new("101", 0, false),
                ]),
                GameNode::new("11", -3, true).with_children(vec![
                    GameNode::new("110", -4, false),
                    GameNode::new("111", 5, false),
                ]),
            ]),
        ]);
        StubGame::new(tree)
    }

    /// The example tree with the players swapped and every worth negated:
    /// the same game seen from the other side of the board.
    #[must_use]
    pub fn mirrored_example() -> Self {
        fn mirror(node: &GameNode) -> GameNode {
            let mut flipped = GameNode::new(node.mv.id.clone(), -node.mv.worth, !node.mv.player1)
                .with_children(node.children.iter().map(mirror).collect());
            flipped.quiescent = node.quiescent;
            flipped
        }
        let original = StubGame::example();
        StubGame::new(mirror(&original.root))
    }

    /// A uniform random tree: `branching` replies per position down to
    /// `depth` plies, worths drawn from `-50..=50`. Deterministic per seed.
    #[must_use]
    pub fn random(seed: u64, depth: u32, branching: usize) -> Self {
        fn grow(
            rng: &mut StdRng,
            id: String,
            player1: bool,
            depth: u32,
            branching: usize,
        ) -> GameNode {
            let node = GameNode::new(id.clone(), rng.gen_range(-50..=50), player1);
            if depth == 0 {
                return node;
            }
            let children = (0..branching)
                .map(|i| grow(rng, format!("{id}{i}"), !player1, depth - 1, branching))
                .collect();
            node.with_children(children)
        }
        let mut rng = StdRng::seed_from_u64(seed);
        StubGame::new(grow(&mut rng, "r".to_string(), true, depth, branching))
    }
}

impl Searchable for StubGame {
    fn generate_moves(
        &mut self,
        _last: &Move,
        _weights: &GameWeights,
        _for_player1: bool,
    ) -> MoveList {
        self.current()
            .children
            .iter()
            .map(|child| child.mv.clone())
            .collect::<Vec<Move>>()
            .into()
    }

    fn is_quiescent(&self, _last: &Move) -> bool {
        self.current().quiescent
    }

    fn make_move(&mut self, mv: &Move) {
        let index = self
            .current()
            .children
            .iter()
            .position(|child| child.mv.id == mv.id);
        match index {
            Some(i) => self.path.push(i),
            None => debug_assert!(false, "move {mv} is not a reply to {}", self.current().mv),
        }
    }

    fn undo_move(&mut self) {
        let popped = self.path.pop();
        debug_assert!(popped.is_some(), "undo with no move made");
    }

    fn hash_key(&self) -> u64 {
        let mut hash = path_hash(0, &self.root.mv.id);
        let mut node = &self.root;
        for &i in &self.path {
            node = &node.children[i];
            hash = path_hash(hash, &node.mv.id);
        }
        hash
    }

    fn boxed_clone(&self) -> Box<dyn Searchable> {
        Box::new(self.clone())
    }
}
