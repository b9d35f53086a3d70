//! UCT monte-carlo tree search.
//!
//! Builds an asymmetric tree over repeated simulated playouts: descend by
//! upper-confidence-bound selection, expand the first unexpanded node on
//! the path, play out randomly from there on a cloned game, and push the
//! outcome back up the path. Win counts at each node are kept from the
//! perspective of the player who made that node's move, so the UCB
//! selection at every level favors the player actually choosing there.
//!
//! Fully deterministic for a fixed seed and simulation budget.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::moves::Move;
use crate::options::{SearchOptions, StrategyKind};
use crate::searchable::Searchable;
use crate::sync::SearchSignals;
use crate::weights::GameWeights;

use super::{Ctx, SearchResult, SearchStrategy};

/// UCB value handed to children that have never been visited, large enough
/// to outrank any visited sibling. Untried children are taken in the order
/// the game generated them.
const UNVISITED_URGENCY: f64 = 1.0e9;

pub struct UctStrategy {
    options: SearchOptions,
    weights: GameWeights,
    signals: SearchSignals,
}

struct UctNode {
    mv: Move,
    visits: u32,
    /// Accumulated score from the perspective of the player who made `mv`
    /// (1 per won playout, 0.5 per draw).
    wins: f64,
    /// None until the node is expanded; an empty vec marks a terminal
    /// position.
    children: Option<Vec<UctNode>>,
}

impl UctNode {
    fn new(mv: Move) -> Self {
        UctNode {
            mv,
            visits: 0,
            wins: 0.0,
            children: None,
        }
    }

    fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.5
        } else {
            self.wins / f64::from(self.visits)
        }
    }

    fn ucb(&self, parent_visits: u32, ratio: f64) -> f64 {
        if self.visits == 0 {
            return UNVISITED_URGENCY;
        }
        let exploration =
            (f64::from(parent_visits.max(1)).ln() / f64::from(self.visits)).sqrt();
        self.win_rate() + ratio * exploration
    }
}

impl UctStrategy {
    #[must_use]
    pub fn new(options: SearchOptions, weights: GameWeights, signals: SearchSignals) -> Self {
        UctStrategy {
            options,
            weights,
            signals,
        }
    }

    /// One selection/expansion/playout/backpropagation pass. `game` holds
    /// the position after `node.mv`; it is restored before returning. The
    /// return value is the playout score for player 1 in `[0, 1]`.
    fn simulate(
        &self,
        ctx: &mut Ctx<'_>,
        rng: &mut StdRng,
        game: &mut dyn Searchable,
        node: &mut UctNode,
    ) -> f64 {
        let p1_score = match node.children.as_mut() {
            None => {
                // First visit: expand, then play out from this position.
                let moves = ctx.candidates(game, &node.mv);
                node.children = Some(moves.into_iter().map(UctNode::new).collect());
                self.playout(rng, game, &node.mv)
            }
            Some(children) if children.is_empty() => score_for_player1(node.mv.worth),
            Some(children) => {
                let ratio = self.options.monte_carlo.explore_exploit_ratio;
                let idx = select_child(children, node.visits, ratio);
                let child = &mut children[idx];
                game.make_move(&child.mv);
                let score = self.simulate(ctx, rng, game, child);
                game.undo_move();
                score
            }
        };
        node.visits += 1;
        node.wins += if node.mv.player1 {
            p1_score
        } else {
            1.0 - p1_score
        };
        p1_score
    }

    /// Random playout on a cloned game, up to the configured ply budget or
    /// until no reply exists, scored by the sign of the final worth.
    fn playout(&self, rng: &mut StdRng, game: &dyn Searchable, from: &Move) -> f64 {
        let mut sim = game.boxed_clone();
        let mut last = from.clone();
        for _ in 0..self.options.monte_carlo.playout_look_ahead {
            let moves = sim.generate_moves(&last, &self.weights, !last.player1);
            if moves.is_empty() {
                break;
            }
            let pick = moves.as_slice()[rng.gen_range(0..moves.len())].clone();
            sim.make_move(&pick);
            last = pick;
        }
        score_for_player1(last.worth)
    }
}

impl SearchStrategy for UctStrategy {
    fn search(&mut self, game: &mut dyn Searchable, root: &Move) -> SearchResult {
        if self.options.look_ahead == 0 {
            return SearchResult::stand_still(root);
        }
        let mut ctx = Ctx::new(&self.options, &self.weights, &self.signals);
        if ctx.candidates(game, root).is_empty() {
            return SearchResult::stand_still(root);
        }
        let mut rng = StdRng::seed_from_u64(self.options.monte_carlo.seed);
        let mut tree = UctNode::new(root.clone());

        // One completed playout counts as one node considered.
        for _ in 0..self.options.monte_carlo.max_simulations {
            if ctx.should_stop() {
                break;
            }
            let before = game.hash_key();
            self.simulate(&mut ctx, &mut rng, game, &mut tree);
            debug_assert_eq!(game.hash_key(), before);
            ctx.nodes += 1;
        }

        let children = match tree.children {
            Some(children) if !children.is_empty() => children,
            _ => return SearchResult::stand_still(root),
        };
        let mut best = &children[0];
        for child in &children[1..] {
            let more_visited = child.visits > best.visits;
            let better_rate =
                child.visits == best.visits && child.win_rate() > best.win_rate();
            if more_visited || better_rate {
                best = child;
            }
        }
        SearchResult {
            move_id: best.mv.id.clone(),
            value: best.mv.worth,
            nodes_considered: ctx.nodes,
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Uct
    }
}

fn select_child(children: &[UctNode], parent_visits: u32, ratio: f64) -> usize {
    let mut best = 0;
    let mut best_ucb = f64::NEG_INFINITY;
    for (i, child) in children.iter().enumerate() {
        let ucb = child.ucb(parent_visits, ratio);
        if ucb > best_ucb {
            best = i;
            best_ucb = ucb;
        }
    }
    best
}

/// Playout outcome for player 1: win, draw, or loss by the sign of the
/// final position's worth.
fn score_for_player1(worth: i32) -> f64 {
    match worth.cmp(&0) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Equal => 0.5,
        std::cmp::Ordering::Less => 0.0,
    }
}
