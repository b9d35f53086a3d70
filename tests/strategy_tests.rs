//! End-to-end strategy behavior on the fixed example tree.

use twoplayer_search::stub::StubGame;
use twoplayer_search::{
    search, GameWeights, MonteCarloOptions, SearchOptions, SearchResult, Searchable, StrategyKind,
};

fn run(game: &mut StubGame, options: &SearchOptions) -> SearchResult {
    let root = game.root().clone();
    search(game, &root, options, &GameWeights::default(), None)
}

fn options(kind: StrategyKind, look_ahead: u32, alpha_beta: bool) -> SearchOptions {
    SearchOptions::new(kind)
        .with_look_ahead(look_ahead)
        .with_alpha_beta(alpha_beta)
}

/// Reported values live in two conventions: minimax reports for the root
/// mover, the negamax family for the side choosing among the replies.
/// Normalizing to the minimax convention lets the whole family be compared.
fn as_minimax_value(kind: StrategyKind, value: i32) -> i32 {
    match kind {
        StrategyKind::MiniMax | StrategyKind::Uct => value,
        _ => -value,
    }
}

#[test]
fn zero_look_ahead_stands_still() {
    for kind in StrategyKind::ALL {
        let mut game = StubGame::example();
        let result = run(&mut game, &options(kind, 0, true));
        assert_eq!(result.move_id, "root", "{kind}");
        assert_eq!(result.value, 0, "{kind}");
        assert_eq!(result.nodes_considered, 0, "{kind}");
    }
}

#[test]
fn no_legal_replies_stands_still() {
    let mut game = StubGame::example();
    // Drive the cursor to a leaf; a search from there has no replies.
    let weights = GameWeights::default();
    let mut leaf = game.root().clone();
    for _ in 0..3 {
        let replies = game.generate_moves(&leaf, &weights, !leaf.player1);
        leaf = replies.first().unwrap().clone();
        game.make_move(&leaf);
    }
    for kind in StrategyKind::ALL {
        let opts = options(kind, 3, true);
        let result = search(&mut game, &leaf, &opts, &weights, None);
        assert_eq!(result.move_id, leaf.id, "{kind}");
        assert_eq!(result.value, leaf.worth, "{kind}");
        assert_eq!(result.nodes_considered, 0, "{kind}");
    }
}

#[test]
fn one_ply_fixture_result() {
    let mut game = StubGame::example();
    let result = run(&mut game, &options(StrategyKind::MiniMax, 1, false));
    assert_eq!(result.move_id, "0");
    assert_eq!(result.value, -8);
    assert_eq!(result.nodes_considered, 2);
}

#[test]
fn two_ply_fixture_result() {
    let mut game = StubGame::example();
    let result = run(&mut game, &options(StrategyKind::MiniMax, 2, false));
    assert_eq!(result.move_id, "0");
    assert_eq!(result.value, 7);
    assert_eq!(result.nodes_considered, 6);
}

#[test]
fn three_ply_fixture_without_pruning() {
    let mut game = StubGame::example();
    let result = run(&mut game, &options(StrategyKind::MiniMax, 3, false));
    assert_eq!(result.move_id, "0");
    assert_eq!(result.value, -5);
    assert_eq!(result.nodes_considered, 14);
}

#[test]
fn three_ply_fixture_with_pruning() {
    let mut game = StubGame::example();
    let result = run(&mut game, &options(StrategyKind::MiniMax, 3, true));
    assert_eq!(result.move_id, "0");
    assert_eq!(result.value, -5);
    assert_eq!(result.nodes_considered, 13);
}

#[test]
fn negamax_reproduces_the_fixture_counts() {
    let mut game = StubGame::example();
    for (alpha_beta, nodes) in [(false, 14), (true, 13)] {
        let result = run(&mut game, &options(StrategyKind::NegaMax, 3, alpha_beta));
        assert_eq!(result.move_id, "0");
        assert_eq!(result.value, 5);
        assert_eq!(result.nodes_considered, nodes);
    }
}

#[test]
fn sign_consistency_for_both_root_players() {
    for mut game in [StubGame::example(), StubGame::mirrored_example()] {
        for look_ahead in 1..=3 {
            let mini = run(&mut game, &options(StrategyKind::MiniMax, look_ahead, false));
            let nega = run(&mut game, &options(StrategyKind::NegaMax, look_ahead, false));
            assert_eq!(nega.value, -mini.value);
            assert_eq!(nega.move_id, mini.move_id);
        }
    }
}

#[test]
fn mirrored_tree_gives_the_mirrored_player_the_same_search() {
    let mut original = StubGame::example();
    let mut mirrored = StubGame::mirrored_example();
    for alpha_beta in [false, true] {
        let a = run(&mut original, &options(StrategyKind::MiniMax, 3, alpha_beta));
        let b = run(&mut mirrored, &options(StrategyKind::MiniMax, 3, alpha_beta));
        assert_eq!(a, b);
    }
}

#[test]
fn the_brute_force_family_agrees_on_the_example() {
    let kinds = [
        StrategyKind::MiniMax,
        StrategyKind::NegaMax,
        StrategyKind::NegaMaxMemory,
        StrategyKind::NegaScout,
        StrategyKind::NegaScoutMemory,
        StrategyKind::MtdNegaMax,
        StrategyKind::MtdNegaScout,
    ];
    for look_ahead in 1..=3 {
        for kind in kinds {
            let mut game = StubGame::example();
            let result = run(&mut game, &options(kind, look_ahead, true));
            let reference = run(&mut game, &options(StrategyKind::MiniMax, look_ahead, true));
            assert_eq!(result.move_id, reference.move_id, "{kind} at {look_ahead}");
            assert_eq!(
                as_minimax_value(kind, result.value),
                reference.value,
                "{kind} at {look_ahead}"
            );
        }
    }
}

#[test]
fn mtd_matches_its_underlying_memory_strategy() {
    let mut game = StubGame::example();
    let direct = run(&mut game, &options(StrategyKind::NegaScoutMemory, 3, true));
    let driven = run(&mut game, &options(StrategyKind::MtdNegaScout, 3, true));
    assert_eq!(driven.move_id, direct.move_id);
    assert_eq!(driven.value, direct.value);
}

#[test]
fn trimming_to_best_moves_shrinks_the_search() {
    let mut game = StubGame::example();
    let full = run(&mut game, &options(StrategyKind::MiniMax, 2, false));
    let trimmed_options = options(StrategyKind::MiniMax, 2, false)
        .with_percentage_best_moves(50)
        .unwrap();
    let trimmed = run(&mut game, &trimmed_options);
    // Half the candidates at each level: one reply, one follow-up.
    assert_eq!(trimmed.nodes_considered, 2);
    assert!(trimmed.nodes_considered < full.nodes_considered);
    // The statically best reply for player 2 happens to be the right one.
    assert_eq!(trimmed.move_id, "0");
    assert_eq!(trimmed.value, 7);
}

#[test]
fn uct_is_deterministic_per_seed() {
    let monte_carlo = MonteCarloOptions {
        max_simulations: 200,
        seed: 42,
        ..MonteCarloOptions::default()
    };
    let opts = SearchOptions::new(StrategyKind::Uct)
        .with_monte_carlo(monte_carlo)
        .unwrap();
    let mut first = StubGame::example();
    let mut second = StubGame::example();
    let a = run(&mut first, &opts);
    let b = run(&mut second, &opts);
    assert_eq!(a, b);
    assert_eq!(a.nodes_considered, 200);
    assert!(a.move_id == "0" || a.move_id == "1");
}

#[test]
fn uct_prefers_the_winning_reply() {
    use twoplayer_search::stub::GameNode;
    // Every continuation under "a" ends in a player-2 win, every one under
    // "b" in a player-2 loss; the chooser at the root is player 2.
    let tree = GameNode::new("root", 0, true).with_children(vec![
        GameNode::new("a", -1, false).with_children(vec![
            GameNode::new("a0", 3, true).with_children(vec![GameNode::new("a00", -6, false)]),
            GameNode::new("a1", 1, true).with_children(vec![GameNode::new("a10", -4, false)]),
        ]),
        GameNode::new("b", 1, false).with_children(vec![
            GameNode::new("b0", -3, true).with_children(vec![GameNode::new("b00", 6, false)]),
            GameNode::new("b1", -1, true).with_children(vec![GameNode::new("b10", 4, false)]),
        ]),
    ]);
    let monte_carlo = MonteCarloOptions {
        max_simulations: 100,
        seed: 7,
        ..MonteCarloOptions::default()
    };
    let opts = SearchOptions::new(StrategyKind::Uct)
        .with_monte_carlo(monte_carlo)
        .unwrap();
    let mut game = StubGame::new(tree);
    let result = run(&mut game, &opts);
    assert_eq!(result.move_id, "a");
}

#[test]
fn search_restores_the_game_state() {
    for kind in StrategyKind::ALL {
        let mut game = StubGame::example();
        let before = game.hash_key();
        let _ = run(&mut game, &options(kind, 3, true));
        assert_eq!(game.hash_key(), before, "{kind}");
    }
}

#[cfg(feature = "serde")]
mod serde_round_trips {
    use super::*;

    #[test]
    fn options_round_trip_through_json() {
        let opts = options(StrategyKind::MtdNegaScout, 4, true)
            .with_percentage_best_moves(60)
            .unwrap();
        let json = serde_json::to_string(&opts).unwrap();
        let back: SearchOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn results_round_trip_through_json() {
        let mut game = StubGame::example();
        let result = run(&mut game, &options(StrategyKind::NegaScout, 3, true));
        let json = serde_json::to_string(&result).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
