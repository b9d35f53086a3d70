//! Game-tree search strategies for two-player zero-sum games.
//!
//! The crate provides a family of interchangeable search strategies
//! (minimax, negamax, negascout, transposition-table memory variants,
//! MTD(f), and UCT monte-carlo search) that all operate against one
//! abstract [`Searchable`] contract supplied by the game implementation.
//!
//! A game controller builds [`SearchOptions`], obtains a [`Searchable`]
//! view of its board, and calls [`search`]:
//!
//! ```
//! use twoplayer_search::{search, GameWeights, SearchOptions, StrategyKind};
//! use twoplayer_search::stub::StubGame;
//!
//! let mut game = StubGame::example();
//! let root = game.root().clone();
//! let options = SearchOptions::new(StrategyKind::NegaMax).with_look_ahead(3);
//! let result = search(&mut game, &root, &options, &GameWeights::default(), None);
//! assert_eq!(result.move_id, "0");
//! ```

pub mod error;
pub mod moves;
pub mod options;
pub mod search;
pub mod searchable;
pub mod stub;
pub mod sync;
pub mod tt;
pub mod weights;

pub use error::OptionsError;
pub use moves::{Move, MoveList};
pub use options::{MonteCarloOptions, SearchOptions, StrategyKind};
pub use search::{create_strategy, search, SearchResult, SearchStrategy};
pub use searchable::Searchable;
pub use sync::{InterruptFlag, SearchSignals};
pub use tt::TranspositionTable;
pub use weights::GameWeights;
